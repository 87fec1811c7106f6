//! Fuzzy index over browser records
//!
//! - **Build** ([`build_index`]): validates the record set and precomputes normalized
//!   field text into an [`IndexSnapshot`]. A record set with duplicate identities is
//!   rejected instead of silently indexed.
//!
//! - **Search** ([`search`]): scores each record's fields (title, URL, pinyin, pinyin
//!   initials) against the query and keeps records whose best score is within the
//!   configured threshold.
//!
//! Building and searching are separate so one snapshot can serve every keystroke
//! until the cache decides it is stale.

pub mod builder;
pub mod fuzzy;
pub mod search;

pub use builder::{FieldKey, IndexSnapshot, IndexedRecord, build_index};
pub use fuzzy::{FieldWeights, FuzzyConfig, SearchField};
pub use search::{SearchHit, search};
