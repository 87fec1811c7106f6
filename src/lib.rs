//! Browser Omnisearch - unified fuzzy search over tabs, history, and bookmarks
//!
//! Records from the three browser sources are normalized into one shape, given
//! pinyin keys so Chinese titles match Latin queries, and indexed for fuzzy
//! search. A single-slot cache keeps the last index warm between keystrokes.
//!
//! - An empty query returns the recently used shortlist: open tabs by recency,
//!   topped up with recent history.
//! - A non-empty query returns fuzzy matches, deduplicated, ordered by recency,
//!   with bookmarks after everything else.
//!
//! # Example
//!
//! ```no_run
//! use browser_omnisearch::{EngineConfig, JsonFileSources, SearchEngine};
//!
//! let engine =
//!     SearchEngine::with_config(JsonFileSources::new("/tmp/exports"), EngineConfig::default())?;
//! for record in engine.query("zhongguo", 10, false)? {
//!     println!("{} {}", record.title, record.url);
//! }
//! # Ok::<(), browser_omnisearch::SearchError>(())
//! ```

pub mod cache;
pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod index_storage;
pub mod indexer;
pub mod logging;
pub mod models;
pub mod parsers;
pub mod phonetic;
pub mod ranker;
pub mod sources;
pub mod utils;

// Re-export commonly used types
pub use cache::{CachePolicy, FreshnessCache};
pub use config::EngineConfig;
pub use engine::{QueryOutcome, QueryRequest, SearchEngine, answer};
pub use error::{SearchError, SourceName};
pub use index_storage::{decode_snapshot, encode_snapshot};
pub use indexer::{IndexSnapshot, build_index};
pub use models::{Record, RecordKind};
pub use sources::{BrowserSources, JsonFileSources};
