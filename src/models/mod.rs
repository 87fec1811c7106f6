//! Data models for browser search.
//!
//! - [`Record`] - Normalized tab, history entry, or bookmark; the unit that is indexed
//!   and returned
//! - [`OpenTab`], [`HistoryItem`], [`BookmarkItem`], [`BookmarkNode`] - Raw items as
//!   delivered by the browser APIs
//!
//! Raw items use custom deserializers (`parsers::deserializers`) for browser ids and
//! millisecond timestamps.

pub mod record;
pub mod source;

pub use record::{Record, RecordKey, RecordKind};
pub use source::{BookmarkItem, BookmarkNode, HistoryItem, OpenTab};
