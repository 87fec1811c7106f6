use std::fmt;

use thiserror::Error;

/// Which browser source a fetch failure came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceName {
    Tabs,
    History,
    Bookmarks,
}

impl fmt::Display for SourceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tabs => f.write_str("tabs"),
            Self::History => f.write_str("history"),
            Self::Bookmarks => f.write_str("bookmarks"),
        }
    }
}

/// Errors raised by the search engine
///
/// `SourceFetch` and `Augmentation` are recovered where they occur and only
/// reported for diagnostics. `IndexBuild` and `CacheCorruption` reach the caller
/// of a query after the cache slot has been invalidated. `SnapshotEncode` and
/// `InvalidConfig` leave the cache alone.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SearchError {
    #[error("Failed to fetch {source_name}: {message}")]
    SourceFetch { source_name: SourceName, message: String },

    #[error("Phonetic derivation failed for {title:?}: {message}")]
    Augmentation { title: String, message: String },

    #[error("Index build failed: {0}")]
    IndexBuild(String),

    #[error("Snapshot could not be decoded: {0}")]
    CacheCorruption(String),

    #[error("Snapshot could not be encoded: {0}")]
    SnapshotEncode(String),

    #[error("Invalid engine configuration: {0}")]
    InvalidConfig(String),
}

impl SearchError {
    /// Whether the error is absorbed locally instead of failing a query
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::SourceFetch { .. } | Self::Augmentation { .. })
    }
}

pub type Result<T> = std::result::Result<T, SearchError>;
