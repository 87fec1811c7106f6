//! Browser data sources and their aggregation into records.
//!
//! The browser itself is an external collaborator reached through
//! [`BrowserSources`]. [`JsonFileSources`] implements it over a directory of
//! exported JSON files, which is what the command-line front end uses.

pub mod aggregator;
pub mod bookmarks;
pub mod file;

use anyhow::Result;

pub use aggregator::{AggregateOptions, Aggregation, aggregate, aggregate_with_tabs};
pub use bookmarks::flatten_bookmark_tree;
pub use file::JsonFileSources;

use crate::models::{BookmarkItem, HistoryItem, OpenTab};

/// Fetch capabilities supplied by the browser environment
///
/// Implementations are called from several threads at once during aggregation,
/// and each fetch may block.
pub trait BrowserSources: Send + Sync {
    /// All open tabs, including the active one
    fn open_tabs(&self) -> Result<Vec<OpenTab>>;

    /// Most recent history entries, unfiltered, at most `max_results`
    fn history(&self, max_results: usize) -> Result<Vec<HistoryItem>>;

    /// Every bookmark carrying a URL, flattened out of the bookmark tree
    fn bookmarks(&self) -> Result<Vec<BookmarkItem>>;

    /// Id of the tab the user is currently viewing
    ///
    /// Consulted only when no tab from [`Self::open_tabs`] is flagged active.
    fn active_tab_id(&self) -> Option<String>;
}
