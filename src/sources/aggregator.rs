//! Source aggregation into one record set.
//!
//! # Error Handling Strategy
//!
//! Each source degrades independently: a fetch that fails is logged, reported in
//! [`Aggregation::failures`], and contributes no records. Aggregation itself never
//! fails, since a partial list is more useful to a search box than none.
//!
//! # Concurrency
//!
//! Fetches block on the browser, so each one gets its own scoped thread rather
//! than a slot in the rayon pool that phonetic augmentation runs on next. A fetch
//! that panics is joined like any other and reported as a failed source.

use std::thread::{self, ScopedJoinHandle};

use anyhow::anyhow;
use tracing::{debug, warn};

use super::BrowserSources;
use crate::error::{SearchError, SourceName};
use crate::models::{BookmarkItem, HistoryItem, OpenTab, Record, RecordKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AggregateOptions {
    /// Maximum number of history entries requested from the browser
    pub history_limit: usize,
}

impl Default for AggregateOptions {
    fn default() -> Self {
        Self { history_limit: 1000 }
    }
}

#[derive(Debug, Default)]
pub struct Aggregation {
    pub records: Vec<Record>,
    pub failures: Vec<SearchError>,
}

/// Fetch all three sources concurrently and normalize them into records
///
/// The active tab is excluded from tab records; it still shows up through
/// history or bookmarks when it matches there.
pub fn aggregate<S: BrowserSources + ?Sized>(sources: &S, options: &AggregateOptions) -> Aggregation {
    fetch_and_normalize(sources, options, None)
}

/// Like [`aggregate`], but with the open tabs already fetched by the caller
///
/// Only history and bookmarks are requested from `sources`.
pub fn aggregate_with_tabs<S: BrowserSources + ?Sized>(
    sources: &S,
    options: &AggregateOptions,
    tabs: anyhow::Result<Vec<OpenTab>>,
) -> Aggregation {
    fetch_and_normalize(sources, options, Some(tabs))
}

fn fetch_and_normalize<S: BrowserSources + ?Sized>(
    sources: &S,
    options: &AggregateOptions,
    prefetched_tabs: Option<anyhow::Result<Vec<OpenTab>>>,
) -> Aggregation {
    let (tabs, history, bookmarks) = thread::scope(|scope| {
        let history = scope.spawn(|| sources.history(options.history_limit));
        let bookmarks = scope.spawn(|| sources.bookmarks());
        let tabs = match prefetched_tabs {
            Some(tabs) => tabs,
            None => join_fetch(SourceName::Tabs, scope.spawn(|| sources.open_tabs())),
        };
        (
            tabs,
            join_fetch(SourceName::History, history),
            join_fetch(SourceName::Bookmarks, bookmarks),
        )
    });

    let mut aggregation = Aggregation::default();

    if let Some(tabs) = collect(SourceName::Tabs, tabs, &mut aggregation.failures) {
        // Tabs usually flag the active one inline; only ask separately when none does
        let active_tab_id =
            if tabs.iter().any(|tab| tab.active) { None } else { sources.active_tab_id() };
        aggregation.records.extend(tab_records(tabs, active_tab_id.as_deref()));
    }
    if let Some(history) = collect(SourceName::History, history, &mut aggregation.failures) {
        // The limit is a cost cap, so hold sources to it even if they over-deliver
        aggregation
            .records
            .extend(history.into_iter().take(options.history_limit).map(history_record));
    }
    if let Some(bookmarks) = collect(SourceName::Bookmarks, bookmarks, &mut aggregation.failures) {
        aggregation.records.extend(bookmarks.into_iter().map(bookmark_record));
    }

    debug!(
        records = aggregation.records.len(),
        failed_sources = aggregation.failures.len(),
        "aggregated browser sources"
    );
    aggregation
}

fn join_fetch<T>(
    source_name: SourceName,
    handle: ScopedJoinHandle<'_, anyhow::Result<Vec<T>>>,
) -> anyhow::Result<Vec<T>> {
    handle.join().unwrap_or_else(|_| Err(anyhow!("{source_name} fetch panicked")))
}

fn collect<T>(
    source_name: SourceName,
    fetched: anyhow::Result<Vec<T>>,
    failures: &mut Vec<SearchError>,
) -> Option<Vec<T>> {
    match fetched {
        Ok(items) => Some(items),
        Err(e) => {
            warn!(source = %source_name, error = %format!("{e:#}"), "source fetch failed");
            failures.push(SearchError::SourceFetch { source_name, message: format!("{e:#}") });
            None
        }
    }
}

fn tab_records(tabs: Vec<OpenTab>, active_tab_id: Option<&str>) -> impl Iterator<Item = Record> {
    let active_tab_id = active_tab_id.map(str::to_owned);
    tabs.into_iter()
        .filter(move |tab| !tab.active && Some(tab.id.as_str()) != active_tab_id.as_deref())
        .map(|tab| {
            Record::new(RecordKind::Tab, tab.id, tab.title, tab.url, tab.last_accessed)
                .with_icon_ref(tab.fav_icon_url)
        })
}

fn history_record(item: HistoryItem) -> Record {
    Record::new(RecordKind::HistoryEntry, item.id, item.title, item.url, item.last_visit_time)
}

fn bookmark_record(item: BookmarkItem) -> Record {
    Record::new(RecordKind::Bookmark, item.id, item.title, item.url, item.date_added)
}
