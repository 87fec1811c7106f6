//! Result ordering and deduplication.
//!
//! Two paths:
//! - **Recent** (empty query): open tabs by recency, optionally topped up with
//!   recent history whose URL is not already listed.
//! - **Matched** (non-empty query): fuzzy hits deduplicated by display key, tabs and
//!   history ordered by recency, bookmarks appended after them whatever their score.
//!
//! Truncation always happens after ordering.

use std::collections::HashSet;

use crate::models::{Record, RecordKind};

fn by_recency_desc(a: &&Record, b: &&Record) -> std::cmp::Ordering {
    // None < Some, so reversing puts missing timestamps last
    b.recency.cmp(&a.recency)
}

/// Recently used shortlist for an empty query
pub fn rank_recent<'a>(
    records: impl IntoIterator<Item = &'a Record>,
    max_results: usize,
    backfill_history: bool,
) -> Vec<Record> {
    let mut tabs = Vec::new();
    let mut history = Vec::new();
    for record in records {
        match record.kind {
            RecordKind::Tab => tabs.push(record),
            RecordKind::HistoryEntry if backfill_history => history.push(record),
            _ => {}
        }
    }

    tabs.sort_by(by_recency_desc);
    tabs.truncate(max_results);

    let mut seen_urls: HashSet<&str> = tabs.iter().map(|&record| record.url.as_str()).collect();
    let mut ranked: Vec<Record> = tabs.into_iter().cloned().collect();

    if ranked.len() < max_results && !history.is_empty() {
        history.sort_by(by_recency_desc);
        for record in history {
            if ranked.len() >= max_results {
                break;
            }
            if seen_urls.insert(record.url.as_str()) {
                ranked.push(record.clone());
            }
        }
    }

    ranked
}

/// Order fuzzy matches, given in match order (best first)
pub fn rank_matches<'a>(
    matches: impl IntoIterator<Item = &'a Record>,
    max_results: usize,
) -> Vec<Record> {
    let mut seen_keys: HashSet<&str> = HashSet::new();
    let mut recent_activity = Vec::new();
    let mut bookmarks = Vec::new();

    for record in matches {
        if !seen_keys.insert(record.display_key()) {
            continue;
        }
        if record.is_bookmark() {
            bookmarks.push(record);
        } else {
            recent_activity.push(record);
        }
    }

    // Stable: equal timestamps keep match order
    recent_activity.sort_by(by_recency_desc);

    recent_activity.into_iter().chain(bookmarks).take(max_results).cloned().collect()
}

/// Rank records for a query; `None` or a blank query selects the recent path,
/// anything else treats `records` as matches in match order
pub fn rank<'a>(
    records: impl IntoIterator<Item = &'a Record>,
    active_query: Option<&str>,
    max_results: usize,
    backfill_history: bool,
) -> Vec<Record> {
    match active_query.map(str::trim).filter(|query| !query.is_empty()) {
        None => rank_recent(records, max_results, backfill_history),
        Some(_) => rank_matches(records, max_results),
    }
}
