use super::builder::IndexSnapshot;
use super::fuzzy::{FieldScorer, FuzzyConfig, SearchField};
use crate::models::Record;

/// A record matched by a query, borrowed from the snapshot
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchHit<'a> {
    pub record: &'a Record,
    /// Best weighted distance across fields, 0 being a perfect match
    pub score: f64,
    /// Field that produced the best score
    pub field: SearchField,
}

/// Run a fuzzy query against a snapshot
///
/// Each record appears at most once, with its best score across fields. Hits are
/// ordered by score; equal scores keep index order. An empty query yields no hits.
pub fn search<'a>(snapshot: &'a IndexSnapshot, query: &str, config: &FuzzyConfig) -> Vec<SearchHit<'a>> {
    let mut scorer = FieldScorer::new(query, config);
    if scorer.is_empty_query() {
        return Vec::new();
    }

    let mut hits: Vec<SearchHit<'a>> = snapshot
        .entries()
        .iter()
        .filter_map(|entry| {
            let mut best: Option<(f64, SearchField)> = None;
            for key in &entry.fields {
                let Some(score) = scorer.score(key.field, &key.chars) else {
                    continue;
                };
                if best.is_none_or(|(best_score, _)| score < best_score) {
                    best = Some((score, key.field));
                }
            }
            best.map(|(score, field)| SearchHit { record: &entry.record, score, field })
        })
        .collect();

    hits.sort_by(|a, b| a.score.total_cmp(&b.score));
    hits
}
