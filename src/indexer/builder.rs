//! Index builder for augmented records.
//!
//! The snapshot stores every record together with its searchable fields already
//! lower-cased and split into chars, so repeated queries only run the matchers.
//! It is plain data and can be encoded into a blob (see `index_storage`) and
//! searched on the other side without touching the raw sources again.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::fuzzy::{SearchField, normalize};
use crate::error::{Result, SearchError};
use crate::models::{Record, RecordKind};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldKey {
    pub field: SearchField,
    pub chars: Vec<char>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexedRecord {
    pub record: Record,
    /// Non-empty searchable fields in priority order
    pub fields: Vec<FieldKey>,
}

/// Immutable fuzzy index over a fixed record set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexSnapshot {
    entries: Vec<IndexedRecord>,
    built_at: DateTime<Utc>,
}

impl IndexSnapshot {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn built_at(&self) -> DateTime<Utc> {
        self.built_at
    }

    pub fn entries(&self) -> &[IndexedRecord] {
        &self.entries
    }

    pub fn records(&self) -> impl Iterator<Item = &Record> {
        self.entries.iter().map(|entry| &entry.record)
    }

    pub fn count_kind(&self, kind: RecordKind) -> usize {
        self.records().filter(|record| record.kind == kind).count()
    }
}

fn field_text(record: &Record, field: SearchField) -> Option<&str> {
    match field {
        SearchField::Title => Some(record.title.as_str()),
        SearchField::Url => Some(record.url.as_str()),
        SearchField::PhoneticFull => record.phonetic_full.as_deref(),
        SearchField::PhoneticInitials => record.phonetic_initials.as_deref(),
    }
}

fn index_record(record: Record) -> IndexedRecord {
    let fields = SearchField::ALL
        .iter()
        .filter_map(|&field| {
            let text = field_text(&record, field)?;
            if text.is_empty() {
                return None;
            }
            Some(FieldKey { field, chars: normalize(text) })
        })
        .collect();

    IndexedRecord { record, fields }
}

/// Build a snapshot over the given records
///
/// Records are kept in the given order, which is also the tie-break order of
/// equal-scoring search hits.
///
/// # Errors
///
/// Returns [`SearchError::IndexBuild`] if two records share a kind and id.
pub fn build_index(records: Vec<Record>) -> Result<IndexSnapshot> {
    let mut seen = HashSet::with_capacity(records.len());
    for record in &records {
        if !seen.insert(record.identity()) {
            return Err(SearchError::IndexBuild(format!(
                "duplicate {} id {:?}",
                record.kind, record.id
            )));
        }
    }

    let entries: Vec<IndexedRecord> = records.into_iter().map(index_record).collect();
    let indexed_fields: usize = entries.iter().map(|entry| entry.fields.len()).sum();
    debug!(records = entries.len(), fields = indexed_fields, "built search index");

    Ok(IndexSnapshot { entries, built_at: Utc::now() })
}
