use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordKind {
    Tab,
    HistoryEntry,
    Bookmark,
}

impl RecordKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Tab => "tab",
            Self::HistoryEntry => "history",
            Self::Bookmark => "bookmark",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Stable identity of a record: ids are only unique within a kind
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecordKey {
    pub kind: RecordKind,
    pub id: String,
}

/// A normalized tab, history entry, or bookmark
///
/// `recency` holds whichever timestamp the source provides (last access, last
/// visit, or date added). A missing value sorts after every present one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub kind: RecordKind,
    pub id: String,
    pub title: String,
    pub url: String,
    pub recency: Option<DateTime<Utc>>,
    pub icon_ref: Option<String>,
    pub phonetic_full: Option<String>,
    pub phonetic_initials: Option<String>,
}

impl Record {
    pub fn new(
        kind: RecordKind,
        id: impl Into<String>,
        title: impl Into<String>,
        url: impl Into<String>,
        recency: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            kind,
            id: id.into(),
            title: title.into(),
            url: url.into(),
            recency,
            icon_ref: None,
            phonetic_full: None,
            phonetic_initials: None,
        }
    }

    pub fn with_icon_ref(self, icon_ref: Option<String>) -> Self {
        Self { icon_ref, ..self }
    }

    /// Return a copy carrying the given phonetic keys
    pub fn with_phonetics(self, full: Option<String>, initials: Option<String>) -> Self {
        Self { phonetic_full: full, phonetic_initials: initials, ..self }
    }

    pub fn identity(&self) -> RecordKey {
        RecordKey { kind: self.kind, id: self.id.clone() }
    }

    /// Key used to collapse duplicates in search results: the title, or the URL
    /// when the title is empty
    pub fn display_key(&self) -> &str {
        if self.title.is_empty() { &self.url } else { &self.title }
    }

    pub fn is_bookmark(&self) -> bool {
        self.kind == RecordKind::Bookmark
    }
}
