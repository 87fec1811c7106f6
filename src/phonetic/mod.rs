//! Phonetic keys for titles written in Chinese script.
//!
//! A title such as "谷歌翻译" is indexed as `guge fanyi` without separators
//! (`gugefanyi`) and by reading initials (`ggfy`), so it can be found by typing
//! pinyin on a Latin keyboard. Characters without a reading pass through unchanged,
//! which keeps mixed titles like "Rust 中文" searchable by both parts.

use pinyin::ToPinyin;
use rayon::prelude::*;
use tracing::warn;

use crate::error::SearchError;
use crate::models::Record;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhoneticKeys {
    pub full: String,
    pub initials: String,
}

impl PhoneticKeys {
    pub fn is_empty(&self) -> bool {
        self.full.is_empty() && self.initials.is_empty()
    }
}

/// Converts a title into its phonetic keys
pub trait Transliterator: Send + Sync {
    fn transliterate(&self, title: &str) -> Result<PhoneticKeys, SearchError>;
}

/// Toneless pinyin, one canonical reading per character
///
/// Heteronyms resolve to the first-listed reading, so the output never depends
/// on context or locale.
#[derive(Debug, Clone, Copy, Default)]
pub struct PinyinTransliterator;

impl Transliterator for PinyinTransliterator {
    fn transliterate(&self, title: &str) -> Result<PhoneticKeys, SearchError> {
        let mut keys = PhoneticKeys {
            full: String::with_capacity(title.len() * 2),
            initials: String::with_capacity(title.len()),
        };

        for ch in title.chars() {
            match ch.to_pinyin() {
                Some(reading) => {
                    keys.full.push_str(reading.plain());
                    keys.initials.push_str(reading.first_letter());
                }
                None => {
                    keys.full.push(ch);
                    keys.initials.push(ch);
                }
            }
        }

        Ok(keys)
    }
}

/// Derive phonetic keys, degrading to empty keys on failure
pub fn augment(transliterator: &dyn Transliterator, title: &str) -> PhoneticKeys {
    if title.is_empty() {
        return PhoneticKeys::default();
    }

    match transliterator.transliterate(title) {
        Ok(keys) => keys,
        Err(e) => {
            warn!(error = %e, "phonetic augmentation failed, leaving keys empty");
            PhoneticKeys::default()
        }
    }
}

/// Produce a new record carrying phonetic keys for its title
///
/// Records whose keys come back empty (empty title or failed derivation) are
/// returned without phonetic fields.
pub fn augment_record(transliterator: &dyn Transliterator, record: Record) -> Record {
    let keys = augment(transliterator, &record.title);
    if keys.is_empty() {
        return record.with_phonetics(None, None);
    }

    record.with_phonetics(Some(keys.full), Some(keys.initials))
}

/// Augment a batch of records in parallel, preserving order
pub fn augment_records(transliterator: &dyn Transliterator, records: Vec<Record>) -> Vec<Record> {
    records.into_par_iter().map(|record| augment_record(transliterator, record)).collect()
}
