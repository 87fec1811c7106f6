//! Approximate field scoring.
//!
//! A field is scored as a distance in `[0, 1]`, where 0 is a perfect match. Two
//! strategies run over the same pre-normalized text and the better one wins:
//!
//! - **Approximate substring**: the fewest edits (insert, delete, substitute) that
//!   turn some substring of the field into the query, divided by the query length.
//!   This absorbs typos like `gihtub` for `github`.
//! - **Ordered subsequence**: the query letters appear in order with gaps, scored
//!   by how much of the matched span is gap. This absorbs abbreviations like `gml`
//!   for `gmail`.
//!
//! Both add a location penalty, `match_start / location_distance`, so matches near
//! the start of a field rank ahead of matches buried in a long URL.

use nucleo_matcher::{Config, Matcher, Utf32Str};
use serde::{Deserialize, Serialize};

/// Share of the subsequence score attributed to gaps inside the matched span
const SUBSEQUENCE_GAP_WEIGHT: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SearchField {
    Title,
    Url,
    PhoneticFull,
    PhoneticInitials,
}

impl SearchField {
    /// Fields in priority order; earlier fields win ties
    pub const ALL: [SearchField; 4] =
        [Self::Title, Self::Url, Self::PhoneticFull, Self::PhoneticInitials];
}

/// Per-field weights; a field's score is divided by its weight, and a weight of
/// zero disables the field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldWeights {
    pub title: f64,
    pub url: f64,
    pub phonetic_full: f64,
    pub phonetic_initials: f64,
}

impl Default for FieldWeights {
    fn default() -> Self {
        Self { title: 1.0, url: 1.0, phonetic_full: 1.0, phonetic_initials: 1.0 }
    }
}

impl FieldWeights {
    pub fn for_field(&self, field: SearchField) -> f64 {
        match field {
            SearchField::Title => self.title,
            SearchField::Url => self.url,
            SearchField::PhoneticFull => self.phonetic_full,
            SearchField::PhoneticInitials => self.phonetic_initials,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FuzzyConfig {
    /// Highest score still counted as a match
    pub threshold: f64,
    /// Characters of offset that cost a full point of score; 0 disables the
    /// location penalty
    pub location_distance: usize,
    pub weights: FieldWeights,
}

impl Default for FuzzyConfig {
    fn default() -> Self {
        Self { threshold: 0.3, location_distance: 100, weights: FieldWeights::default() }
    }
}

/// Lower-case and split a string into chars for matching
pub fn normalize(text: &str) -> Vec<char> {
    text.to_lowercase().chars().collect()
}

/// Scores fields against one query, reusing buffers across calls
pub struct FieldScorer<'a> {
    query: Vec<char>,
    config: &'a FuzzyConfig,
    matcher: Matcher,
    indices: Vec<u32>,
    previous: Vec<usize>,
    current: Vec<usize>,
}

impl<'a> FieldScorer<'a> {
    pub fn new(query: &str, config: &'a FuzzyConfig) -> Self {
        let query = normalize(query.trim());
        let rows = query.len() + 1;
        Self {
            query,
            config,
            matcher: Matcher::new(Config::DEFAULT),
            indices: Vec::new(),
            previous: vec![0; rows],
            current: vec![0; rows],
        }
    }

    pub fn is_empty_query(&self) -> bool {
        self.query.is_empty()
    }

    /// Weighted score of a normalized field, or `None` if it is worse than the
    /// threshold
    pub fn score(&mut self, field: SearchField, haystack: &[char]) -> Option<f64> {
        let weight = self.config.weights.for_field(field);
        if weight <= 0.0 || haystack.is_empty() || self.query.is_empty() {
            return None;
        }

        let raw = self.raw_score(haystack);
        let weighted = (raw / weight).min(1.0);
        (weighted <= self.config.threshold).then_some(weighted)
    }

    /// Unweighted distance in `[0, 1]`
    pub fn raw_score(&mut self, haystack: &[char]) -> f64 {
        let edit = self.edit_score(haystack);
        match self.subsequence_score(haystack) {
            Some(subsequence) => edit.min(subsequence),
            None => edit,
        }
    }

    fn location_penalty(&self, start: usize) -> f64 {
        if self.config.location_distance == 0 {
            return 0.0;
        }
        start as f64 / self.config.location_distance as f64
    }

    /// Best approximate-substring score over every end position
    fn edit_score(&mut self, haystack: &[char]) -> f64 {
        let m = self.query.len();

        // previous[i]: edits to match query[..i] against a substring ending before
        // the current column; the substring may start anywhere for free.
        for (i, cell) in self.previous.iter_mut().enumerate() {
            *cell = i;
        }

        let mut best = 1.0_f64;
        for (j, &ch) in haystack.iter().enumerate() {
            self.current[0] = 0;
            for i in 1..=m {
                let substitution = self.previous[i - 1] + usize::from(self.query[i - 1] != ch);
                let deletion = self.previous[i] + 1;
                let insertion = self.current[i - 1] + 1;
                self.current[i] = substitution.min(deletion).min(insertion);
            }

            let errors = self.current[m];
            if errors < m {
                let start = (j + 1).saturating_sub(m);
                let score = errors as f64 / m as f64 + self.location_penalty(start);
                best = best.min(score);
            }
            std::mem::swap(&mut self.previous, &mut self.current);
        }

        best.min(1.0)
    }

    fn subsequence_score(&mut self, haystack: &[char]) -> Option<f64> {
        self.indices.clear();
        self.matcher.fuzzy_indices(
            Utf32Str::Unicode(haystack),
            Utf32Str::Unicode(&self.query),
            &mut self.indices,
        )?;

        let first = *self.indices.iter().min()? as usize;
        let last = *self.indices.iter().max()? as usize;
        let span = last - first + 1;
        let gaps = span.saturating_sub(self.query.len());

        let score = SUBSEQUENCE_GAP_WEIGHT * gaps as f64 / span as f64
            + self.location_penalty(first);
        Some(score.min(1.0))
    }
}
