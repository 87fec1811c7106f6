//! Single-slot cache for the most recently built index.
//!
//! The slot moves through `Empty -> Valid -> Stale`; a stale entry is treated
//! exactly like an empty slot. Entries are never edited: a rebuild produces a new
//! [`CacheEntry`] that replaces the old one in a single pointer swap, so a reader
//! holding the previous `Arc` keeps a complete entry.

use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::indexer::IndexSnapshot;
use crate::models::OpenTab;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CachePolicy {
    /// Lifetime of an entry whose fingerprint still matches
    pub long_ttl_ms: u64,
    /// Lifetime of an entry whose fingerprint no longer matches
    pub short_ttl_ms: u64,
    /// Characters of the tab fingerprint that are compared
    pub fingerprint_max_len: usize,
}

impl Default for CachePolicy {
    fn default() -> Self {
        Self { long_ttl_ms: 30_000, short_ttl_ms: 5_000, fingerprint_max_len: 100 }
    }
}

impl CachePolicy {
    pub fn long_ttl(&self) -> Duration {
        Duration::from_millis(self.long_ttl_ms)
    }

    pub fn short_ttl(&self) -> Duration {
        Duration::from_millis(self.short_ttl_ms)
    }
}

#[derive(Debug)]
pub struct CacheEntry {
    pub snapshot: Arc<IndexSnapshot>,
    pub built_at: Instant,
    pub source_fingerprint: String,
}

impl CacheEntry {
    pub fn new(snapshot: IndexSnapshot, source_fingerprint: String, built_at: Instant) -> Self {
        Self { snapshot: Arc::new(snapshot), built_at, source_fingerprint }
    }

    pub fn age_at(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.built_at)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheState {
    Empty,
    Valid,
    Stale,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissReason {
    ForcedRefresh,
    Empty,
    Expired,
    SourcesChanged,
}

#[derive(Debug, Clone)]
pub enum CacheLookup {
    Hit(Arc<CacheEntry>),
    Miss(MissReason),
}

impl CacheLookup {
    pub fn is_hit(&self) -> bool {
        matches!(self, Self::Hit(_))
    }
}

#[derive(Debug, Default)]
pub struct FreshnessCache {
    slot: RwLock<Option<Arc<CacheEntry>>>,
    policy: CachePolicy,
}

impl FreshnessCache {
    pub fn new(policy: CachePolicy) -> Self {
        Self { slot: RwLock::new(None), policy }
    }

    pub fn policy(&self) -> &CachePolicy {
        &self.policy
    }

    pub fn get(&self, force_refresh: bool, fingerprint: &str) -> CacheLookup {
        self.get_at(force_refresh, fingerprint, Instant::now())
    }

    /// Look up the slot as of `now`
    ///
    /// An entry is served when it is younger than the long TTL and either its
    /// fingerprint matches or it is still younger than the short TTL.
    pub fn get_at(&self, force_refresh: bool, fingerprint: &str, now: Instant) -> CacheLookup {
        if force_refresh {
            return CacheLookup::Miss(MissReason::ForcedRefresh);
        }

        let Some(entry) = self.current() else {
            return CacheLookup::Miss(MissReason::Empty);
        };

        let lookup = match self.classify(&entry, fingerprint, now) {
            None => CacheLookup::Hit(entry),
            Some(reason) => CacheLookup::Miss(reason),
        };
        debug!(hit = lookup.is_hit(), "cache lookup");
        lookup
    }

    pub fn state_at(&self, fingerprint: &str, now: Instant) -> CacheState {
        match self.current() {
            None => CacheState::Empty,
            Some(entry) if self.classify(&entry, fingerprint, now).is_none() => CacheState::Valid,
            Some(_) => CacheState::Stale,
        }
    }

    fn classify(&self, entry: &CacheEntry, fingerprint: &str, now: Instant) -> Option<MissReason> {
        let age = entry.age_at(now);
        if age >= self.policy.long_ttl() {
            return Some(MissReason::Expired);
        }
        if entry.source_fingerprint != fingerprint && age >= self.policy.short_ttl() {
            return Some(MissReason::SourcesChanged);
        }
        None
    }

    /// The entry currently in the slot, whatever its freshness
    pub fn current(&self) -> Option<Arc<CacheEntry>> {
        self.slot.read().clone()
    }

    /// Swap in a new entry; the lock is held only for the swap
    pub fn replace(&self, entry: CacheEntry) -> Arc<CacheEntry> {
        let entry = Arc::new(entry);
        *self.slot.write() = Some(Arc::clone(&entry));
        entry
    }

    pub fn invalidate(&self) {
        self.slot.write().take();
    }
}

/// Order-sensitive summary of the open tabs, truncated to `max_len` chars
///
/// A change detector, not a hash: edits past the truncation point go unnoticed
/// until the entry ages out.
pub fn fingerprint_tabs(tabs: &[OpenTab], max_len: usize) -> String {
    let joined = tabs
        .iter()
        .map(|tab| format!("{}-{}-{}", tab.id, tab.title, tab.url))
        .collect::<Vec<_>>()
        .join("|");

    match joined.char_indices().nth(max_len) {
        Some((cut, _)) => joined[..cut].to_string(),
        None => joined,
    }
}
