//! Query entry point tying sources, index, ranking, and cache together.
//!
//! Each query first fingerprints the open tabs and asks the [`FreshnessCache`] for
//! a snapshot. On a miss the engine aggregates the sources, adds phonetic keys,
//! builds a new snapshot, and swaps it into the cache. The query itself always
//! runs live against whichever snapshot was obtained.

use std::sync::Arc;
use std::time::Instant;

use tracing::{error, info, warn};

use crate::cache::{CacheEntry, CacheLookup, FreshnessCache, fingerprint_tabs};
use crate::config::EngineConfig;
use crate::error::{Result, SearchError};
use crate::index_storage::{decode_snapshot, encode_snapshot};
use crate::indexer::{IndexSnapshot, build_index, search};
use crate::models::{OpenTab, Record};
use crate::phonetic::{PinyinTransliterator, Transliterator, augment_records};
use crate::ranker::{rank_matches, rank_recent};
use crate::sources::{BrowserSources, aggregate_with_tabs};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryRequest {
    pub text: String,
    /// Result cap; `None` uses the configured default for the query's path
    pub max_results: Option<usize>,
    pub force_refresh: bool,
}

impl QueryRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into(), ..Self::default() }
    }

    pub fn max_results(mut self, max_results: usize) -> Self {
        self.max_results = Some(max_results);
        self
    }

    pub fn force_refresh(mut self, force_refresh: bool) -> Self {
        self.force_refresh = force_refresh;
        self
    }

    pub fn is_recent(&self) -> bool {
        self.text.trim().is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryOutcome {
    pub records: Vec<Record>,
    /// Whether the snapshot came from the cache rather than a rebuild
    pub from_cache: bool,
}

/// Evaluate a query against a snapshot
///
/// Pure: works the same on a snapshot held by the cache or one decoded from a
/// blob in another process.
pub fn answer(snapshot: &IndexSnapshot, request: &QueryRequest, config: &EngineConfig) -> Vec<Record> {
    if request.is_recent() {
        let max_results = request.max_results.unwrap_or(config.recent_limit);
        return rank_recent(snapshot.records(), max_results, config.recent_backfill_history);
    }

    let max_results = request.max_results.unwrap_or(config.search_limit);
    let hits = search(snapshot, &request.text, &config.fuzzy);
    rank_matches(hits.iter().map(|hit| hit.record), max_results)
}

pub struct SearchEngine<S> {
    sources: S,
    cache: Arc<FreshnessCache>,
    config: EngineConfig,
    transliterator: Box<dyn Transliterator>,
}

impl<S: BrowserSources> SearchEngine<S> {
    /// Engine sharing `cache` with other engines
    ///
    /// Fails with [`SearchError::InvalidConfig`] when `config` does not validate.
    pub fn new(sources: S, cache: Arc<FreshnessCache>, config: EngineConfig) -> Result<Self> {
        config.validate().map_err(|e| SearchError::InvalidConfig(format!("{e:#}")))?;
        Ok(Self { sources, cache, config, transliterator: Box::new(PinyinTransliterator) })
    }

    /// Engine with its own cache using the configured policy
    pub fn with_config(sources: S, config: EngineConfig) -> Result<Self> {
        let cache = Arc::new(FreshnessCache::new(config.cache.clone()));
        Self::new(sources, cache, config)
    }

    pub fn with_transliterator(mut self, transliterator: impl Transliterator + 'static) -> Self {
        self.transliterator = Box::new(transliterator);
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn cache(&self) -> &FreshnessCache {
        &self.cache
    }

    pub fn sources(&self) -> &S {
        &self.sources
    }

    /// Run a query with an explicit result cap
    pub fn query(&self, text: &str, max_results: usize, force_refresh: bool) -> Result<Vec<Record>> {
        let request =
            QueryRequest::new(text).max_results(max_results).force_refresh(force_refresh);
        Ok(self.search(&request)?.records)
    }

    pub fn search(&self, request: &QueryRequest) -> Result<QueryOutcome> {
        let (snapshot, from_cache) = self.snapshot(request.force_refresh)?;
        let records = answer(&snapshot, request, &self.config);
        Ok(QueryOutcome { records, from_cache })
    }

    /// Like [`Self::search`], but logs failures and returns no results
    pub fn query_or_empty(&self, request: &QueryRequest) -> Vec<Record> {
        match self.search(request) {
            Ok(outcome) => outcome.records,
            Err(e) => {
                error!(error = %e, "query failed");
                Vec::new()
            }
        }
    }

    /// Current snapshot, rebuilding when the cache cannot serve one
    ///
    /// The flag reports whether the snapshot came from the cache. The open tabs
    /// are fetched once and serve both the fingerprint and a rebuild.
    pub fn snapshot(&self, force_refresh: bool) -> Result<(Arc<IndexSnapshot>, bool)> {
        let tabs = self.sources.open_tabs();
        let fingerprint = self.fingerprint(&tabs);
        match self.cache.get(force_refresh, &fingerprint) {
            CacheLookup::Hit(entry) => Ok((Arc::clone(&entry.snapshot), true)),
            CacheLookup::Miss(reason) => {
                info!(?reason, "rebuilding search index");
                let entry = self.rebuild(fingerprint, tabs)?;
                Ok((Arc::clone(&entry.snapshot), false))
            }
        }
    }

    /// Encode the current snapshot as an opaque blob
    pub fn export_snapshot(&self, force_refresh: bool) -> Result<Vec<u8>> {
        let (snapshot, _) = self.snapshot(force_refresh)?;
        encode_snapshot(&snapshot)
    }

    /// Install a snapshot blob into the cache as if it had just been built
    ///
    /// A blob that fails to decode empties the cache slot.
    pub fn import_snapshot(&self, bytes: &[u8]) -> Result<Arc<IndexSnapshot>> {
        let snapshot = decode_snapshot(bytes).inspect_err(|e| {
            warn!(error = %e, "discarding unreadable snapshot");
            self.cache.invalidate();
        })?;

        let fingerprint = self.fingerprint(&self.sources.open_tabs());
        let entry = self.cache.replace(CacheEntry::new(snapshot, fingerprint, Instant::now()));
        Ok(Arc::clone(&entry.snapshot))
    }

    fn fingerprint(&self, tabs: &anyhow::Result<Vec<OpenTab>>) -> String {
        match tabs {
            Ok(tabs) => fingerprint_tabs(tabs, self.cache.policy().fingerprint_max_len),
            Err(e) => {
                warn!(error = %format!("{e:#}"), "could not fingerprint tabs");
                String::new()
            }
        }
    }

    fn rebuild(
        &self,
        fingerprint: String,
        tabs: anyhow::Result<Vec<OpenTab>>,
    ) -> Result<Arc<CacheEntry>> {
        let started = Instant::now();
        let aggregation =
            aggregate_with_tabs(&self.sources, &self.config.aggregate_options(), tabs);
        let failed_sources = aggregation.failures.len();
        let records = augment_records(self.transliterator.as_ref(), aggregation.records);

        let snapshot = build_index(records).inspect_err(|_| self.cache.invalidate())?;
        info!(
            records = snapshot.len(),
            failed_sources,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "search index rebuilt"
        );

        Ok(self.cache.replace(CacheEntry::new(snapshot, fingerprint, Instant::now())))
    }
}
