use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use crate::cache::CachePolicy;
use crate::indexer::FuzzyConfig;
use crate::sources::AggregateOptions;

pub const CONFIG_FILENAME: &str = "config.json";

/// Engine tuning; every field has a default so a config file may set any subset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub fuzzy: FuzzyConfig,
    pub cache: CachePolicy,
    /// History entries requested for a normal index build
    pub history_limit: usize,
    /// History entries requested when `broad_history` is set
    pub broad_history_limit: usize,
    pub broad_history: bool,
    /// Default cap for the empty-query shortlist
    pub recent_limit: usize,
    /// Default cap for fuzzy search results
    pub search_limit: usize,
    /// Top up the empty-query shortlist with recent history
    pub recent_backfill_history: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            fuzzy: FuzzyConfig::default(),
            cache: CachePolicy::default(),
            history_limit: 1000,
            broad_history_limit: 2000,
            broad_history: false,
            recent_limit: 6,
            search_limit: 50,
            recent_backfill_history: true,
        }
    }
}

impl EngineConfig {
    /// Load and validate a JSON config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load `config.json` from `dir` if present, otherwise use defaults
    pub fn load_from_dir(dir: &Path) -> Result<Self> {
        let path = dir.join(CONFIG_FILENAME);
        if path.exists() { Self::load(&path) } else { Ok(Self::default()) }
    }

    pub fn validate(&self) -> Result<()> {
        let threshold = self.fuzzy.threshold;
        if !(0.0..=1.0).contains(&threshold) {
            bail!("fuzzy.threshold must be between 0 and 1, got {}", threshold);
        }

        let weights = &self.fuzzy.weights;
        for (name, weight) in [
            ("title", weights.title),
            ("url", weights.url),
            ("phonetic_full", weights.phonetic_full),
            ("phonetic_initials", weights.phonetic_initials),
        ] {
            if !weight.is_finite() || weight < 0.0 {
                bail!("fuzzy.weights.{} must be a non-negative number, got {}", name, weight);
            }
        }

        if self.cache.short_ttl_ms > self.cache.long_ttl_ms {
            bail!(
                "cache.short_ttl_ms ({}) must not exceed cache.long_ttl_ms ({})",
                self.cache.short_ttl_ms,
                self.cache.long_ttl_ms
            );
        }

        for (name, value) in [
            ("history_limit", self.history_limit),
            ("broad_history_limit", self.broad_history_limit),
            ("recent_limit", self.recent_limit),
            ("search_limit", self.search_limit),
        ] {
            if value == 0 {
                bail!("{} must be greater than zero", name);
            }
        }

        Ok(())
    }

    pub fn aggregate_options(&self) -> AggregateOptions {
        let history_limit =
            if self.broad_history { self.broad_history_limit } else { self.history_limit };
        AggregateOptions { history_limit }
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.fuzzy.threshold, 0.3);
        assert_eq!(config.cache.long_ttl_ms, 30_000);
        assert_eq!(config.cache.short_ttl_ms, 5_000);
        assert_eq!(config.recent_limit, 6);
        assert_eq!(config.aggregate_options().history_limit, 1000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_broad_history_limit() {
        let config = EngineConfig { broad_history: true, ..EngineConfig::default() };
        assert_eq!(config.aggregate_options().history_limit, 2000);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILENAME),
            r#"{"fuzzy": {"threshold": 0.2}, "broad_history": true}"#,
        )
        .unwrap();

        let config = EngineConfig::load_from_dir(dir.path()).unwrap();
        assert_eq!(config.fuzzy.threshold, 0.2);
        assert_eq!(config.fuzzy.location_distance, 100);
        assert_eq!(config.fuzzy.weights.title, 1.0);
        assert!(config.broad_history);
        assert_eq!(config.search_limit, 50);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        assert_eq!(EngineConfig::load_from_dir(dir.path()).unwrap(), EngineConfig::default());
    }

    #[test]
    fn test_invalid_threshold_rejected() {
        let config = EngineConfig {
            fuzzy: FuzzyConfig { threshold: 1.5, ..FuzzyConfig::default() },
            ..EngineConfig::default()
        };
        assert!(config.validate().unwrap_err().to_string().contains("fuzzy.threshold"));
    }

    #[test]
    fn test_short_ttl_longer_than_long_ttl_rejected() {
        let config = EngineConfig {
            cache: CachePolicy { short_ttl_ms: 60_000, ..CachePolicy::default() },
            ..EngineConfig::default()
        };
        assert!(config.validate().unwrap_err().to_string().contains("short_ttl_ms"));
    }

    #[test]
    fn test_zero_limit_rejected() {
        let config = EngineConfig { recent_limit: 0, ..EngineConfig::default() };
        assert!(config.validate().unwrap_err().to_string().contains("recent_limit"));
    }

    #[test]
    fn test_malformed_file_has_context() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), "{not json").unwrap();
        let err = EngineConfig::load_from_dir(dir.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }
}
