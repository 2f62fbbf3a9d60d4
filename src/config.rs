use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use std::path::Path;
use std::time::Duration;

/// Browse engine configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct BrowseConfig {
    /// Maximum number of directories whose listings are cached at once.
    /// The least recently used listing is evicted beyond this bound.
    #[serde(default = "default_cache_capacity")]
    pub cache_capacity: usize,

    /// Seconds a cached listing stays valid after it was built
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,

    /// Directories with more entries than this are listed in path order
    /// with no up-front stat. Metadata is then only fetched for entries
    /// actually returned in a page.
    #[serde(default = "default_eager_stat_limit")]
    pub eager_stat_limit: usize,
}

fn default_cache_capacity() -> usize {
    256
}

fn default_cache_ttl_secs() -> u64 {
    5 * 60
}

fn default_eager_stat_limit() -> usize {
    10_000
}

impl Default for BrowseConfig {
    fn default() -> Self {
        Self {
            cache_capacity: default_cache_capacity(),
            cache_ttl_secs: default_cache_ttl_secs(),
            eager_stat_limit: default_eager_stat_limit(),
        }
    }
}

impl BrowseConfig {
    /// Load configuration from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::IoError(e.to_string()))?;

        let config: BrowseConfig =
            serde_json::from_str(&contents).map_err(|e| ConfigError::ParseError(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cache_capacity == 0 {
            return Err(ConfigError::ValidationError(
                "cache_capacity must be greater than 0".to_string(),
            ));
        }

        if self.cache_ttl_secs == 0 {
            return Err(ConfigError::ValidationError(
                "cache_ttl_secs must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Cache capacity as the non-zero size the LRU requires.
    /// A zero capacity (rejected by `validate`) falls back to the default.
    pub fn capacity(&self) -> NonZeroUsize {
        NonZeroUsize::new(self.cache_capacity)
            .or_else(|| NonZeroUsize::new(default_cache_capacity()))
            .unwrap_or(NonZeroUsize::MIN)
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }
}

/// Configuration errors
#[derive(Debug)]
pub enum ConfigError {
    IoError(String),
    ParseError(String),
    ValidationError(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(msg) => write!(f, "IO error: {msg}"),
            ConfigError::ParseError(msg) => write!(f, "Parse error: {msg}"),
            ConfigError::ValidationError(msg) => write!(f, "Validation error: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}
