use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Bounds for the registry read-through cache.
///
/// The cache is a best-effort accelerator: rows written by another process
/// are not seen until the cached entry is evicted or expires.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    /// Set to false to hit the database on every lookup
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Maximum number of cached lookups (default: 10000)
    #[serde(default = "default_capacity")]
    pub capacity: usize,

    /// Entry lifetime in seconds; no expiry when absent
    #[serde(default)]
    pub ttl_secs: Option<u64>,
}

impl CacheConfig {
    pub fn ttl(&self) -> Option<Duration> {
        self.ttl_secs.map(Duration::from_secs)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            capacity: default_capacity(),
            ttl_secs: None,
        }
    }
}

fn default_enabled() -> bool {
    true
}

fn default_capacity() -> usize {
    10_000
}
