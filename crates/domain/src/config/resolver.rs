use crate::RecordType;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Upstream DNS settings used by every worker's resolver
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ResolverConfig {
    /// Recursive resolver to query (default: "8.8.8.8:53")
    #[serde(default = "default_upstream")]
    pub upstream: String,

    /// Per-query timeout in milliseconds (default: 2000)
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Record types dug for each domain
    #[serde(default = "RecordType::default_dig_set")]
    pub record_types: Vec<RecordType>,
}

impl ResolverConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            upstream: default_upstream(),
            timeout_ms: default_timeout_ms(),
            record_types: RecordType::default_dig_set(),
        }
    }
}

fn default_upstream() -> String {
    "8.8.8.8:53".to_string()
}

fn default_timeout_ms() -> u64 {
    2000
}
