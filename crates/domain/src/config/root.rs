use super::{
    CacheConfig, ConfigError, DatabaseConfig, DispatcherConfig, LogFormat, LoggingConfig,
    ResolverConfig,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;

const DEFAULT_CONFIG_PATH: &str = "./dnsdig.toml";

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub dispatcher: DispatcherConfig,

    #[serde(default)]
    pub resolver: ResolverConfig,

    #[serde(default)]
    pub database: DatabaseConfig,

    #[serde(default)]
    pub cache: CacheConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Values given on the command line. They win over the config file.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub workers: Option<usize>,
    pub queue_capacity: Option<usize>,
    pub upstream: Option<String>,
    pub timeout_ms: Option<u64>,
    pub database_path: Option<String>,
    pub log_level: Option<String>,
    pub log_format: Option<LogFormat>,
}

impl Config {
    /// Load configuration from `config_path`, or from `./dnsdig.toml` when it
    /// exists, then apply CLI overrides.
    pub fn load(config_path: Option<&str>, overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = match config_path {
            Some(path) => Self::from_file(path)?,
            None if Path::new(DEFAULT_CONFIG_PATH).exists() => {
                Self::from_file(DEFAULT_CONFIG_PATH)?
            }
            None => Self::default(),
        };

        config.apply_overrides(overrides);
        Ok(config)
    }

    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_string(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn apply_overrides(&mut self, overrides: CliOverrides) {
        if let Some(workers) = overrides.workers {
            self.dispatcher.workers = workers;
        }
        if let Some(capacity) = overrides.queue_capacity {
            self.dispatcher.queue_capacity = Some(capacity);
        }
        if let Some(upstream) = overrides.upstream {
            self.resolver.upstream = upstream;
        }
        if let Some(timeout_ms) = overrides.timeout_ms {
            self.resolver.timeout_ms = timeout_ms;
        }
        if let Some(path) = overrides.database_path {
            self.database.path = path;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
        if let Some(format) = overrides.log_format {
            self.logging.format = format;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.dispatcher.workers == 0 {
            return Err(ConfigError::Validation(
                "dispatcher.workers must be at least 1".to_string(),
            ));
        }
        if self.dispatcher.queue_capacity == Some(0) {
            return Err(ConfigError::Validation(
                "dispatcher.queue_capacity must be at least 1".to_string(),
            ));
        }
        if self.resolver.upstream.parse::<SocketAddr>().is_err() {
            return Err(ConfigError::Validation(format!(
                "resolver.upstream '{}' is not a socket address (ip:port)",
                self.resolver.upstream
            )));
        }
        if self.resolver.timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "resolver.timeout_ms must be greater than 0".to_string(),
            ));
        }
        if self.resolver.record_types.is_empty() {
            return Err(ConfigError::Validation(
                "resolver.record_types cannot be empty".to_string(),
            ));
        }
        if self.logging.targets.keys().any(|t| t.trim().is_empty()) {
            return Err(ConfigError::Validation(
                "logging.targets cannot contain an empty target".to_string(),
            ));
        }
        if self.cache.capacity == 0 {
            return Err(ConfigError::Validation(
                "cache.capacity must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
