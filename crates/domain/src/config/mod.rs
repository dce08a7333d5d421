//! Configuration module for dnsdig
//!
//! This module contains all configuration structures organized by concern:
//! - `root`: Main configuration and CLI overrides
//! - `dispatcher`: Worker pool and admission queue sizing
//! - `resolver`: Upstream server and record types to dig
//! - `database`: Domain registry storage
//! - `cache`: Registry read-through cache bounds
//! - `logging`: Logging settings
//! - `errors`: Configuration errors

pub mod cache;
pub mod database;
pub mod dispatcher;
pub mod errors;
pub mod logging;
pub mod resolver;
pub mod root;

pub use cache::CacheConfig;
pub use database::DatabaseConfig;
pub use dispatcher::DispatcherConfig;
pub use errors::ConfigError;
pub use logging::{LogFormat, LoggingConfig};
pub use resolver::ResolverConfig;
pub use root::{CliOverrides, Config};
