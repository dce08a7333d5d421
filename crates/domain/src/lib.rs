//! dnsdig Domain Layer
pub mod config;
pub mod dns_record;
pub mod domain;
pub mod errors;
pub mod tld;

pub use config::{CliOverrides, Config, ConfigError, LogFormat};
pub use dns_record::{DnsRecord, RecordType};
pub use domain::Domain;
pub use errors::DomainError;
pub use tld::Tld;
