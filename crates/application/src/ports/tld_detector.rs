use async_trait::async_trait;
use dnsdig_domain::{DomainError, Tld};
use std::sync::Arc;

/// Registrable name and suffix split out of a query string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectedDomain {
    pub name: Arc<str>,
    pub tld: Arc<Tld>,
}

impl DetectedDomain {
    pub fn new(name: impl Into<Arc<str>>, tld: Arc<Tld>) -> Self {
        Self {
            name: name.into(),
            tld,
        }
    }
}

#[async_trait]
pub trait TldDetector: Send + Sync {
    /// Splits `ns1.google.co.uk` into `google` and the `co.uk` TLD.
    ///
    /// Fails with `DomainError::DetectionFailed` when no known suffix ends
    /// the query or nothing precedes the suffix.
    async fn detect(&self, query: &str) -> Result<DetectedDomain, DomainError>;
}
