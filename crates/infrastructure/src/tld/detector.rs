use async_trait::async_trait;
use dnsdig_application::ports::{DetectedDomain, TldDetector, TldRepository};
use dnsdig_domain::{Domain, DomainError, Tld};
use std::sync::Arc;
use tracing::{debug, info, instrument};

use super::suffix_trie::SuffixTrie;

/// Suffixes seeded into an empty TLD table.
pub const DEFAULT_SUFFIXES: &[&str] = &[
    "com", "net", "org", "info", "biz", "io", "dev", "app", "xyz", "me", "tv", "co", "ai",
    "edu", "gov", "mil", "int", "uk", "co.uk", "org.uk", "ac.uk", "gov.uk", "ltd.uk",
    "plc.uk", "me.uk", "de", "fr", "nl", "be", "es", "it", "ch", "at", "se", "no", "dk",
    "fi", "pl", "cz", "ie", "pt", "ru", "eu", "us", "ca", "au", "com.au", "net.au",
    "org.au", "nz", "co.nz", "jp", "co.jp", "cn", "com.cn", "in", "co.in", "br", "com.br",
    "mx", "com.mx", "za", "co.za",
];

/// TLD detector over an in-memory suffix trie.
///
/// The registrable name is the label immediately left of the longest
/// matching suffix: `ns1.google.co.uk` gives `google` under `co.uk`.
pub struct SuffixTldDetector {
    trie: SuffixTrie,
}

impl SuffixTldDetector {
    pub fn new<I>(tlds: I) -> Self
    where
        I: IntoIterator<Item = Tld>,
    {
        let mut trie = SuffixTrie::new();
        for tld in tlds {
            trie.insert(Arc::new(tld));
        }
        Self { trie }
    }

    /// Loads every suffix stored in the TLD table.
    pub async fn from_repository(repo: &dyn TldRepository) -> Result<Self, DomainError> {
        let tlds = repo.get_all().await?;
        let detector = Self::new(tlds);
        info!(suffixes = detector.len(), "TLD detector loaded");
        Ok(detector)
    }

    pub fn len(&self) -> usize {
        self.trie.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trie.is_empty()
    }
}

#[async_trait]
impl TldDetector for SuffixTldDetector {
    #[instrument(skip(self))]
    async fn detect(&self, query: &str) -> Result<DetectedDomain, DomainError> {
        let query = query.trim_end_matches('.').to_ascii_lowercase();

        let found = self
            .trie
            .longest_match(&query)
            .ok_or_else(|| DomainError::DetectionFailed(format!("no known suffix in '{}'", query)))?;

        let name = found
            .registrable()
            .filter(|label| Domain::validate_name(label).is_ok())
            .ok_or_else(|| {
                DomainError::DetectionFailed(format!("no valid name before suffix in '{}'", query))
            })?;

        debug!(name = %name, tld = %found.tld.name, "TLD detected");
        Ok(DetectedDomain::new(name, found.tld.clone()))
    }
}
