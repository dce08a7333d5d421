use async_trait::async_trait;
use dnsdig_domain::{Domain, DomainError};
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

use super::lookup_cache::{LookupCache, LookupCacheStats, LookupKey};
use crate::ports::{DomainFilter, DomainRegistry};

/// Read-through cache decorator for a domain registry.
///
/// Found domains are cached under the key of the lookup that found them.
/// Misses are never cached, so a domain registered later is seen on the
/// next lookup. A successful insert primes both keys of the new domain.
///
/// Listing and searching always go to the inner registry.
///
/// Rows written by another process behind this cache are not observed
/// until the entry is evicted or expires.
pub struct CachedDomainRegistry {
    inner: Arc<dyn DomainRegistry>,
    cache: LookupCache<Domain>,
}

impl CachedDomainRegistry {
    pub fn new(inner: Arc<dyn DomainRegistry>, cache: LookupCache<Domain>) -> Self {
        Self { inner, cache }
    }

    pub fn cache_stats(&self) -> LookupCacheStats {
        self.cache.stats()
    }

    pub fn clear(&self) {
        self.cache.clear();
    }

    fn prime(&self, domain: &Domain) {
        self.cache.add(
            LookupKey::name_and_tld(&domain.name, domain.tld.id),
            domain.clone(),
        );
        self.cache.add(LookupKey::uuid(&domain.uuid), domain.clone());
    }

    async fn read_through<F>(&self, key: LookupKey, load: F) -> Result<Option<Domain>, DomainError>
    where
        F: std::future::Future<Output = Result<Option<Domain>, DomainError>>,
    {
        if let Some(domain) = self.cache.check(&key) {
            debug!(key = %key, "Registry cache HIT");
            return Ok(Some(domain));
        }

        let found = load.await?;
        if let Some(domain) = &found {
            self.cache.add(key, domain.clone());
        }
        Ok(found)
    }
}

#[async_trait]
impl DomainRegistry for CachedDomainRegistry {
    async fn find_by_name_and_tld(
        &self,
        name: &str,
        tld_id: i32,
    ) -> Result<Option<Domain>, DomainError> {
        self.read_through(
            LookupKey::name_and_tld(name, tld_id),
            self.inner.find_by_name_and_tld(name, tld_id),
        )
        .await
    }

    async fn find_by_uuid(&self, uuid: &Uuid) -> Result<Option<Domain>, DomainError> {
        self.read_through(LookupKey::uuid(uuid), self.inner.find_by_uuid(uuid))
            .await
    }

    async fn insert(&self, domain: &Domain) -> Result<(), DomainError> {
        self.inner.insert(domain).await?;
        self.prime(domain);
        Ok(())
    }

    async fn list(&self, limit: u32, offset: u32) -> Result<Vec<Domain>, DomainError> {
        self.inner.list(limit, offset).await
    }

    async fn search(
        &self,
        filter: &DomainFilter,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<Domain>, DomainError> {
        self.inner.search(filter, limit, offset).await
    }
}
