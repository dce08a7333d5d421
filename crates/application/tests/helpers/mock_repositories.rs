#![allow(dead_code)]

use async_trait::async_trait;
use dnsdig_application::ports::{
    DetectedDomain, DomainFilter, DomainRegistry, ResolverClient, ResolverFactory, TldDetector,
};
use dnsdig_domain::{DnsRecord, Domain, DomainError, RecordType, Tld};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use uuid::Uuid;

pub fn make_tld(id: i32, name: &str) -> Arc<Tld> {
    Arc::new(Tld::new(id, name))
}

pub fn make_domain(name: &str, tld: &Arc<Tld>) -> Domain {
    Domain::new(name, tld.clone())
}

pub fn a_record(owner: &str, ip: &str) -> DnsRecord {
    DnsRecord::new(owner, RecordType::A, 300, ip)
}

// ============================================================================
// Mock DomainRegistry
// ============================================================================

#[derive(Clone)]
pub struct MockDomainRegistry {
    domains: Arc<RwLock<HashMap<Uuid, Domain>>>,
    should_fail_lookup: Arc<RwLock<bool>>,
    should_fail_insert: Arc<RwLock<bool>>,
    insert_delay: Arc<RwLock<Option<Duration>>>,
    lookup_delay: Arc<RwLock<Option<Duration>>>,
    last_page: Arc<RwLock<Option<(u32, u32)>>>,
    lookup_count: Arc<AtomicU64>,
    insert_count: Arc<AtomicU64>,
    search_count: Arc<AtomicU64>,
}

impl MockDomainRegistry {
    pub fn new() -> Self {
        Self {
            domains: Arc::new(RwLock::new(HashMap::new())),
            should_fail_lookup: Arc::new(RwLock::new(false)),
            should_fail_insert: Arc::new(RwLock::new(false)),
            insert_delay: Arc::new(RwLock::new(None)),
            lookup_delay: Arc::new(RwLock::new(None)),
            last_page: Arc::new(RwLock::new(None)),
            lookup_count: Arc::new(AtomicU64::new(0)),
            insert_count: Arc::new(AtomicU64::new(0)),
            search_count: Arc::new(AtomicU64::new(0)),
        }
    }

    pub async fn with_domains(domains: Vec<Domain>) -> Self {
        let registry = Self::new();
        {
            let mut map = registry.domains.write().await;
            for domain in domains {
                map.insert(domain.uuid, domain);
            }
        }
        registry
    }

    pub async fn set_should_fail_lookup(&self, should_fail: bool) {
        *self.should_fail_lookup.write().await = should_fail;
    }

    pub async fn set_should_fail_insert(&self, should_fail: bool) {
        *self.should_fail_insert.write().await = should_fail;
    }

    /// Holds every insert for `delay`, widening concurrent registration windows
    pub async fn set_insert_delay(&self, delay: Duration) {
        *self.insert_delay.write().await = Some(delay);
    }

    /// Holds every name-and-TLD lookup for `delay`
    pub async fn set_lookup_delay(&self, delay: Duration) {
        *self.lookup_delay.write().await = Some(delay);
    }

    /// Stores a domain directly, bypassing insert accounting
    pub async fn put(&self, domain: Domain) {
        self.domains.write().await.insert(domain.uuid, domain);
    }

    pub async fn count(&self) -> usize {
        self.domains.read().await.len()
    }

    /// `(limit, offset)` of the last list or search call
    pub async fn last_page(&self) -> Option<(u32, u32)> {
        *self.last_page.read().await
    }

    /// Every stored domain, ordered by fqdn, then paged
    async fn page<F>(&self, limit: u32, offset: u32, keep: F) -> Vec<Domain>
    where
        F: Fn(&Domain) -> bool,
    {
        *self.last_page.write().await = Some((limit, offset));

        let mut domains: Vec<Domain> = self
            .domains
            .read()
            .await
            .values()
            .filter(|d| keep(d))
            .cloned()
            .collect();
        domains.sort_by_key(|d| d.fqdn());
        domains
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect()
    }

    pub fn search_count(&self) -> u64 {
        self.search_count.load(Ordering::Relaxed)
    }

    pub fn lookup_count(&self) -> u64 {
        self.lookup_count.load(Ordering::Relaxed)
    }

    pub fn insert_count(&self) -> u64 {
        self.insert_count.load(Ordering::Relaxed)
    }
}

impl Default for MockDomainRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DomainRegistry for MockDomainRegistry {
    async fn find_by_name_and_tld(
        &self,
        name: &str,
        tld_id: i32,
    ) -> Result<Option<Domain>, DomainError> {
        self.lookup_count.fetch_add(1, Ordering::Relaxed);

        let delay = *self.lookup_delay.read().await;
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if *self.should_fail_lookup.read().await {
            return Err(DomainError::DatabaseError("Mock lookup failed".to_string()));
        }

        let domains = self.domains.read().await;
        Ok(domains
            .values()
            .find(|d| &*d.name == name && d.tld.id == tld_id)
            .cloned())
    }

    async fn find_by_uuid(&self, uuid: &Uuid) -> Result<Option<Domain>, DomainError> {
        self.lookup_count.fetch_add(1, Ordering::Relaxed);
        if *self.should_fail_lookup.read().await {
            return Err(DomainError::DatabaseError("Mock lookup failed".to_string()));
        }

        Ok(self.domains.read().await.get(uuid).cloned())
    }

    async fn insert(&self, domain: &Domain) -> Result<(), DomainError> {
        self.insert_count.fetch_add(1, Ordering::Relaxed);

        let delay = *self.insert_delay.read().await;
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if *self.should_fail_insert.read().await {
            return Err(DomainError::DatabaseError("Mock insert failed".to_string()));
        }

        let mut domains = self.domains.write().await;
        if domains
            .values()
            .any(|d| d.name == domain.name && d.tld.id == domain.tld.id)
        {
            return Err(DomainError::PersistenceFailed(format!(
                "UNIQUE constraint failed: {}",
                domain.fqdn()
            )));
        }
        domains.insert(domain.uuid, domain.clone());
        Ok(())
    }

    async fn list(&self, limit: u32, offset: u32) -> Result<Vec<Domain>, DomainError> {
        if *self.should_fail_lookup.read().await {
            return Err(DomainError::DatabaseError("Mock list failed".to_string()));
        }
        Ok(self.page(limit, offset, |_| true).await)
    }

    async fn search(
        &self,
        filter: &DomainFilter,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<Domain>, DomainError> {
        if *self.should_fail_lookup.read().await {
            return Err(DomainError::DatabaseError("Mock search failed".to_string()));
        }
        self.search_count.fetch_add(1, Ordering::Relaxed);
        Ok(self
            .page(limit, offset, |d| {
                filter.name.as_deref().map_or(true, |n| &*d.name == n)
                    && filter.uuid.map_or(true, |u| d.uuid == u)
                    && filter.tld.as_deref().map_or(true, |t| &*d.tld.name == t)
            })
            .await)
    }
}

// ============================================================================
// Mock TldDetector
// ============================================================================

/// Longest-suffix detector over a fixed list of `(id, suffix)` pairs
#[derive(Clone)]
pub struct MockTldDetector {
    tlds: Arc<Vec<Arc<Tld>>>,
    detect_count: Arc<AtomicU64>,
}

impl MockTldDetector {
    pub fn new(tlds: Vec<(i32, &str)>) -> Self {
        Self {
            tlds: Arc::new(tlds.into_iter().map(|(id, n)| make_tld(id, n)).collect()),
            detect_count: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn standard() -> Self {
        Self::new(vec![(1, "com"), (2, "uk"), (3, "co.uk"), (4, "org")])
    }

    pub fn tld(&self, name: &str) -> Arc<Tld> {
        self.tlds
            .iter()
            .find(|t| &*t.name == name)
            .cloned()
            .expect("unknown test TLD")
    }

    pub fn detect_count(&self) -> u64 {
        self.detect_count.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl TldDetector for MockTldDetector {
    async fn detect(&self, query: &str) -> Result<DetectedDomain, DomainError> {
        self.detect_count.fetch_add(1, Ordering::Relaxed);

        let best = self
            .tlds
            .iter()
            .filter(|t| query.ends_with(&format!(".{}", t.name)))
            .max_by_key(|t| t.name.len())
            .ok_or_else(|| DomainError::DetectionFailed(query.to_string()))?;

        let rest = &query[..query.len() - best.name.len() - 1];
        let name = rest.rsplit('.').next().unwrap_or_default();
        if name.is_empty() {
            return Err(DomainError::DetectionFailed(query.to_string()));
        }

        Ok(DetectedDomain::new(name, best.clone()))
    }
}

// ============================================================================
// Mock ResolverClient
// ============================================================================

#[derive(Clone)]
pub struct MockResolverClient {
    responses: Arc<RwLock<HashMap<String, Vec<DnsRecord>>>>,
    failing: Arc<RwLock<Vec<String>>>,
    delay: Arc<RwLock<Option<Duration>>>,
    resolved: Arc<RwLock<Vec<Uuid>>>,
    call_count: Arc<AtomicU64>,
}

impl MockResolverClient {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(RwLock::new(HashMap::new())),
            failing: Arc::new(RwLock::new(Vec::new())),
            delay: Arc::new(RwLock::new(None)),
            resolved: Arc::new(RwLock::new(Vec::new())),
            call_count: Arc::new(AtomicU64::new(0)),
        }
    }

    pub async fn set_response(&self, fqdn: &str, records: Vec<DnsRecord>) {
        self.responses
            .write()
            .await
            .insert(fqdn.to_string(), records);
    }

    pub async fn set_failing(&self, fqdn: &str) {
        self.failing.write().await.push(fqdn.to_string());
    }

    pub async fn set_delay(&self, delay: Duration) {
        *self.delay.write().await = Some(delay);
    }

    /// Identifiers of every domain resolved so far, in call order
    pub async fn resolved(&self) -> Vec<Uuid> {
        self.resolved.read().await.clone()
    }

    pub fn call_count(&self) -> u64 {
        self.call_count.load(Ordering::Relaxed)
    }

    /// Factory handing every worker a clone sharing this mock's state
    pub fn factory(&self) -> Arc<dyn ResolverFactory> {
        let mock = self.clone();
        Arc::new(move |_worker_id: usize| -> Box<dyn ResolverClient> { Box::new(mock.clone()) })
    }
}

impl Default for MockResolverClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ResolverClient for MockResolverClient {
    async fn resolve(&self, domain: &Domain) -> Result<Vec<DnsRecord>, DomainError> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        self.resolved.write().await.push(domain.uuid);

        let delay = *self.delay.read().await;
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let fqdn = domain.fqdn();
        if self.failing.read().await.contains(&fqdn) {
            return Err(DomainError::ResolutionFailed(format!(
                "Mock resolver failed for {}",
                fqdn
            )));
        }

        Ok(self
            .responses
            .read()
            .await
            .get(&fqdn)
            .cloned()
            .unwrap_or_default())
    }
}
