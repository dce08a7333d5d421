use async_trait::async_trait;
use dnsdig_domain::{DnsRecord, Domain, DomainError};

/// Performs one dig for a domain.
///
/// An empty list is a successful answer (no records); `Err` means the
/// lookup itself failed (network, timeout, malformed response).
#[async_trait]
pub trait ResolverClient: Send + Sync {
    async fn resolve(&self, domain: &Domain) -> Result<Vec<DnsRecord>, DomainError>;
}

/// Builds the resolver owned by one worker. Workers never share a resolver.
pub trait ResolverFactory: Send + Sync {
    fn create(&self, worker_id: usize) -> Box<dyn ResolverClient>;
}

impl<F> ResolverFactory for F
where
    F: Fn(usize) -> Box<dyn ResolverClient> + Send + Sync,
{
    fn create(&self, worker_id: usize) -> Box<dyn ResolverClient> {
        self(worker_id)
    }
}
