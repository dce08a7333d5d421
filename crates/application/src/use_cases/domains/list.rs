use crate::ports::{DomainFilter, DomainRegistry};
use dnsdig_domain::{Domain, DomainError};
use std::sync::Arc;
use tracing::instrument;

const MAX_LIMIT: u32 = 1_000;

/// Pages through the registry, optionally filtered.
pub struct ListDomainsUseCase {
    registry: Arc<dyn DomainRegistry>,
}

impl ListDomainsUseCase {
    pub fn new(registry: Arc<dyn DomainRegistry>) -> Self {
        Self { registry }
    }

    /// `limit` is capped at 1000. An empty filter lists every domain.
    #[instrument(skip(self))]
    pub async fn execute(
        &self,
        filter: &DomainFilter,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<Domain>, DomainError> {
        let limit = limit.min(MAX_LIMIT);
        if filter.is_empty() {
            self.registry.list(limit, offset).await
        } else {
            self.registry.search(filter, limit, offset).await
        }
    }
}
