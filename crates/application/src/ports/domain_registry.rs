use async_trait::async_trait;
use dnsdig_domain::{Domain, DomainError};
use uuid::Uuid;

/// Criteria for [`DomainRegistry::search`]. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DomainFilter {
    pub name: Option<String>,
    pub uuid: Option<Uuid>,
    /// Suffix name such as `co.uk`, resolved to its TLD row by the registry
    pub tld: Option<String>,
}

impl DomainFilter {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.uuid.is_none() && self.tld.is_none()
    }
}

/// Repository interface for the domain registry.
///
/// Implementations must be safe for concurrent use; the dispatcher adds no
/// locking of its own around registry calls.
#[async_trait]
pub trait DomainRegistry: Send + Sync {
    /// Looks up the canonical domain for a `(name, tld)` pair.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(Domain))` - If the pair is registered
    /// * `Ok(None)` - If no domain with this pair exists
    /// * `Err(DomainError)` - If the lookup itself fails
    async fn find_by_name_and_tld(
        &self,
        name: &str,
        tld_id: i32,
    ) -> Result<Option<Domain>, DomainError>;

    /// Looks up a domain by its identifier.
    async fn find_by_uuid(&self, uuid: &Uuid) -> Result<Option<Domain>, DomainError>;

    /// Persists a newly constructed domain.
    ///
    /// # Errors
    ///
    /// * `DomainError::PersistenceFailed` - If the `(name, tld)` pair or the
    ///   identifier already exists
    /// * `DomainError::DatabaseError` - If storage is unavailable
    async fn insert(&self, domain: &Domain) -> Result<(), DomainError>;

    /// Registered domains in registration order, at most `limit` of them,
    /// skipping the first `offset`.
    async fn list(&self, limit: u32, offset: u32) -> Result<Vec<Domain>, DomainError>;

    /// Domains matching every set field of `filter`, paginated like
    /// [`DomainRegistry::list`].
    ///
    /// # Errors
    ///
    /// * `DomainError::NotFound` - If `filter.tld` names an unknown suffix
    async fn search(
        &self,
        filter: &DomainFilter,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<Domain>, DomainError>;
}
