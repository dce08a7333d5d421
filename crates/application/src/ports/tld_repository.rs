use async_trait::async_trait;
use dnsdig_domain::{DomainError, Tld};

/// Read access to the TLD table, plus seeding.
#[async_trait]
pub trait TldRepository: Send + Sync {
    async fn get_by_id(&self, id: i32) -> Result<Option<Tld>, DomainError>;

    async fn get_by_name(&self, name: &str) -> Result<Option<Tld>, DomainError>;

    async fn get_all(&self) -> Result<Vec<Tld>, DomainError>;

    /// Inserts the suffix when missing and returns the stored row.
    async fn get_or_create(&self, name: &str) -> Result<Tld, DomainError>;
}
