use async_trait::async_trait;
use dashmap::DashMap;
use dnsdig_application::ports::{DomainFilter, DomainRegistry, TldRepository};
use dnsdig_domain::{Domain, DomainError, Tld};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use std::sync::Arc;
use tracing::{error, instrument};
use uuid::Uuid;

use super::tld_repository::SqliteTldRepository;

/// `(uuid, name, tld.id, tld.name)`
type DomainRow = (String, String, i32, String);

const SELECT_DOMAIN: &str = "SELECT d.uuid, d.name, t.id, t.name
     FROM domain AS d JOIN tld AS t ON t.id = d.tld";

/// SQLite domain registry.
///
/// TLD rows are interned: every domain read with the same TLD id shares one
/// `Arc<Tld>`.
pub struct SqliteDomainRepository {
    pool: SqlitePool,
    tld_repo: SqliteTldRepository,
    tlds: DashMap<i32, Arc<Tld>>,
}

impl SqliteDomainRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            tld_repo: SqliteTldRepository::new(pool.clone()),
            pool,
            tlds: DashMap::new(),
        }
    }

    fn intern_tld(&self, id: i32, name: String) -> Arc<Tld> {
        self.tlds
            .entry(id)
            .or_insert_with(|| Arc::new(Tld::new(id, name)))
            .clone()
    }

    fn row_to_domain(&self, row: DomainRow) -> Result<Domain, DomainError> {
        let (uuid, name, tld_id, tld_name) = row;
        let uuid = Uuid::parse_str(&uuid).map_err(|e| {
            error!(uuid = %uuid, error = %e, "Corrupt domain uuid");
            DomainError::DatabaseError(format!("Invalid uuid '{}': {}", uuid, e))
        })?;

        Ok(Domain::with_uuid(uuid, name, self.intern_tld(tld_id, tld_name)))
    }

    #[instrument(skip(self))]
    pub async fn count(&self) -> Result<i64, DomainError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM domain")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to count domains");
                DomainError::DatabaseError(e.to_string())
            })?;

        Ok(count.0)
    }

    /// Resolves the TLD filter to its id, `NotFound` when no such suffix is stored.
    async fn resolve_tld(&self, name: &str) -> Result<i32, DomainError> {
        let name = name.trim_matches('.').to_ascii_lowercase();
        self.tld_repo
            .get_by_name(&name)
            .await?
            .map(|tld| tld.id)
            .ok_or_else(|| DomainError::NotFound(format!("TLD '{}'", name)))
    }
}

#[async_trait]
impl DomainRegistry for SqliteDomainRepository {
    #[instrument(skip(self))]
    async fn find_by_name_and_tld(
        &self,
        name: &str,
        tld_id: i32,
    ) -> Result<Option<Domain>, DomainError> {
        let row = sqlx::query_as::<_, DomainRow>(&format!(
            "{} WHERE d.name = ? AND d.tld = ?",
            SELECT_DOMAIN
        ))
        .bind(name)
        .bind(tld_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to query domain by name and TLD");
            DomainError::DatabaseError(e.to_string())
        })?;

        row.map(|r| self.row_to_domain(r)).transpose()
    }

    #[instrument(skip(self))]
    async fn find_by_uuid(&self, uuid: &Uuid) -> Result<Option<Domain>, DomainError> {
        let row = sqlx::query_as::<_, DomainRow>(&format!("{} WHERE d.uuid = ?", SELECT_DOMAIN))
            .bind(uuid.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to query domain by uuid");
                DomainError::DatabaseError(e.to_string())
            })?;

        row.map(|r| self.row_to_domain(r)).transpose()
    }

    #[instrument(skip(self, domain), fields(domain = %domain.fqdn()))]
    async fn insert(&self, domain: &Domain) -> Result<(), DomainError> {
        sqlx::query("INSERT INTO domain (uuid, name, tld) VALUES (?, ?, ?)")
            .bind(domain.uuid.to_string())
            .bind(domain.name.as_ref())
            .bind(domain.tld.id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                let message = e.to_string();
                if message.contains("UNIQUE constraint failed") {
                    DomainError::PersistenceFailed(format!(
                        "Domain '{}' already exists",
                        domain.fqdn()
                    ))
                } else if message.contains("FOREIGN KEY constraint failed") {
                    DomainError::PersistenceFailed(format!("TLD {} not found", domain.tld.id))
                } else {
                    error!(error = %e, "Failed to insert domain");
                    DomainError::DatabaseError(message)
                }
            })?;

        self.tlds
            .entry(domain.tld.id)
            .or_insert_with(|| domain.tld.clone());
        Ok(())
    }

    #[instrument(skip(self))]
    async fn list(&self, limit: u32, offset: u32) -> Result<Vec<Domain>, DomainError> {
        self.search(&DomainFilter::default(), limit, offset).await
    }

    #[instrument(skip(self))]
    async fn search(
        &self,
        filter: &DomainFilter,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<Domain>, DomainError> {
        let tld_id = match filter.tld.as_deref() {
            Some(name) => Some(self.resolve_tld(name).await?),
            None => None,
        };

        let mut query = QueryBuilder::<Sqlite>::new(SELECT_DOMAIN);
        let mut clause = " WHERE ";
        if let Some(name) = &filter.name {
            query.push(clause).push("d.name = ").push_bind(name.to_ascii_lowercase());
            clause = " AND ";
        }
        if let Some(uuid) = &filter.uuid {
            query.push(clause).push("d.uuid = ").push_bind(uuid.to_string());
            clause = " AND ";
        }
        if let Some(tld_id) = tld_id {
            query.push(clause).push("d.tld = ").push_bind(tld_id);
        }
        query
            .push(" ORDER BY d.rowid LIMIT ")
            .push_bind(i64::from(limit))
            .push(" OFFSET ")
            .push_bind(i64::from(offset));

        let rows = query
            .build_query_as::<DomainRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to search domains");
                DomainError::DatabaseError(e.to_string())
            })?;

        rows.into_iter().map(|r| self.row_to_domain(r)).collect()
    }
}
