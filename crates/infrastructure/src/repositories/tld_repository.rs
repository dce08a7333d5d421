use async_trait::async_trait;
use dnsdig_application::ports::TldRepository;
use dnsdig_domain::{DomainError, Tld};
use sqlx::SqlitePool;
use tracing::{debug, error, instrument};

type TldRow = (i32, String);

pub struct SqliteTldRepository {
    pool: SqlitePool,
}

impl SqliteTldRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn row_to_tld((id, name): TldRow) -> Tld {
        Tld::new(id, name)
    }

    /// Inserts every suffix in `names` that is not stored yet.
    #[instrument(skip(self, names))]
    pub async fn seed<I, S>(&self, names: I) -> Result<u64, DomainError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut inserted = 0;
        for name in names {
            let result = sqlx::query("INSERT OR IGNORE INTO tld (name) VALUES (?)")
                .bind(name.as_ref().to_ascii_lowercase())
                .execute(&self.pool)
                .await
                .map_err(|e| {
                    error!(error = %e, "Failed to seed TLD");
                    DomainError::DatabaseError(e.to_string())
                })?;
            inserted += result.rows_affected();
        }

        debug!(inserted, "TLD table seeded");
        Ok(inserted)
    }
}

#[async_trait]
impl TldRepository for SqliteTldRepository {
    #[instrument(skip(self))]
    async fn get_by_id(&self, id: i32) -> Result<Option<Tld>, DomainError> {
        let row = sqlx::query_as::<_, TldRow>("SELECT id, name FROM tld WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to query TLD by id");
                DomainError::DatabaseError(e.to_string())
            })?;

        Ok(row.map(Self::row_to_tld))
    }

    #[instrument(skip(self))]
    async fn get_by_name(&self, name: &str) -> Result<Option<Tld>, DomainError> {
        let row = sqlx::query_as::<_, TldRow>("SELECT id, name FROM tld WHERE name = ?")
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to query TLD by name");
                DomainError::DatabaseError(e.to_string())
            })?;

        Ok(row.map(Self::row_to_tld))
    }

    #[instrument(skip(self))]
    async fn get_all(&self) -> Result<Vec<Tld>, DomainError> {
        let rows = sqlx::query_as::<_, TldRow>("SELECT id, name FROM tld ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to query all TLDs");
                DomainError::DatabaseError(e.to_string())
            })?;

        Ok(rows.into_iter().map(Self::row_to_tld).collect())
    }

    #[instrument(skip(self))]
    async fn get_or_create(&self, name: &str) -> Result<Tld, DomainError> {
        let name = name.to_ascii_lowercase();
        sqlx::query("INSERT OR IGNORE INTO tld (name) VALUES (?)")
            .bind(&name)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to create TLD");
                DomainError::DatabaseError(e.to_string())
            })?;

        self.get_by_name(&name)
            .await?
            .ok_or_else(|| DomainError::DatabaseError(format!("TLD '{}' vanished", name)))
    }
}
