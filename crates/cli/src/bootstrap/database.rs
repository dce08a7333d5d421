use dnsdig_domain::config::DatabaseConfig;
use dnsdig_infrastructure::database::create_pool;
use dnsdig_infrastructure::repositories::SqliteTldRepository;
use dnsdig_infrastructure::tld::DEFAULT_SUFFIXES;
use sqlx::SqlitePool;
use std::path::Path;
use tracing::{error, info};

/// Opens the registry and makes sure the known suffixes are stored.
pub async fn init_database(cfg: &DatabaseConfig) -> anyhow::Result<SqlitePool> {
    let database_url = cfg.url();
    info!("Initializing database: {}", database_url);

    let pool = create_pool(
        &database_url,
        Path::new(&cfg.migrations),
        cfg.max_connections,
    )
    .await
    .map_err(|e| {
        error!("Failed to initialize database: {}", e);
        anyhow::anyhow!(e)
    })?;

    let seeded = SqliteTldRepository::new(pool.clone())
        .seed(DEFAULT_SUFFIXES.iter().copied())
        .await?;
    if seeded > 0 {
        info!(seeded, "Stored default TLD suffixes");
    }

    Ok(pool)
}
