use sqlx::migrate::Migrator;
use sqlx::sqlite::{
    SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions, SqliteSynchronous,
};
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;
use tracing::info;

/// Opens (creating if missing) the registry database and applies the
/// migrations found in `migrations_dir`.
pub async fn create_pool(
    database_url: &str,
    migrations_dir: &Path,
    max_connections: u32,
) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal)
        .synchronous(SqliteSynchronous::Normal)
        // Workers and admission hit the pool concurrently
        .busy_timeout(Duration::from_secs(5));

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections.max(1))
        .acquire_timeout(Duration::from_secs(5))
        .connect_with(options)
        .await?;

    run_migrations(&pool, migrations_dir).await?;

    info!(url = %database_url, "Database ready");
    Ok(pool)
}

pub async fn run_migrations(pool: &SqlitePool, migrations_dir: &Path) -> Result<(), sqlx::Error> {
    let migrator = Migrator::new(migrations_dir).await?;
    migrator.run(pool).await?;
    Ok(())
}
