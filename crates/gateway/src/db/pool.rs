//! Database connection pool management.

use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

use crate::config::StoreConfig;
use crate::error::GatewayResult;

pub type DbPool = SqlitePool;

/// Open the store pool. The database file is created when missing.
pub async fn create_pool(config: &StoreConfig) -> GatewayResult<DbPool> {
    let options = SqliteConnectOptions::from_str(&config.url)?.create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .connect_with(options)
        .await?;

    tracing::info!(
        url = %config.url,
        max_connections = config.max_connections,
        "Store connection pool created"
    );

    Ok(pool)
}

/// Bring the schema up to date with `migrations/`.
pub async fn run_migrations(pool: &DbPool) -> GatewayResult<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    tracing::debug!("Store migrations applied");
    Ok(())
}

pub async fn health_check(pool: &DbPool) -> bool {
    sqlx::query("SELECT 1").execute(pool).await.is_ok()
}

/// Single-connection in-memory pool with the schema applied.
///
/// Every SQLite `:memory:` connection is its own database, so the pool is
/// pinned to one connection that never expires.
#[cfg(test)]
pub async fn test_pool() -> DbPool {
    let options = SqliteConnectOptions::from_str("sqlite::memory:").unwrap();
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
        .unwrap();
    run_migrations(&pool).await.unwrap();
    pool
}

/// Multi-connection pool over a store file in `dir`, schema applied.
#[cfg(test)]
pub async fn file_pool(dir: &tempfile::TempDir) -> DbPool {
    let config = StoreConfig {
        url: format!("sqlite://{}", dir.path().join("store.sqlite").display()),
        max_connections: 5,
        ..StoreConfig::default()
    };
    let pool = create_pool(&config).await.unwrap();
    run_migrations(&pool).await.unwrap();
    pool
}
