pub mod repository;

use sqlx::{postgres::PgPoolOptions, PgPool};
use thiserror::Error;
use tracing::info;

use crate::config::AppConfig;

/// Errors surfaced by the data store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("No rows were affected")]
    NothingAffected,

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Build the process-wide connection pool. Constructed once at startup and
/// passed explicitly through `AppState`.
pub async fn connect(config: &AppConfig) -> Result<PgPool, StoreError> {
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&config.database_url)
        .await?;
    info!("connected to database");
    Ok(pool)
}

/// Apply pending migrations from the bundled `migrations/` directory.
pub async fn migrate(pool: &PgPool) -> Result<(), StoreError> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

/// Ping the pool to verify connectivity.
pub async fn health_check(pool: &PgPool) -> Result<(), StoreError> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}
