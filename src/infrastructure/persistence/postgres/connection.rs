//! Pool construction and schema migrations for the PostgreSQL backend.

use crate::infrastructure::config::PostgresConfig;
use crate::infrastructure::persistence::traits::{RepositoryError, RepositoryResult};
use sqlx::PgPool;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use std::time::Duration;

const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

/// Builds connect options from the service configuration.
#[must_use]
pub fn connect_options(config: &PostgresConfig) -> PgConnectOptions {
    PgConnectOptions::new()
        .host(&config.host)
        .port(config.port)
        .username(&config.username)
        .password(&config.password)
        .database(&config.database)
}

/// Opens a connection pool.
///
/// # Errors
///
/// Returns `RepositoryError::Connection` if the server cannot be reached or
/// refuses the credentials.
pub async fn create_pool(config: &PostgresConfig) -> RepositoryResult<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(ACQUIRE_TIMEOUT)
        .connect_with(connect_options(config))
        .await
        .map_err(|e| {
            RepositoryError::connection(format!(
                "postgres connect to {}:{}/{} failed: {e}",
                config.host, config.port, config.database
            ))
        })?;

    tracing::info!(
        host = %config.host,
        port = config.port,
        database = %config.database,
        max_connections = config.max_connections,
        "postgres pool ready"
    );
    Ok(pool)
}

/// Applies the embedded migrations under `migrations/`.
///
/// # Errors
///
/// Returns `RepositoryError::Query` if a migration fails.
pub async fn run_migrations(pool: &PgPool) -> RepositoryResult<()> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .map_err(|e| RepositoryError::query(format!("postgres migration failed: {e}")))?;
    tracing::info!("postgres migrations applied");
    Ok(())
}
