//! Catalog Store: connection pool, migrations and the `products` repository.

use std::time::Duration;

use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::{ConnectOptions, Connection};

pub mod models;
pub mod repositories;

pub type DbPool = sqlx::PgPool;

/// Create a connection pool without connecting.
///
/// Connections are opened on first use, so a store that is unreachable at
/// startup does not prevent the pool from being built. Beyond
/// `max_connections` callers queue for a free connection, for at most
/// `acquire_timeout`.
pub fn create_pool(
    options: PgConnectOptions,
    max_connections: u32,
    acquire_timeout: Duration,
) -> DbPool {
    tracing::debug!(
        host = options.get_host(),
        port = options.get_port(),
        max_connections,
        acquire_timeout_ms = acquire_timeout.as_millis() as u64,
        "Building lazy catalog store pool"
    );
    PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(acquire_timeout)
        .connect_lazy_with(options)
}

/// Round-trip a trivial query to verify the store is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply pending schema migrations from `crates/db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    let migrator = sqlx::migrate!("./migrations");
    tracing::debug!(count = migrator.iter().count(), "Applying catalog store migrations");
    migrator.run(pool).await
}

/// Replace a bare [`sqlx::Error::PoolTimedOut`] with the error that kept the
/// pool from connecting.
///
/// While the store refuses connections the pool keeps retrying until its
/// acquire timeout and then reports only the timeout. One direct connection
/// attempt, bounded by `limit`, recovers the real cause. Every other error is
/// returned unchanged.
pub async fn explain_pool_error(pool: &DbPool, error: sqlx::Error, limit: Duration) -> sqlx::Error {
    if !matches!(error, sqlx::Error::PoolTimedOut) {
        return error;
    }

    let options = pool.connect_options();
    match tokio::time::timeout(limit, options.connect()).await {
        Ok(Err(cause)) => {
            tracing::warn!(error = %cause, "Pool timed out; direct connection failed");
            cause
        }
        Ok(Ok(conn)) => {
            // Reachable after all: the pool was simply saturated.
            let _ = conn.close().await;
            error
        }
        Err(_) => error,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn refused_options() -> PgConnectOptions {
        PgConnectOptions::new()
            .host("127.0.0.1")
            .port(1)
            .username("showroom")
            .database("showroom")
    }

    #[tokio::test]
    async fn pool_builds_lazily() {
        let pool = create_pool(refused_options(), 3, Duration::from_secs(2));
        assert_eq!(pool.options().get_max_connections(), 3);
        assert_eq!(pool.options().get_acquire_timeout(), Duration::from_secs(2));
        assert_eq!(pool.size(), 0);
    }

    #[tokio::test]
    async fn refused_connection_replaces_pool_timeout() {
        let pool = create_pool(refused_options(), 1, Duration::from_millis(200));

        let err = health_check(&pool).await.unwrap_err();
        assert!(matches!(err, sqlx::Error::PoolTimedOut));

        let explained = explain_pool_error(&pool, err, Duration::from_secs(2)).await;
        assert!(!matches!(explained, sqlx::Error::PoolTimedOut), "{explained}");
    }

    #[tokio::test]
    async fn other_errors_pass_through() {
        let pool = create_pool(refused_options(), 1, Duration::from_millis(200));
        let explained =
            explain_pool_error(&pool, sqlx::Error::RowNotFound, Duration::from_secs(1)).await;
        assert!(matches!(explained, sqlx::Error::RowNotFound));
    }
}
