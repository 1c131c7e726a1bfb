//! Database connection pool management
//!
//! Uses a sqlx SqlitePool bounded by `DatabaseConfig::max_connections`.

use sqlx::pool::PoolConnection;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use sqlx::{Connection, Sqlite};

use super::error::DbError;
use crate::config::DatabaseConfig;

const CREATE_USERS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS users (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        email TEXT NOT NULL UNIQUE
    )
"#;

/// Open the SQLite pool, creating the database file if missing.
///
/// # Errors
///
/// Returns `DbError::Connection` if the file cannot be opened.
pub async fn create_pool(config: &DatabaseConfig) -> Result<SqlitePool, DbError> {
    let options = SqliteConnectOptions::new()
        .filename(&config.path)
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(config.busy_timeout);

    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .connect_with(options)
        .await
        .map_err(DbError::Connection)?;

    tracing::debug!(
        path = %config.path.display(),
        max_connections = config.max_connections,
        "sqlite pool opened"
    );
    Ok(pool)
}

/// Create the `users` table if it does not exist yet.
///
/// Run once at startup; failure means the service has nothing to serve.
pub async fn ensure_schema(pool: &SqlitePool) -> Result<(), DbError> {
    sqlx::query(CREATE_USERS_TABLE)
        .execute(pool)
        .await
        .map_err(DbError::Schema)?;

    tracing::info!("users table created or already exists");
    Ok(())
}

/// Check out a connection for one request and verify it is alive.
///
/// The connection returns to the pool when dropped.
pub async fn acquire(pool: &SqlitePool) -> Result<PoolConnection<Sqlite>, DbError> {
    let mut conn = pool.acquire().await.map_err(DbError::Connection)?;
    conn.ping().await.map_err(DbError::Connection)?;
    Ok(conn)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn schema_creation_is_idempotent() {
        let (_dir, pool) = crate::db::test_pool().await;

        ensure_schema(&pool).await.expect("second run should be a no-op");

        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn creates_missing_database_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("fresh.db");
        assert!(!path.exists());

        create_pool(&DatabaseConfig::new(&path)).await.unwrap();
        assert!(path.exists());
    }

    #[tokio::test]
    async fn unreachable_store_is_connection_error() {
        let dir = TempDir::new().unwrap();
        let config = DatabaseConfig::new(dir.path().join("missing-dir").join("users.db"));

        let err = create_pool(&config).await.unwrap_err();
        assert!(matches!(err, DbError::Connection(_)));
    }

    #[tokio::test]
    async fn concurrent_acquire() {
        let (_dir, pool) = crate::db::test_pool().await;

        let handles: Vec<_> = (0..10)
            .map(|i: i64| {
                let pool = pool.clone();
                tokio::spawn(async move {
                    let mut conn = acquire(&pool).await.expect("acquire failed");
                    let (value,): (i64,) = sqlx::query_as("SELECT ?")
                        .bind(i)
                        .fetch_one(&mut *conn)
                        .await
                        .expect("concurrent query failed");
                    value
                })
            })
            .collect();

        for (i, handle) in handles.into_iter().enumerate() {
            let result = handle.await.expect("task panicked");
            assert_eq!(result, i as i64);
        }
    }
}
