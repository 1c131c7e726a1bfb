//! Storage gateway - connection pool, schema and the users repository
//!
//! # Design Principles
//!
//! - One pooled connection per request, returned to the pool on drop
//! - Rely on the UNIQUE constraint for email, no check-then-insert
//! - Schema is created once at startup, before the listener binds

pub mod error;
pub mod pool;
pub mod users;

pub use error::DbError;
pub use pool::{acquire, create_pool, ensure_schema};
pub use users::UserRepo;

#[cfg(test)]
pub(crate) async fn test_pool() -> (tempfile::TempDir, sqlx::SqlitePool) {
    let dir = tempfile::TempDir::new().expect("tempdir");
    let config = crate::DatabaseConfig::new(dir.path().join("users.db"));
    let pool = create_pool(&config).await.expect("pool creation failed");
    ensure_schema(&pool).await.expect("schema creation failed");
    (dir, pool)
}
