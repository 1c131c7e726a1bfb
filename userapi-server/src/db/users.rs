//! User repository
//!
//! Operates on a single checked-out connection:
//! - create: plain INSERT, duplicate emails surface as `ConstraintViolation`
//! - list_all: unfiltered scan, storage-defined order
//! - delete_by_id / update: report affected rows, callers decide "not found"

use sqlx::SqliteConnection;

use super::error::DbError;
use crate::models::{SqlParam, UpdateStatement, User};

/// Users repository bound to one connection
pub struct UserRepo<'c> {
    conn: &'c mut SqliteConnection,
}

impl<'c> UserRepo<'c> {
    pub fn new(conn: &'c mut SqliteConnection) -> Self {
        Self { conn }
    }

    /// Insert a user, returning the id assigned by storage.
    pub async fn create(&mut self, name: &str, email: &str) -> Result<i64, DbError> {
        let result = sqlx::query("INSERT INTO users (name, email) VALUES (?, ?)")
            .bind(name)
            .bind(email)
            .execute(&mut *self.conn)
            .await
            .map_err(DbError::from_write)?;

        let id = result.last_insert_rowid();
        tracing::debug!(id, "user created");
        Ok(id)
    }

    /// All users. No ORDER BY: order is whatever SQLite returns.
    pub async fn list_all(&mut self) -> Result<Vec<User>, DbError> {
        sqlx::query_as::<_, User>("SELECT id, name, email FROM users")
            .fetch_all(&mut *self.conn)
            .await
            .map_err(DbError::Storage)
    }

    /// Delete one user, returning how many rows went (0 or 1).
    pub async fn delete_by_id(&mut self, id: i64) -> Result<u64, DbError> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(&mut *self.conn)
            .await
            .map_err(DbError::Storage)?;

        tracing::debug!(id, rows = result.rows_affected(), "user delete executed");
        Ok(result.rows_affected())
    }

    /// Execute a prepared partial update, returning the affected row count.
    pub async fn update(&mut self, statement: UpdateStatement) -> Result<u64, DbError> {
        let (sql, params) = statement.into_parts();

        let mut query = sqlx::query(&sql);
        for param in params {
            query = match param {
                SqlParam::Text(value) => query.bind(value),
                SqlParam::Integer(value) => query.bind(value),
            };
        }

        let result = query
            .execute(&mut *self.conn)
            .await
            .map_err(DbError::from_write)?;
        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::db::{acquire, test_pool};
    use crate::models::{build_update, UserPatch};

    #[tokio::test]
    async fn create_assigns_fresh_positive_ids() {
        let (_dir, pool) = test_pool().await;
        let mut conn = acquire(&pool).await.unwrap();
        let mut repo = UserRepo::new(&mut conn);

        let a = repo.create("Alice", "alice@x.com").await.unwrap();
        let b = repo.create("Bob", "bob@x.com").await.unwrap();

        assert!(a > 0);
        assert!(b > 0);
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn duplicate_email_is_constraint_violation() {
        let (_dir, pool) = test_pool().await;
        let mut conn = acquire(&pool).await.unwrap();
        let mut repo = UserRepo::new(&mut conn);

        repo.create("Alice", "alice@x.com").await.unwrap();
        let err = repo.create("Other", "alice@x.com").await.unwrap_err();

        assert!(matches!(err, DbError::ConstraintViolation(_)));
        assert_eq!(repo.list_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn empty_strings_are_persisted() {
        let (_dir, pool) = test_pool().await;
        let mut conn = acquire(&pool).await.unwrap();
        let mut repo = UserRepo::new(&mut conn);

        let id = repo.create("", "").await.unwrap();
        let users = repo.list_all().await.unwrap();

        assert_eq!(
            users,
            vec![User {
                id,
                name: String::new(),
                email: String::new()
            }]
        );
    }

    #[tokio::test]
    async fn list_returns_every_user() {
        let (_dir, pool) = test_pool().await;
        let mut conn = acquire(&pool).await.unwrap();
        let mut repo = UserRepo::new(&mut conn);

        assert!(repo.list_all().await.unwrap().is_empty());

        let mut expected = HashSet::new();
        for (name, email) in [("A", "a@x.com"), ("B", "b@x.com"), ("C", "c@x.com")] {
            let id = repo.create(name, email).await.unwrap();
            expected.insert((id, name.to_owned(), email.to_owned()));
        }

        let listed: HashSet<_> = repo
            .list_all()
            .await
            .unwrap()
            .into_iter()
            .map(|u| (u.id, u.name, u.email))
            .collect();
        assert_eq!(listed, expected);
    }

    #[tokio::test]
    async fn delete_reports_affected_rows() {
        let (_dir, pool) = test_pool().await;
        let mut conn = acquire(&pool).await.unwrap();
        let mut repo = UserRepo::new(&mut conn);

        let keep = repo.create("Keep", "keep@x.com").await.unwrap();
        let gone = repo.create("Gone", "gone@x.com").await.unwrap();

        assert_eq!(repo.delete_by_id(9_999).await.unwrap(), 0);
        assert_eq!(repo.list_all().await.unwrap().len(), 2);

        assert_eq!(repo.delete_by_id(gone).await.unwrap(), 1);
        let ids: Vec<i64> = repo.list_all().await.unwrap().iter().map(|u| u.id).collect();
        assert_eq!(ids, vec![keep]);
    }

    #[tokio::test]
    async fn update_name_leaves_email() {
        let (_dir, pool) = test_pool().await;
        let mut conn = acquire(&pool).await.unwrap();
        let mut repo = UserRepo::new(&mut conn);

        let id = repo.create("Alice", "alice@x.com").await.unwrap();
        let patch = UserPatch::new(Some("Alicia".into()), None);
        let affected = repo.update(build_update(id, &patch)).await.unwrap();

        assert_eq!(affected, 1);
        assert_eq!(
            repo.list_all().await.unwrap(),
            vec![User {
                id,
                name: "Alicia".into(),
                email: "alice@x.com".into()
            }]
        );
    }

    #[tokio::test]
    async fn update_to_taken_email_is_constraint_violation() {
        let (_dir, pool) = test_pool().await;
        let mut conn = acquire(&pool).await.unwrap();
        let mut repo = UserRepo::new(&mut conn);

        repo.create("Alice", "alice@x.com").await.unwrap();
        let bob = repo.create("Bob", "bob@x.com").await.unwrap();

        let patch = UserPatch::new(None, Some("alice@x.com".into()));
        let err = repo.update(build_update(bob, &patch)).await.unwrap_err();
        assert!(matches!(err, DbError::ConstraintViolation(_)));
    }

    #[tokio::test]
    async fn update_missing_id_affects_nothing() {
        let (_dir, pool) = test_pool().await;
        let mut conn = acquire(&pool).await.unwrap();
        let mut repo = UserRepo::new(&mut conn);

        let patch = UserPatch::new(Some("Nobody".into()), None);
        assert_eq!(repo.update(build_update(42, &patch)).await.unwrap(), 0);
    }
}
