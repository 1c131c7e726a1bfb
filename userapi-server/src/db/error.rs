//! Database error type

/// Storage failures, classified by what the caller can do about them.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// Store could not be opened, or a handle could not be checked out
    #[error("connection error: {0}")]
    Connection(#[source] sqlx::Error),

    /// Table creation failed at startup
    #[error("schema error: {0}")]
    Schema(#[source] sqlx::Error),

    /// A UNIQUE constraint rejected the write (duplicate email)
    #[error("constraint violation: {0}")]
    ConstraintViolation(#[source] sqlx::Error),

    #[error("storage error: {0}")]
    Storage(#[source] sqlx::Error),
}

impl DbError {
    /// Classify a failed write. Unique-key collisions become `ConstraintViolation`.
    pub(crate) fn from_write(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db) if db.is_unique_violation() => Self::ConstraintViolation(err),
            _ => Self::Storage(err),
        }
    }
}
