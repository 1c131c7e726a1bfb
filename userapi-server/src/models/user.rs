//! The `users` entity and the request/response bodies around it

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::update::UserPatch;
use super::validation::ValidationError;

/// User record from database
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
}

/// Create user request (`POST /create`)
///
/// Both fields must be present; empty strings are stored as given.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
}

/// Update user request (`PUT /update`)
///
/// A missing id decodes as 0 and is rejected by [`UpdateUserRequest::into_parts`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateUserRequest {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl UpdateUserRequest {
    /// Validate the request and split it into the target id and the patch.
    pub fn into_parts(self) -> Result<(i64, UserPatch), ValidationError> {
        if self.id <= 0 {
            return Err(ValidationError::NotPositive { field: "id" });
        }

        let patch = UserPatch::new(self.name, self.email);
        if patch.is_empty() {
            return Err(ValidationError::NoFieldsProvided);
        }

        Ok((self.id, patch))
    }
}

/// Plain `{"message": ...}` confirmation body
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}
