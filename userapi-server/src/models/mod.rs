//! Domain models with validation at construction
//!
//! Request bodies are validated before any storage handle is acquired.
//! Invalid input returns ValidationError, not panic.

pub mod update;
pub mod user;
pub mod validation;

pub use update::{build_update, SqlParam, UpdateStatement, UserPatch};
pub use user::{CreateUserRequest, MessageResponse, UpdateUserRequest, User};
pub use validation::ValidationError;
