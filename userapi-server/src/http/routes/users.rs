//! User endpoints
//!
//! Each handler: decode input -> validate -> acquire a connection -> run one
//! repository call -> map the outcome. The connection drops with the handler.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::{delete, get, post, put},
    Json, Router,
};

use crate::db::{self, UserRepo};
use crate::http::error::ApiError;
use crate::http::extractors::{JsonBody, UserIdPath};
use crate::http::server::AppState;
use crate::models::{build_update, CreateUserRequest, MessageResponse, UpdateUserRequest, User};

/// POST /create - insert a user, reply with its id as plain text
async fn create_user(
    State(state): State<Arc<AppState>>,
    JsonBody(req): JsonBody<CreateUserRequest>,
) -> Result<(StatusCode, String), ApiError> {
    let mut conn = db::acquire(&state.pool).await?;
    let id = UserRepo::new(&mut conn).create(&req.name, &req.email).await?;

    Ok((StatusCode::CREATED, format!("User created with ID: {id}\n")))
}

/// GET /find - every user, unordered
async fn list_users(State(state): State<Arc<AppState>>) -> Result<Json<Vec<User>>, ApiError> {
    let mut conn = db::acquire(&state.pool).await?;
    let users = UserRepo::new(&mut conn).list_all().await?;

    Ok(Json(users))
}

/// DELETE /delete/{id}
async fn delete_user(
    State(state): State<Arc<AppState>>,
    UserIdPath(id): UserIdPath,
) -> Result<Json<MessageResponse>, ApiError> {
    let mut conn = db::acquire(&state.pool).await?;
    let deleted = UserRepo::new(&mut conn).delete_by_id(id).await?;

    if deleted == 0 {
        return Err(ApiError::NotFound {
            resource: "user",
            id: id.to_string(),
        });
    }

    Ok(Json(MessageResponse {
        message: "User deleted successfully",
    }))
}

/// PUT /update - change only the supplied fields
async fn update_user(
    State(state): State<Arc<AppState>>,
    JsonBody(req): JsonBody<UpdateUserRequest>,
) -> Result<&'static str, ApiError> {
    let (id, patch) = req.into_parts()?;
    let statement = build_update(id, &patch);

    let mut conn = db::acquire(&state.pool).await?;
    let updated = UserRepo::new(&mut conn).update(statement).await?;
    if updated == 0 {
        tracing::debug!(id, "update matched no rows");
    }

    Ok("User updated successfully!")
}

/// User routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/create", post(create_user))
        .route("/find", get(list_users))
        .route("/delete/{id}", delete(delete_user))
        .route("/update", put(update_user))
}
