//! Custom Axum extractors
//!
//! Both reject with `ApiError::Validation`, so malformed input is always a 400
//! rather than axum's default 415/422 responses.

use axum::body::Bytes;
use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use serde::de::DeserializeOwned;

use super::error::ApiError;
use crate::models::ValidationError;

/// Extract an integer user id from the path
pub struct UserIdPath(pub i64);

impl<S> FromRequestParts<S> for UserIdPath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let invalid = || {
            ApiError::Validation(ValidationError::InvalidFormat {
                field: "id",
                reason: "invalid ID",
            })
        };

        let Path(raw): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|_| invalid())?;

        let id = raw.trim().parse::<i64>().map_err(|_| invalid())?;
        Ok(Self(id))
    }
}

/// JSON body decoded regardless of `Content-Type`
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await.map_err(|e| {
            ApiError::Validation(ValidationError::Malformed {
                reason: e.body_text(),
            })
        })?;

        let value = serde_json::from_slice(&bytes).map_err(|e| {
            ApiError::Validation(ValidationError::Malformed {
                reason: e.to_string(),
            })
        })?;

        Ok(Self(value))
    }
}
