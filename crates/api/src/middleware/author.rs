//! Author identity extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use roomkit_core::types::DbId;

use crate::error::AppError;

/// Header an upstream auth layer sets to the acting user's id.
pub const USER_ID_HEADER: &str = "x-user-id";

/// Optional author of a write, read from the `x-user-id` header.
///
/// A missing or blank header yields `Author(None)`; a non-numeric value is
/// rejected with 400.
///
/// ```ignore
/// async fn my_handler(Author(user_id): Author) -> AppResult<Json<()>> {
///     tracing::info!(?user_id, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Author(pub Option<DbId>);

impl<S: Send + Sync> FromRequestParts<S> for Author {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Some(value) = parts.headers.get(USER_ID_HEADER) else {
            return Ok(Author(None));
        };

        let raw = value
            .to_str()
            .map_err(|_| AppError::BadRequest(format!("Invalid {USER_ID_HEADER} header")))?
            .trim();
        if raw.is_empty() {
            return Ok(Author(None));
        }

        raw.parse::<DbId>().map(|id| Author(Some(id))).map_err(|_| {
            AppError::BadRequest(format!(
                "Invalid {USER_ID_HEADER} header '{raw}': expected a numeric user id"
            ))
        })
    }
}
