//! Handlers for the `/contents` resource.
//!
//! A content is the parent a main-content version chain attaches to.
//! Deleting one removes its whole chain.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use roomkit_core::error::CoreError;
use roomkit_core::main_content::validate_title;
use roomkit_core::types::DbId;
use roomkit_core::version_chain::ENTITY_CONTENT;
use roomkit_db::models::content::{Content, CreateContent, UpdateContent};
use roomkit_db::repositories::ContentRepo;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /api/v1/contents
///
/// List all contents, newest first.
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Content>>> {
    let contents = ContentRepo::list(&state.pool).await?;
    Ok(Json(contents))
}

/// GET /api/v1/contents/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Content>> {
    let content = ContentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found(ENTITY_CONTENT, id)))?;
    Ok(Json(content))
}

/// POST /api/v1/contents
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateContent>,
) -> AppResult<(StatusCode, Json<Content>)> {
    validate_title(&input.title)?;
    let content = ContentRepo::create(&state.pool, &input).await?;
    tracing::info!(content_id = content.id, "Created content");
    Ok((StatusCode::CREATED, Json(content)))
}

/// PUT /api/v1/contents/{id}
///
/// Omitted fields keep their current values.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateContent>,
) -> AppResult<Json<Content>> {
    if let Some(title) = &input.title {
        validate_title(title)?;
    }
    let content = ContentRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found(ENTITY_CONTENT, id)))?;
    Ok(Json(content))
}

/// DELETE /api/v1/contents/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    if !ContentRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::not_found(ENTITY_CONTENT, id)));
    }
    tracing::info!(content_id = id, "Deleted content");
    Ok(StatusCode::NO_CONTENT)
}
