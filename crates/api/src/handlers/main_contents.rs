//! Handlers for the `/main-contents` resource.
//!
//! Every write goes through the version-chain manager in [`AppState`]; a
//! version is never edited in place. Path uuids are validated before any
//! lookup so malformed ids answer 400 rather than 404.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use roomkit_core::error::CoreError;
use roomkit_core::main_content::{parse_version_uuid, ContentBody, Direction};
use roomkit_core::types::DbId;
use roomkit_core::version_chain::{NewChain, VersionPatch, VersionRecord};
use serde::Deserialize;

use crate::error::AppResult;
use crate::middleware::author::Author;
use crate::state::AppState;

/// Request body for POST /api/v1/main-contents.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMainContentRequest {
    pub content_id: Option<DbId>,
    pub title: Option<String>,
    pub content: Option<serde_json::Value>,
    pub image: Option<String>,
    pub uuid: Option<String>,
    pub prev_uuid: Option<String>,
}

/// Request body for PATCH /api/v1/main-contents/{uuid}.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMainContentRequest {
    pub title: Option<String>,
    pub content: Option<serde_json::Value>,
    pub image: Option<String>,
}

/// POST /api/v1/main-contents
///
/// Start the version chain of a content. Returns 409 if the content already
/// has one.
pub async fn create_initial(
    State(state): State<AppState>,
    Author(user_id): Author,
    Json(input): Json<CreateMainContentRequest>,
) -> AppResult<(StatusCode, Json<VersionRecord>)> {
    let content_id = input
        .content_id
        .ok_or_else(|| CoreError::Validation("contentId is required".into()))?;

    let record = state
        .versions
        .create_initial(
            NewChain {
                content_id,
                title: input.title,
                body: input.content.and_then(ContentBody::from_json),
                image: input.image,
                uuid: input.uuid,
                prev_uuid: input.prev_uuid,
            },
            user_id,
        )
        .await?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// PATCH /api/v1/main-contents/{uuid}
///
/// Append a new version after `{uuid}`, which must be the latest. Returns the
/// new version; 409 if `{uuid}` is stale or loses a concurrent append.
pub async fn append(
    State(state): State<AppState>,
    Path(uuid): Path<String>,
    Author(user_id): Author,
    Json(input): Json<UpdateMainContentRequest>,
) -> AppResult<Json<VersionRecord>> {
    let current = parse_version_uuid(&uuid, "uuid")?;
    let patch = VersionPatch {
        title: input.title,
        body: input.content.and_then(ContentBody::from_json),
        image: input.image,
    };
    let record = state.versions.append(current, patch, user_id).await?;
    Ok(Json(record))
}

/// GET /api/v1/main-contents/{uuid}
pub async fn get_by_uuid(
    State(state): State<AppState>,
    Path(uuid): Path<String>,
) -> AppResult<Json<VersionRecord>> {
    let uuid = parse_version_uuid(&uuid, "uuid")?;
    let record = state.versions.get_by_uuid(uuid).await?;
    Ok(Json(record))
}

/// GET /api/v1/main-contents/content/{content_id}/latest
pub async fn get_latest(
    State(state): State<AppState>,
    Path(content_id): Path<DbId>,
) -> AppResult<Json<VersionRecord>> {
    let record = state.versions.get_latest(content_id).await?;
    Ok(Json(record))
}

/// GET /api/v1/main-contents/content/{content_id}/versions
///
/// All versions ordered by version number descending. An unknown content
/// yields an empty list.
pub async fn list_versions(
    State(state): State<AppState>,
    Path(content_id): Path<DbId>,
) -> AppResult<Json<Vec<VersionRecord>>> {
    let records = state.versions.list_versions(content_id).await?;
    Ok(Json(records))
}

/// GET /api/v1/main-contents/{uuid}/history/{direction}
///
/// `direction` is `prev` (towards version 1) or `next` (towards the latest).
/// The starting version is the first element.
pub async fn history(
    State(state): State<AppState>,
    Path((uuid, direction)): Path<(String, String)>,
) -> AppResult<Json<Vec<VersionRecord>>> {
    let start = parse_version_uuid(&uuid, "uuid")?;
    let direction: Direction = direction.parse()?;
    let records = state.versions.history(start, direction).await?;
    Ok(Json(records))
}
