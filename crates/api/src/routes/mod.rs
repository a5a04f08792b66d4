pub mod contents;
pub mod health;
pub mod main_contents;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /contents                                       list, create
/// /contents/{id}                                  get, update, delete
///
/// /main-contents                                  create initial version (POST)
/// /main-contents/{uuid}                           get, append new version (PATCH)
/// /main-contents/{uuid}/history/{direction}       walk prev/next pointers
/// /main-contents/content/{content_id}/latest      latest version of a content
/// /main-contents/content/{content_id}/versions    all versions, newest first
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/contents", contents::router())
        .nest("/main-contents", main_contents::router())
}
