//! Route definitions for versioned main contents.
//!
//! Versions are addressed by uuid; chain-wide lookups go through the owning
//! content id under `/content/{content_id}`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::main_contents as version;
use crate::state::AppState;

/// Routes mounted at `/main-contents`.
///
/// ```text
/// POST   /                                  create_initial
/// GET    /{uuid}                            get_by_uuid
/// PATCH  /{uuid}                            append
/// GET    /{uuid}/history/{direction}        history
/// GET    /content/{content_id}/latest       get_latest
/// GET    /content/{content_id}/versions     list_versions
/// ```
pub fn router() -> Router<AppState> {
    let by_content = Router::new()
        .route("/latest", get(version::get_latest))
        .route("/versions", get(version::list_versions));

    Router::new()
        .route("/", post(version::create_initial))
        .route("/{uuid}", get(version::get_by_uuid).patch(version::append))
        .route("/{uuid}/history/{direction}", get(version::history))
        .nest("/content/{content_id}", by_content)
}
