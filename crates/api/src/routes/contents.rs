//! Route definitions for base contents.

use axum::routing::get;
use axum::Router;

use crate::handlers::contents;
use crate::state::AppState;

/// Routes mounted at `/contents`.
///
/// ```text
/// GET    /        list
/// POST   /        create
/// GET    /{id}    get_by_id
/// PUT    /{id}    update
/// DELETE /{id}    delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(contents::list).post(contents::create))
        .route(
            "/{id}",
            get(contents::get_by_id)
                .put(contents::update)
                .delete(contents::delete),
        )
}
