//! HTTP-level integration tests for the content endpoints.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, delete, get, post_json, put_json};
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Test: POST /api/v1/contents creates and returns 201
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_content(pool: PgPool) {
    let app = build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/contents",
        json!({"title": "The Vault", "image": "vault.png"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert!(json["id"].is_i64());
    assert_eq!(json["title"], "The Vault");
    assert_eq!(json["image"], "vault.png");
    assert!(json["createdAt"].is_string());
}

// ---------------------------------------------------------------------------
// Test: POST /api/v1/contents with a blank title returns 400
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_content_blank_title(pool: PgPool) {
    let app = build_test_app(pool);
    let response = post_json(app, "/api/v1/contents", json!({"title": "   "})).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

// ---------------------------------------------------------------------------
// Test: GET /api/v1/contents lists newest first
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_contents(pool: PgPool) {
    let app = build_test_app(pool);
    post_json(app.clone(), "/api/v1/contents", json!({"title": "First"})).await;
    post_json(app.clone(), "/api/v1/contents", json!({"title": "Second"})).await;

    let response = get(app, "/api/v1/contents").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let items = json.as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["title"], "Second");
    assert_eq!(items[1]["title"], "First");
}

// ---------------------------------------------------------------------------
// Test: GET /api/v1/contents/{id} returns 404 for a missing content
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_get_content_not_found(pool: PgPool) {
    let app = build_test_app(pool);
    let response = get(app, "/api/v1/contents/999999").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
}

// ---------------------------------------------------------------------------
// Test: PUT /api/v1/contents/{id} keeps omitted fields
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_content_partial(pool: PgPool) {
    let app = build_test_app(pool);
    let created = body_json(
        post_json(
            app.clone(),
            "/api/v1/contents",
            json!({"title": "Old", "image": "old.png"}),
        )
        .await,
    )
    .await;
    let id = created["id"].as_i64().unwrap();

    let response = put_json(
        app.clone(),
        &format!("/api/v1/contents/{id}"),
        json!({"title": "New"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["title"], "New");
    assert_eq!(json["image"], "old.png");

    let missing = put_json(app, "/api/v1/contents/999999", json!({"title": "X"})).await;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Test: DELETE /api/v1/contents/{id} returns 204 then 404
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_content(pool: PgPool) {
    let app = build_test_app(pool);
    let response = post_json(app.clone(), "/api/v1/contents", json!({"title": "Gone"})).await;
    let created = body_json(response).await;
    let id = created["id"].as_i64().unwrap();

    let response = delete(app.clone(), &format!("/api/v1/contents/{id}")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = delete(app.clone(), &format!("/api/v1/contents/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = get(app, &format!("/api/v1/contents/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
