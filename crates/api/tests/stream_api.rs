//! HTTP-level integration tests for the `/streams` resource.

mod common;

use axum::http::StatusCode;
use common::{
    authed_user, body_json, delete_auth, get_auth, post_json_auth, put_json_auth,
};
use sqlx::PgPool;

fn stream_body(name: &str) -> serde_json::Value {
    serde_json::json!({
        "name": name,
        "rtsp_url": "rtsp://camera.local/live",
        "description": "front door"
    })
}

/// Creating a stream is admin-only.
#[sqlx::test(migrations = "../db/migrations")]
async fn create_stream_requires_admin(pool: PgPool) {
    let (_admin, admin_token) = authed_user(&pool, "Root", "root@x.com", "admin").await;
    let (_user, user_token) = authed_user(&pool, "U", "u@x.com", "user").await;

    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        "/streams",
        &user_token,
        stream_body("denied"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Admin privileges required");

    let response = post_json_auth(
        common::build_test_app(pool),
        "/streams",
        &admin_token,
        stream_body("lobby"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["name"], "lobby");
    assert_eq!(json["rtsp_url"], "rtsp://camera.local/live");
    assert!(json["id"].is_string());
}

/// Any authenticated user may list and read streams.
#[sqlx::test(migrations = "../db/migrations")]
async fn list_and_get_streams_open_to_any_user(pool: PgPool) {
    let (_admin, admin_token) = authed_user(&pool, "Root", "root@x.com", "admin").await;
    let (_user, user_token) = authed_user(&pool, "U", "u@x.com", "user").await;

    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        "/streams",
        &admin_token,
        stream_body("lobby"),
    )
    .await;
    let created = body_json(response).await;
    let id = created["id"].as_str().unwrap().to_string();

    let response = get_auth(common::build_test_app(pool.clone()), "/streams", &user_token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json.as_array().unwrap().len(), 1);

    let response = get_auth(
        common::build_test_app(pool),
        &format!("/streams/{id}"),
        &user_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["name"], "lobby");
}

/// Reading a missing stream is a 404.
#[sqlx::test(migrations = "../db/migrations")]
async fn get_missing_stream_returns_404(pool: PgPool) {
    let (_user, token) = authed_user(&pool, "U", "u@x.com", "user").await;

    let response = get_auth(common::build_test_app(pool), "/streams/9999", &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// Updating a stream is admin-only and is a full replace.
#[sqlx::test(migrations = "../db/migrations")]
async fn update_stream_requires_admin(pool: PgPool) {
    let (_admin, admin_token) = authed_user(&pool, "Root", "root@x.com", "admin").await;
    let (_user, user_token) = authed_user(&pool, "U", "u@x.com", "user").await;

    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        "/streams",
        &admin_token,
        stream_body("old"),
    )
    .await;
    let created = body_json(response).await;
    let id = created["id"].as_str().unwrap().to_string();

    let replacement = serde_json::json!({ "name": "new" });

    let response = put_json_auth(
        common::build_test_app(pool.clone()),
        &format!("/streams/{id}"),
        &user_token,
        replacement.clone(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = put_json_auth(
        common::build_test_app(pool.clone()),
        &format!("/streams/{id}"),
        &admin_token,
        replacement,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["name"], "new");
    // Full replace: omitted optional fields are cleared.
    assert!(json["rtsp_url"].is_null());

    let response = put_json_auth(
        common::build_test_app(pool),
        "/streams/9999",
        &admin_token,
        serde_json::json!({ "name": "ghost" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// Stream deletion is admin-only and idempotent: 204 even for a missing id.
#[sqlx::test(migrations = "../db/migrations")]
async fn delete_stream_is_idempotent(pool: PgPool) {
    let (_admin, admin_token) = authed_user(&pool, "Root", "root@x.com", "admin").await;
    let (_user, user_token) = authed_user(&pool, "U", "u@x.com", "user").await;

    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        "/streams",
        &admin_token,
        stream_body("doomed"),
    )
    .await;
    let created = body_json(response).await;
    let id = created["id"].as_str().unwrap().to_string();

    let response = delete_auth(
        common::build_test_app(pool.clone()),
        &format!("/streams/{id}"),
        &user_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = delete_auth(
        common::build_test_app(pool.clone()),
        &format!("/streams/{id}"),
        &admin_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // Second delete of the same id still reports success.
    let response = delete_auth(
        common::build_test_app(pool),
        &format!("/streams/{id}"),
        &admin_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

/// Deleting a stream removes its attached overlays but not user-owned ones.
#[sqlx::test(migrations = "../db/migrations")]
async fn delete_stream_cascades_to_attached_overlays(pool: PgPool) {
    let (_admin, admin_token) = authed_user(&pool, "Root", "root@x.com", "admin").await;
    let (_user, user_token) = authed_user(&pool, "U", "u@x.com", "user").await;

    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        "/streams",
        &admin_token,
        stream_body("lobby"),
    )
    .await;
    let created = body_json(response).await;
    let stream_id = created["id"].as_str().unwrap().to_string();

    // One stream-attached overlay, one user-owned overlay.
    let body = serde_json::json!({ "type": "banner", "stream_id": stream_id });
    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        "/overlays",
        &admin_token,
        body,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = serde_json::json!({ "type": "text", "content": "mine" });
    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        "/overlays",
        &user_token,
        body,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = delete_auth(
        common::build_test_app(pool.clone()),
        &format!("/streams/{stream_id}"),
        &admin_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get_auth(common::build_test_app(pool), "/overlays", &user_token).await;
    let json = body_json(response).await;
    let overlays = json.as_array().unwrap();
    assert_eq!(overlays.len(), 1);
    assert_eq!(overlays[0]["type"], "text");
}

/// A non-numeric path id never reaches the store.
#[sqlx::test(migrations = "../db/migrations")]
async fn malformed_stream_id_returns_400(pool: PgPool) {
    let (_user, token) = authed_user(&pool, "U", "u@x.com", "user").await;

    let response = get_auth(common::build_test_app(pool), "/streams/not-a-number", &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
