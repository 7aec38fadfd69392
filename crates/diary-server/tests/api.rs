// diary-server/tests/api.rs
use std::sync::Arc;
use std::time::Duration;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use diary_core::auth::{TokenKeys, TOKEN_TTL};
use diary_core::store::{FlatFileStore, Store};
use diary_core::{CredentialService, DiaryStore};
use diary_server::{router, AppState};

fn test_app(dir: &tempfile::TempDir) -> Router {
    let store: Arc<dyn Store> =
        Arc::new(FlatFileStore::open(dir.path(), Duration::from_secs(5)).unwrap());
    let keys = TokenKeys::new(b"api-test-secret", TOKEN_TTL);
    router::create_router(AppState {
        credentials: Arc::new(CredentialService::new(store.clone(), keys)),
        diaries: Arc::new(DiaryStore::new(store)),
    })
}

fn json_request(method: &str, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header("x-auth-token", token);
    }
    builder
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn register_then_crud_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(&dir);

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/auth/register",
            None,
            json!({ "username": "ada", "password": "hunter2hunter2" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let token = body["token"].as_str().unwrap().to_string();
    assert_eq!(body["user"]["username"], "ada");

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/diaries",
            Some(&token),
            json!({ "content": "dear diary" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let entry = body_json(response).await;
    let entry_id = entry["id"].as_str().unwrap().to_string();
    assert_eq!(entry["content"], "dear diary");

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/api/diaries/{entry_id}"),
            Some(&token),
            json!({ "content": "revised" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(json_request("GET", "/api/diaries", Some(&token), json!({})))
        .await
        .unwrap();
    let listed = body_json(response).await;
    assert_eq!(listed.as_array().unwrap().len(), 1);
    assert_eq!(listed[0]["content"], "revised");

    let response = app
        .clone()
        .oneshot(json_request(
            "DELETE",
            &format!("/api/diaries/{entry_id}"),
            Some(&token),
            json!({}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(json_request(
            "GET",
            &format!("/api/diaries/{entry_id}"),
            Some(&token),
            json!({}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn missing_and_bad_tokens_are_unauthorized() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(&dir);

    let response = app
        .clone()
        .oneshot(json_request("GET", "/api/diaries", None, json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .oneshot(json_request(
            "GET",
            "/api/diaries",
            Some("not.a.token"),
            json!({}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn unreadable_token_header_is_invalid_not_missing() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(&dir);

    let mut request = json_request("GET", "/api/diaries", None, json!({}));
    // Non-ASCII bytes are legal in a header value but not decodable as a
    // token string.
    request.headers_mut().insert(
        "x-auth-token",
        axum::http::HeaderValue::from_bytes("s\u{00e9}ance".as_bytes()).unwrap(),
    );

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["msg"], "invalid session token");
}

#[tokio::test]
async fn owners_cannot_see_each_other() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(&dir);

    let mut tokens = Vec::new();
    for name in ["alice", "bob"] {
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/auth/register",
                None,
                json!({ "username": name, "password": "a long password" }),
            ))
            .await
            .unwrap();
        let body = body_json(response).await;
        tokens.push(body["token"].as_str().unwrap().to_string());
    }

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/diaries",
            Some(&tokens[0]),
            json!({ "content": "alice only" }),
        ))
        .await
        .unwrap();
    let entry = body_json(response).await;
    let entry_id = entry["id"].as_str().unwrap();

    let response = app
        .clone()
        .oneshot(json_request(
            "GET",
            &format!("/api/diaries/{entry_id}"),
            Some(&tokens[1]),
            json!({}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn duplicate_registration_is_a_bad_request() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(&dir);

    let request = || {
        json_request(
            "POST",
            "/api/auth/register",
            None,
            json!({ "username": "ada", "password": "hunter2hunter2" }),
        )
    };
    let first = app.clone().oneshot(request()).await.unwrap();
    assert_eq!(first.status(), StatusCode::OK);
    let second = app.oneshot(request()).await.unwrap();
    assert_eq!(second.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn liveness_probe() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(&dir);

    let response = app
        .oneshot(Request::builder().uri("/api/test").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "success");
}
