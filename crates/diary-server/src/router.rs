// ============================
// diary-server/src/router.rs
// ============================
//! Routes and handlers. The token travels in the `x-auth-token` header;
//! every diary handler resolves it to an owner id before touching the
//! store.

use axum::{
    extract::{Path, State},
    http::HeaderMap,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use uuid::Uuid;

use diary_core::model::DiaryEntry;
use diary_core::Error;

use crate::error::ApiError;
use crate::AppState;

const TOKEN_HEADER: &str = "x-auth-token";

#[derive(Deserialize)]
struct CredentialsBody {
    #[serde(default)]
    username: String,
    #[serde(default)]
    password: String,
}

#[derive(Deserialize)]
struct EntryBody {
    #[serde(default)]
    content: String,
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/test", get(liveness))
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login))
        .route("/api/diaries", get(list_entries).post(create_entry))
        .route(
            "/api/diaries/{id}",
            get(get_entry).put(update_entry).delete(delete_entry),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Resolve the acting identity from the request headers. A header that
/// is present but not readable as a string is an invalid token, not a
/// missing one.
fn identity(state: &AppState, headers: &HeaderMap) -> Result<Uuid, ApiError> {
    let token = match headers.get(TOKEN_HEADER) {
        Some(value) => Some(value.to_str().map_err(|_| ApiError(Error::InvalidToken))?),
        None => None,
    };
    Ok(state.credentials.verify_token(token)?)
}

async fn liveness() -> Json<Value> {
    Json(json!({ "msg": "API working", "status": "success" }))
}

async fn register(
    State(state): State<AppState>,
    Json(body): Json<CredentialsBody>,
) -> Result<Json<Value>, ApiError> {
    let auth = state
        .credentials
        .register(&body.username, &body.password)
        .await?;
    Ok(Json(json!({ "token": auth.token, "user": auth.account })))
}

async fn login(
    State(state): State<AppState>,
    Json(body): Json<CredentialsBody>,
) -> Result<Json<Value>, ApiError> {
    let auth = state
        .credentials
        .login(&body.username, &body.password)
        .await?;
    Ok(Json(json!({ "token": auth.token, "user": auth.account })))
}

async fn list_entries(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<DiaryEntry>>, ApiError> {
    let owner = identity(&state, &headers)?;
    Ok(Json(state.diaries.list(owner).await?))
}

async fn create_entry(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<EntryBody>,
) -> Result<Json<DiaryEntry>, ApiError> {
    let owner = identity(&state, &headers)?;
    Ok(Json(state.diaries.create(owner, &body.content).await?))
}

async fn get_entry(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<Json<DiaryEntry>, ApiError> {
    let owner = identity(&state, &headers)?;
    Ok(Json(state.diaries.get(owner, id).await?))
}

async fn update_entry(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    Json(body): Json<EntryBody>,
) -> Result<Json<DiaryEntry>, ApiError> {
    let owner = identity(&state, &headers)?;
    Ok(Json(state.diaries.update(owner, id, &body.content).await?))
}

async fn delete_entry(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    let owner = identity(&state, &headers)?;
    state.diaries.delete(owner, id).await?;
    Ok(Json(json!({ "msg": "entry deleted" })))
}
