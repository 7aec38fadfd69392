// ============================
// diary-server/src/error.rs
// ============================
//! Core failure kinds mapped to HTTP responses.
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use diary_core::Error;

/// Wrapper turning a core failure kind into a transport response. The
/// body carries only the kind's display string, never internals.
#[derive(Debug)]
pub struct ApiError(pub Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

impl ApiError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self.0 {
            Error::DuplicateUsername | Error::InvalidCredentials | Error::EmptyContent => {
                StatusCode::BAD_REQUEST
            }
            Error::MissingToken | Error::InvalidToken | Error::ExpiredToken => {
                StatusCode::UNAUTHORIZED
            }
            Error::NotFound => StatusCode::NOT_FOUND,
            Error::StoreUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            Error::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({ "msg": self.0.to_string() });
        (self.status_code(), Json(body)).into_response()
    }
}
