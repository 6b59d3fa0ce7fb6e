use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Route-level errors. Everything a handler can fail with collapses into a
/// JSON `{"error": ...}` body with a non-2xx status; transient and permanent
/// upstream failures are not distinguished beyond the status class.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("spotify auth failed: {0}")]
    SpotifyAuth(String),
    #[error("spotify api error: {0}")]
    Spotify(String),
    #[error("apple music api error: {0}")]
    AppleMusic(String),
    #[error("apple music credentials are not configured")]
    AppleMusicUnconfigured,
    #[error("apple music token error: {0}")]
    AppleMusicToken(#[from] jsonwebtoken::errors::Error),
    #[error("warehouse error: {0}")]
    Warehouse(String),
    #[error("upstream request failed: {0}")]
    Upstream(#[from] reqwest::Error),
}

impl ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::AppleMusicUnconfigured => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::SpotifyAuth(_)
            | ApiError::Spotify(_)
            | ApiError::AppleMusic(_)
            | ApiError::Upstream(_) => StatusCode::BAD_GATEWAY,
            ApiError::AppleMusicToken(_) | ApiError::Warehouse(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        tracing::error!(%status, error = %self, "request failed");
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
