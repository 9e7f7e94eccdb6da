use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum PulseError {
    #[error("HTTP request error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("invalid commit timestamp: {0}")]
    Timestamp(#[from] chrono::ParseError),

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

impl IntoResponse for PulseError {
    fn into_response(self) -> axum::response::Response {
        let (status, code) = match &self {
            // Upstream API unreachable or returned a non-success status.
            PulseError::Reqwest(_) => (StatusCode::BAD_GATEWAY, "BAD_GATEWAY"),
            // Upstream payload carried a timestamp outside the fixed format.
            PulseError::Timestamp(_) => (StatusCode::BAD_GATEWAY, "BAD_UPSTREAM_PAYLOAD"),
            PulseError::Database(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
            PulseError::InvalidParameter(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
        };
        let body = ApiErrorBody {
            code: code.to_string(),
            message: self.to_string(),
        };
        (status, Json(ApiErrorResponse { error: body })).into_response()
    }
}

/// Standardized API error response body
#[derive(Serialize)]
pub struct ApiErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Serialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}
