use crate::cache::CacheConfigError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Main error type for news operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NewsError {
    #[error("News not found: {0}")]
    NotFound(i64),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Cache configuration error: {0}")]
    Config(#[from] CacheConfigError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl NewsError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Self::Config(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Short label used for metrics
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "not_found",
            Self::InvalidRequest(_) => "invalid",
            Self::Config(_) => "config",
            Self::Internal(_) => "internal",
        }
    }
}

/// Implement IntoResponse for Axum integration
impl IntoResponse for NewsError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(json!({
            "error": self.to_string(),
            "code": status.as_u16(),
        }));

        (status, body).into_response()
    }
}

/// Result type alias for news operations
pub type Result<T> = std::result::Result<T, NewsError>;
