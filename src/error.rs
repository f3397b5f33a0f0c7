//! Error types for the stage cache
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache, the registry and the HTTP layer.
///
/// A miss or an expired entry is not an error inside the cache; `KeyNotFound`
/// only exists so the HTTP layer can answer 404.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// Rejected construction parameter (e.g. zero capacity)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Rejected operation argument (e.g. zero TTL, oversized key)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// No live value for the key
    #[error("Key not found: {0}")]
    KeyNotFound(String),

    /// Stage has never been written to or created
    #[error("Stage not found: {0}")]
    StageNotFound(String),

    /// Registry already holds its maximum number of stages
    #[error("Stage limit reached: {0}")]
    StageLimitReached(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        let status = match &self {
            CacheError::Configuration(_) => StatusCode::BAD_REQUEST,
            CacheError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            CacheError::KeyNotFound(_) => StatusCode::NOT_FOUND,
            CacheError::StageNotFound(_) => StatusCode::NOT_FOUND,
            CacheError::StageLimitReached(_) => StatusCode::CONFLICT,
            CacheError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the stage cache.
pub type Result<T> = std::result::Result<T, CacheError>;
