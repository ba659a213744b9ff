//! Error types for the key-value store layer
//!
//! Provides unified error handling using thiserror. Store errors never reach
//! callers of the cache accessor; they surface only from the store bindings
//! themselves and from the development server's HTTP handlers.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Store Error Enum ==
/// Unified error type for key-value store operations.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Transport failure talking to a remote store
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Payload could not be encoded or decoded
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Store settings are present but unusable
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Command or argument rejected by the store
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Missing or wrong access token
    #[error("Unauthorized")]
    Unauthorized,

    /// Remote store reported an error
    #[error("Server error: {0}")]
    Server(String),

    /// Remote store answered with something other than the expected shape
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Store call exceeded its time budget
    #[error("Store operation timed out")]
    Timeout,
}

// == IntoResponse Implementation ==
impl IntoResponse for StoreError {
    fn into_response(self) -> Response {
        let status = match &self {
            StoreError::InvalidRequest(_) | StoreError::Json(_) => StatusCode::BAD_REQUEST,
            StoreError::Unauthorized => StatusCode::UNAUTHORIZED,
            StoreError::Http(_) | StoreError::Server(_) | StoreError::InvalidResponse(_) => {
                StatusCode::BAD_GATEWAY
            }
            StoreError::Timeout => StatusCode::GATEWAY_TIMEOUT,
            StoreError::InvalidConfig(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        // The REST protocol reports the bare message for rejected commands
        let message = match self {
            StoreError::InvalidRequest(msg) => msg,
            other => other.to_string(),
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
