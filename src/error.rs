//! Error types for the order service
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == Cache Error Enum ==
/// Errors returned by the in-memory cache.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// Key not present in the cache
    #[error("item not found")]
    NotFound,

    /// Key present but its TTL has elapsed and it has not been swept yet
    #[error("item expired")]
    Expired,

    /// Attempt to store an empty value
    #[error("cannot set nil value")]
    NilValue,
}

// == Service Error Enum ==
/// Errors surfaced by the order lookup path.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Lookup called with an empty order identifier
    #[error("empty order uid")]
    EmptyIdentifier,

    /// Order is neither cached nor stored
    #[error("order not found: {0}")]
    NotFound(String),

    /// Storage or other unexpected failure
    #[error("internal error: {0}")]
    Internal(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ServiceError::EmptyIdentifier => (StatusCode::BAD_REQUEST, self.to_string()),
            ServiceError::NotFound(_) => (StatusCode::NOT_FOUND, self.to_string()),
            // Storage details stay in the logs
            ServiceError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal server error".to_string(),
            ),
        };

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}

// == Config Error Enum ==
/// Rejected configuration values.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

// == Result Type Alias ==
/// Convenience Result type for the lookup path.
pub type Result<T> = std::result::Result<T, ServiceError>;
