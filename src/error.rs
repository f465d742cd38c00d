//! Error types for the citation/transcript API
//!
//! Every failure a request can hit is one of three kinds:
//! - a primary record that does not exist (404)
//! - a backing store that failed to answer (500)
//! - a request that ran past its deadline (500)

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;

/// Record kinds that can be the primary lookup of a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Chunk,
    File,
    Summary,
}

impl Entity {
    /// Static message returned to clients on 404
    pub fn not_found_message(&self) -> &'static str {
        match self {
            Entity::Chunk => "Chunk not found",
            Entity::File => "Speech file not found",
            Entity::Summary => "Summary not found",
        }
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entity::Chunk => write!(f, "chunk"),
            Entity::File => write!(f, "file"),
            Entity::Summary => write!(f, "summary"),
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{} not found", .0)]
    NotFound(Entity),

    #[error("{store} unavailable: {message}")]
    StoreUnavailable {
        store: &'static str,
        message: String,
    },

    #[error("Request timed out after {}ms", .timeout.as_millis())]
    Timeout { timeout: Duration },
}

impl AppError {
    pub fn store(store: &'static str, err: impl fmt::Display) -> Self {
        AppError::StoreUnavailable {
            store,
            message: err.to_string(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::StoreUnavailable { .. } | AppError::Timeout { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Body text sent to the client
    pub fn client_message(&self) -> String {
        match self {
            AppError::NotFound(entity) => entity.not_found_message().to_string(),
            other => other.to_string(),
        }
    }
}

/// JSON error body: `{"error": "..."}`
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: self.client_message(),
        };
        (self.status_code(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_maps_to_404() {
        let err = AppError::NotFound(Entity::File);
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.client_message(), "Speech file not found");
        assert_eq!(err.to_string(), "file not found");
    }

    #[test]
    fn test_store_failure_maps_to_500() {
        let err = AppError::store("cosmos", "connection refused");
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.client_message(), "cosmos unavailable: connection refused");
    }

    #[test]
    fn test_timeout_message() {
        let err = AppError::Timeout {
            timeout: Duration::from_millis(250),
        };
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "Request timed out after 250ms");
    }
}
