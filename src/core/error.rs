//! Error type system for the Kicks admin backend
//!
//! This module provides the error type used across the system with:
//! - HTTP status code mapping
//! - JSON error responses with trace IDs
//! - Integration with Axum via `IntoResponse`

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Main error type for the Kicks admin backend
#[derive(Debug, thiserror::Error)]
pub enum KicksError {
    // System-level errors
    #[error("System initialization failed: {0}")]
    InitializationError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Database error: {0}")]
    DatabaseError(#[from] rusqlite::Error),

    // API-level errors
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("An admin with email '{0}' already exists")]
    DuplicateEmail(String),

    #[error("Authentication failed: {0}")]
    AuthenticationError(String),

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Token expired")]
    TokenExpired,

    #[error("Resource not found: {0}")]
    NotFound(String),

    // I/O and serialization errors
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    // Background work errors
    #[error("Task error: {0}")]
    TaskError(String),
}

impl KicksError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            // 400 Bad Request
            KicksError::ValidationError(_)
            | KicksError::SerializationError(_)
            | KicksError::DuplicateEmail(_) => StatusCode::BAD_REQUEST,

            // 401 Unauthorized
            KicksError::AuthenticationError(_) => StatusCode::UNAUTHORIZED,

            // 403 Forbidden
            KicksError::InvalidToken(_) | KicksError::TokenExpired => StatusCode::FORBIDDEN,

            // 404 Not Found
            KicksError::NotFound(_) => StatusCode::NOT_FOUND,

            // 500 Internal Server Error
            KicksError::InitializationError(_)
            | KicksError::ConfigError(_)
            | KicksError::DatabaseError(_)
            | KicksError::IoError(_)
            | KicksError::TaskError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error type name for API responses
    pub fn error_type(&self) -> &'static str {
        match self {
            KicksError::InitializationError(_) => "InitializationError",
            KicksError::ConfigError(_) => "ConfigError",
            KicksError::DatabaseError(_) => "DatabaseError",
            KicksError::ValidationError(_) => "ValidationError",
            KicksError::DuplicateEmail(_) => "DuplicateEmail",
            KicksError::AuthenticationError(_) => "AuthenticationError",
            KicksError::InvalidToken(_) => "InvalidToken",
            KicksError::TokenExpired => "TokenExpired",
            KicksError::NotFound(_) => "NotFound",
            KicksError::IoError(_) => "IoError",
            KicksError::SerializationError(_) => "SerializationError",
            KicksError::TaskError(_) => "TaskError",
        }
    }
}

/// Error response structure for API endpoints
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error type identifier
    pub error: String,
    /// Human-readable error message
    pub message: String,
    /// Unique trace ID for this error
    pub trace_id: String,
}

impl ErrorResponse {
    /// Create a new error response with a generated trace ID
    pub fn new(error: String, message: String) -> Self {
        Self {
            error,
            message,
            trace_id: Uuid::new_v4().to_string(),
        }
    }

    /// Create an error response from a KicksError
    pub fn from_error(error: &KicksError) -> Self {
        Self::new(error.error_type().to_string(), error.to_string())
    }
}

/// Implement IntoResponse for KicksError to enable automatic error handling in Axum
impl IntoResponse for KicksError {
    fn into_response(self) -> Response {
        let status_code = self.status_code();
        let mut error_response = ErrorResponse::from_error(&self);

        // Log the error with trace ID; 5xx detail stays server-side
        tracing::error!(
            error_type = self.error_type(),
            trace_id = %error_response.trace_id,
            status_code = %status_code,
            "Request failed: {}",
            self
        );

        if status_code.is_server_error() {
            error_response.message = "Internal server error".to_string();
        }

        (status_code, Json(error_response)).into_response()
    }
}

/// Result type alias for operations that can fail with KicksError
pub type Result<T> = std::result::Result<T, KicksError>;
