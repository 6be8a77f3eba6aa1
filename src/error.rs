//! Error handling module for qrgate
//!
//! This module defines the service-level error type and its HTTP mapping.
//! A rejected payload is not an error: it is a normal `ValidationResult`.
//! Errors here are about the request itself or the collaborators behind it.

use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::external::CollaboratorError;

/// Result type alias for qrgate operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for qrgate
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Malformed request
    #[error("Validation error: {0}")]
    Validation(String),

    /// A decode/encode collaborator is not installed
    #[error("Collaborator unavailable: {0}")]
    CollaboratorUnavailable(String),

    /// A collaborator ran but failed on a path where its output is required
    #[error("Collaborator failed: {0}")]
    Collaborator(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic internal errors
    #[error("Internal error: {0}")]
    Internal(String),

    /// Not found errors
    #[error("Not found: {0}")]
    NotFound(String),

    /// Timeout errors
    #[error("Operation timed out: {0}")]
    Timeout(String),

    /// Shutdown in progress
    #[error("Service is shutting down")]
    ShuttingDown,
}

impl Error {
    /// Create a configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Error::Config(msg.into())
    }

    /// Create a validation error
    pub fn validation<S: Into<String>>(msg: S) -> Self {
        Error::Validation(msg.into())
    }

    /// Create an internal error
    pub fn internal<S: Into<String>>(msg: S) -> Self {
        Error::Internal(msg.into())
    }

    /// Get the appropriate HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::Validation(_) => StatusCode::BAD_REQUEST,
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
            Error::CollaboratorUnavailable(_) | Error::ShuttingDown => {
                StatusCode::SERVICE_UNAVAILABLE
            },
            Error::Collaborator(_) => StatusCode::BAD_GATEWAY,
            Error::Config(_) | Error::Serialization(_) | Error::Io(_) | Error::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            },
        }
    }
}

/// Implement IntoResponse for automatic error responses in Axum
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let body = Json(json!({
            "error": {
                "message": self.to_string(),
                "type": error_type(&self),
                "status": status.as_u16(),
            }
        }));

        // Log error based on severity
        match status {
            StatusCode::INTERNAL_SERVER_ERROR
            | StatusCode::SERVICE_UNAVAILABLE
            | StatusCode::BAD_GATEWAY => {
                tracing::error!(error = ?self, "Internal server error");
            },
            StatusCode::BAD_REQUEST | StatusCode::NOT_FOUND => {
                tracing::warn!(error = ?self, "Client error");
            },
            _ => {
                tracing::info!(error = ?self, "Request error");
            },
        }

        (status, body).into_response()
    }
}

/// Get a string representation of the error type
fn error_type(error: &Error) -> &'static str {
    match error {
        Error::Config(_) => "configuration_error",
        Error::Validation(_) => "validation_error",
        Error::CollaboratorUnavailable(_) => "collaborator_unavailable",
        Error::Collaborator(_) => "collaborator_error",
        Error::Serialization(_) => "serialization_error",
        Error::Io(_) => "io_error",
        Error::Internal(_) => "internal_error",
        Error::NotFound(_) => "not_found",
        Error::Timeout(_) => "timeout",
        Error::ShuttingDown => "shutting_down",
    }
}

impl From<CollaboratorError> for Error {
    fn from(err: CollaboratorError) -> Self {
        match err {
            CollaboratorError::Unavailable { .. } => Error::CollaboratorUnavailable(err.to_string()),
            CollaboratorError::Timeout { .. } => Error::Timeout(err.to_string()),
            CollaboratorError::Failed { .. } | CollaboratorError::Io { .. } => {
                Error::Collaborator(err.to_string())
            },
        }
    }
}

impl From<MultipartError> for Error {
    fn from(err: MultipartError) -> Self {
        Error::Validation(format!("Malformed upload: {}", err.body_text()))
    }
}

/// Convert from envconfig::Error to our Error type
impl From<envconfig::Error> for Error {
    fn from(err: envconfig::Error) -> Self {
        Error::Config(err.to_string())
    }
}
