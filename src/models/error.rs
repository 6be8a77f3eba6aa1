//! Validation error types for qrgate models
//!
//! Two families live here. `PayloadError` and `WifiError` describe why a
//! decoded payload was rejected; their display strings are the messages
//! reported in a rejected `ValidationResult`. `ValidationError` describes a
//! malformed request (bad mode, missing upload) and maps to a 400 response.

use std::fmt;
use thiserror::Error;

/// Rejection reasons for the custom colon-delimited payload
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PayloadError {
    #[error("Expected 5 parts, got {0}")]
    PartCount(usize),

    #[error("Invalid TYPE: {0}")]
    InvalidType(String),

    #[error("Invalid UUID: {0}")]
    InvalidUuid(String),

    #[error("Invalid VERSION: {0}")]
    InvalidVersion(String),

    #[error("Invalid TIMESTAMP: {0}")]
    InvalidTimestamp(String),

    #[error("Invalid DATA")]
    InvalidData,

    #[error("Invalid pair: {0}")]
    InvalidPair(String),

    /// Single-pattern strategy gives no field-level detail
    #[error("Pattern mismatch")]
    PatternMismatch,
}

/// Rejection reasons for the Wi-Fi configuration payload
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WifiError {
    #[error("Missing WIFI: prefix")]
    MissingPrefix,

    #[error("Missing SSID")]
    MissingSsid,

    #[error("Invalid auth: {0}")]
    InvalidAuth(String),

    #[error("Password required")]
    PasswordRequired,

    #[error("Invalid H value")]
    InvalidHidden,
}

impl WifiError {
    /// Message without the offending value
    pub fn brief(&self) -> String {
        match self {
            WifiError::InvalidAuth(_) => "Invalid auth".to_string(),
            other => other.to_string(),
        }
    }
}

/// Request-level validation error
#[derive(Error, Debug, Clone)]
pub struct ValidationError {
    /// The kind of validation error
    pub kind: ValidationErrorKind,
    /// The request field that failed validation
    pub field: String,
    /// Optional additional context
    pub context: Option<String>,
}

impl ValidationError {
    /// Create a new validation error
    pub fn new(kind: ValidationErrorKind, field: impl Into<String>) -> Self {
        Self {
            kind,
            field: field.into(),
            context: None,
        }
    }

    /// Create a validation error with additional context
    pub fn with_context(
        kind: ValidationErrorKind,
        field: impl Into<String>,
        context: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            field: field.into(),
            context: Some(context.into()),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.context {
            Some(ctx) => write!(
                f,
                "Validation failed for field '{}': {} - {}",
                self.field, self.kind, ctx
            ),
            None => write!(
                f,
                "Validation failed for field '{}': {}",
                self.field, self.kind
            ),
        }
    }
}

/// Specific request validation failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Unknown validation mode
    #[error("Invalid mode (expected: DFA or NFA)")]
    InvalidMode,

    /// Field is required but missing
    #[error("Required field is missing")]
    RequiredField,

    /// Malformed multipart body
    #[error("Malformed upload")]
    MalformedUpload,
}

impl From<ValidationError> for crate::error::Error {
    fn from(err: ValidationError) -> Self {
        crate::error::Error::validation(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_error_messages() {
        assert_eq!(PayloadError::PartCount(3).to_string(), "Expected 5 parts, got 3");
        assert_eq!(
            PayloadError::InvalidType("coupon".into()).to_string(),
            "Invalid TYPE: coupon"
        );
        assert_eq!(PayloadError::InvalidData.to_string(), "Invalid DATA");
        assert_eq!(PayloadError::InvalidPair("seat".into()).to_string(), "Invalid pair: seat");
        assert_eq!(PayloadError::PatternMismatch.to_string(), "Pattern mismatch");
    }

    #[test]
    fn test_wifi_error_brief() {
        let err = WifiError::InvalidAuth("WPA9".into());
        assert_eq!(err.to_string(), "Invalid auth: WPA9");
        assert_eq!(err.brief(), "Invalid auth");
        assert_eq!(WifiError::MissingSsid.brief(), "Missing SSID");
    }

    #[test]
    fn test_validation_error_display() {
        let error = ValidationError::new(ValidationErrorKind::RequiredField, "file");
        let display = error.to_string();
        assert!(display.contains("file"));
        assert!(display.contains("Required field"));

        let error = ValidationError::with_context(
            ValidationErrorKind::InvalidMode,
            "mode",
            "Unknown mode: XYZ",
        );
        assert_eq!(error.context.as_deref(), Some("Unknown mode: XYZ"));
    }

    #[test]
    fn test_into_service_error() {
        let err: crate::error::Error =
            ValidationError::new(ValidationErrorKind::MalformedUpload, "file").into();
        assert!(matches!(err, crate::error::Error::Validation(_)));
    }
}
