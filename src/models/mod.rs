//! Data models for qrgate
//!
//! This module contains the domain models shared by the validators, the
//! diagram renderer and the HTTP layer.

pub mod error;
pub mod payload;
pub mod result;
pub mod schema;

// Re-export commonly used types
pub use error::{PayloadError, ValidationError, ValidationErrorKind, WifiError};
pub use payload::{
    example_invalid_payload, example_valid_payload, ExampleKind, PayloadType, WifiAuth,
};
pub use result::{CustomFields, ExtractedData, Trace, ValidationResult, WifiFields};
pub use schema::{Schema, Strategy, WIFI_PREFIX};
