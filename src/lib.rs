//! qrgate library
//!
//! Validates QR payloads with two strategies: an explicit field-by-field
//! walk that records every checkpoint, and a single precompiled pattern.
//! The library exposes the validators, diagram rendering, external tool
//! wrappers and the HTTP surface for integration tests and embedding.

pub mod api;
pub mod config;
pub mod diagram;
pub mod error;
pub mod external;
pub mod logging;
pub mod models;
pub mod scan;
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
pub mod validators;

// Re-export commonly used types at the crate root
pub use config::Config;
pub use error::{Error, Result};

// Re-export model types
pub use models::{
    ExtractedData, PayloadType, Schema, Strategy, ValidationError, ValidationErrorKind,
    ValidationResult, WifiAuth,
};

// Re-export validators and the scan pipeline
pub use scan::{ScanItem, ScanReport, ScanService};
pub use validators::{Validator, ValidatorSet};

// Re-export API server functions
pub use api::server::{create_router, create_server, shutdown_signal};

// Re-export health check types
pub use api::{
    AppState, BuildInfo, Collaborators, ComponentHealth, HealthResponse, HealthState,
    HealthStatus, ReadyResponse,
};
