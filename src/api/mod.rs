//! API module for qrgate
//!
//! This module contains all HTTP API endpoints and server setup,
//! including the scan and example handlers, health checks, and request
//! handling middleware.

pub mod handlers;
pub mod health;
pub mod server;

pub use handlers::{example, scan};
pub use health::{
    build_info, health_check, health_monitor, probe_collaborators, ready_check, HealthState,
};
pub use server::{create_router, create_server, shutdown_signal};

use axum::extract::FromRef;
use std::sync::Arc;

use crate::config::{Config, ToolsConfig};
use crate::diagram::DiagramRenderer;
use crate::external::{
    GraphRenderer, GraphvizRenderer, QrDecoder, QrEncoder, QrencodeEncoder, ZbarDecoder,
};
use crate::scan::ScanService;
use crate::validators::ValidatorSet;

/// Build information populated at compile time
pub const BUILD_INFO: BuildInfo = BuildInfo {
    version: env!("CARGO_PKG_VERSION"),
    commit: match option_env!("GIT_COMMIT") {
        Some(commit) => commit,
        None => "unknown",
    },
    build_time: match option_env!("BUILD_TIME") {
        Some(time) => time,
        None => "unknown",
    },
    rust_version: match option_env!("RUSTC_VERSION") {
        Some(version) => version,
        None => "unknown",
    },
};

/// Build information structure
#[derive(Debug, Clone, serde::Serialize)]
pub struct BuildInfo {
    /// Application version from Cargo.toml
    pub version: &'static str,
    /// Git commit hash
    pub commit: &'static str,
    /// Build timestamp
    pub build_time: &'static str,
    /// Rust version used for compilation
    pub rust_version: &'static str,
}

/// Health check response
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct HealthResponse {
    /// Liveness flag
    pub ok: bool,
    /// Service status
    pub status: HealthStatus,
    /// Optional message
    pub message: Option<String>,
    /// Current timestamp
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Ready check response
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct ReadyResponse {
    /// Overall readiness status
    pub status: HealthStatus,
    /// Individual component checks
    pub checks: std::collections::HashMap<String, ComponentHealth>,
    /// Current timestamp
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Component health status
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ComponentHealth {
    /// Component status
    pub status: HealthStatus,
    /// Optional error message
    pub message: Option<String>,
    /// Last check timestamp
    pub last_check: chrono::DateTime<chrono::Utc>,
}

/// Health status enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    /// Service is healthy
    Healthy,
    /// Service is degraded but operational
    Degraded,
    /// Service is unhealthy
    Unhealthy,
}

impl HealthStatus {
    /// Check if the status is healthy
    pub fn is_healthy(&self) -> bool {
        matches!(self, HealthStatus::Healthy)
    }

    /// Convert to HTTP status code
    pub fn to_status_code(&self) -> axum::http::StatusCode {
        match self {
            HealthStatus::Healthy => axum::http::StatusCode::OK,
            HealthStatus::Degraded => axum::http::StatusCode::OK,
            HealthStatus::Unhealthy => axum::http::StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

/// The three external collaborators behind the HTTP surface
#[derive(Clone)]
pub struct Collaborators {
    pub decoder: Arc<dyn QrDecoder>,
    pub encoder: Arc<dyn QrEncoder>,
    pub renderer: Arc<dyn GraphRenderer>,
}

impl Collaborators {
    /// Process-backed collaborators built from the tool configuration
    pub fn from_config(tools: &ToolsConfig) -> Self {
        Self {
            decoder: Arc::new(ZbarDecoder::new(tools.decoder())),
            encoder: Arc::new(QrencodeEncoder::new(tools.encoder())),
            renderer: Arc::new(GraphvizRenderer::new(tools.renderer())),
        }
    }
}

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub scanner: ScanService,
    pub collaborators: Collaborators,
    pub health: Arc<HealthState>,
}

impl AppState {
    pub fn new(config: Arc<Config>, collaborators: Collaborators) -> Self {
        let diagrams = config
            .features
            .diagrams
            .then(|| DiagramRenderer::new(collaborators.renderer.clone()));
        let scanner = ScanService::new(
            Arc::new(ValidatorSet::new()),
            collaborators.decoder.clone(),
            diagrams,
        );

        Self {
            config,
            scanner,
            collaborators,
            health: Arc::new(HealthState::new()),
        }
    }
}

impl FromRef<AppState> for ScanService {
    fn from_ref(state: &AppState) -> Self {
        state.scanner.clone()
    }
}

impl FromRef<AppState> for Arc<HealthState> {
    fn from_ref(state: &AppState) -> Self {
        state.health.clone()
    }
}

impl FromRef<AppState> for Arc<dyn QrEncoder> {
    fn from_ref(state: &AppState) -> Self {
        state.collaborators.encoder.clone()
    }
}
