//! Health check endpoints for qrgate
//!
//! This module implements liveness, readiness and build info endpoints.
//! Readiness reflects the last probe of each external collaborator.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use crate::api::{
    Collaborators, ComponentHealth, HealthResponse, HealthStatus, ReadyResponse, BUILD_INFO,
};
use crate::external::CollaboratorResult;

/// Application state for health checks
#[derive(Clone)]
pub struct HealthState {
    /// Shared state for component health tracking
    pub components: Arc<tokio::sync::RwLock<HashMap<String, ComponentHealth>>>,
}

impl HealthState {
    /// Create a new health state
    pub fn new() -> Self {
        Self {
            components: Arc::new(tokio::sync::RwLock::new(HashMap::new())),
        }
    }

    /// Update component health status
    pub async fn update_component(
        &self,
        name: String,
        status: HealthStatus,
        message: Option<String>,
    ) {
        let mut components = self.components.write().await;
        components.insert(
            name,
            ComponentHealth {
                status,
                message,
                last_check: Utc::now(),
            },
        );
    }

    /// Get overall health status
    pub async fn get_status(&self) -> HealthStatus {
        let components = self.components.read().await;

        // If any component is unhealthy, overall status is unhealthy
        if components.values().any(|c| c.status == HealthStatus::Unhealthy) {
            return HealthStatus::Unhealthy;
        }

        // If any component is degraded, overall status is degraded
        if components.values().any(|c| c.status == HealthStatus::Degraded) {
            return HealthStatus::Degraded;
        }

        HealthStatus::Healthy
    }
}

impl Default for HealthState {
    fn default() -> Self {
        Self::new()
    }
}

/// Basic liveness check endpoint
///
/// Returns 200 OK if the service is alive.
/// This endpoint does not check external tools.
///
/// # Example
/// ```text
/// GET /health
/// ```
pub async fn health_check() -> Response {
    let response = HealthResponse {
        ok: true,
        status: HealthStatus::Healthy,
        message: Some("Service is running".to_string()),
        timestamp: Utc::now(),
    };

    (StatusCode::OK, Json(response)).into_response()
}

/// Readiness check endpoint
///
/// Reports the decoder, encoder and renderer as seen by the last probe.
///
/// # Example
/// ```text
/// GET /readyz
/// ```
pub async fn ready_check(State(state): State<Arc<HealthState>>) -> Response {
    let components = state.components.read().await.clone();
    let overall_status = state.get_status().await;

    let response = ReadyResponse {
        status: overall_status,
        checks: components,
        timestamp: Utc::now(),
    };

    let status_code = overall_status.to_status_code();
    (status_code, Json(response)).into_response()
}

/// Build information endpoint
///
/// # Example
/// ```text
/// GET /build
/// ```
pub async fn build_info() -> Response {
    (StatusCode::OK, Json(&BUILD_INFO)).into_response()
}

/// Turn a probe outcome into a component health entry
///
/// `required` components go unhealthy on failure, optional ones degraded.
fn component_health(probe: CollaboratorResult<()>, required: bool) -> ComponentHealth {
    let (status, message) = match probe {
        Ok(()) => (HealthStatus::Healthy, Some("Available".to_string())),
        Err(e) if required => (HealthStatus::Unhealthy, Some(e.to_string())),
        Err(e) => (HealthStatus::Degraded, Some(e.to_string())),
    };

    ComponentHealth {
        status,
        message,
        last_check: Utc::now(),
    }
}

/// Probe every collaborator once and record the outcome
pub async fn probe_collaborators(state: &HealthState, collaborators: &Collaborators) {
    let checks = [
        ("decoder", component_health(collaborators.decoder.probe().await, true)),
        ("encoder", component_health(collaborators.encoder.probe().await, true)),
        ("renderer", component_health(collaborators.renderer.probe().await, false)),
    ];

    for (name, health) in checks {
        if health.status != HealthStatus::Healthy {
            tracing::warn!(
                component = name,
                status = ?health.status,
                detail = health.message.as_deref().unwrap_or_default(),
                "Collaborator check failed"
            );
        }
        state
            .update_component(name.to_string(), health.status, health.message)
            .await;
    }
}

/// Background task to periodically update component health
pub async fn health_monitor(
    state: Arc<HealthState>,
    collaborators: Collaborators,
    period: Duration,
) {
    let mut interval = tokio::time::interval(period);

    loop {
        interval.tick().await;
        probe_collaborators(&state, &collaborators).await;
        tracing::debug!("Health check completed");
    }
}
