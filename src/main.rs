//! qrgate - QR payload validation service
//!
//! Accepts uploaded images, decodes every QR symbol in them and validates
//! each payload as either a custom ticket-like record or a Wi-Fi
//! configuration, returning the checkpoint path and an optional diagram.

use std::sync::Arc;

use qrgate::api::{self, AppState, Collaborators};
use qrgate::{config, logging, Result};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration from environment
    let config = Arc::new(config::Config::from_env()?);

    // Validate configuration
    config.validate()?;

    // Initialize logging/tracing
    logging::init_tracing(&config.server)?;

    config.log_config();

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Starting qrgate");

    let collaborators = Collaborators::from_config(&config.tools);
    let state = AppState::new(config.clone(), collaborators.clone());

    // First probe before serving so /readyz is accurate from the start
    api::probe_collaborators(&state.health, &collaborators).await;

    let monitor = tokio::spawn(api::health_monitor(
        state.health.clone(),
        collaborators,
        config.features.health_probe_interval(),
    ));

    let served = api::create_server(state).await;
    monitor.abort();
    if let Err(e) = served {
        qrgate::log_error!(e, "HTTP server terminated");
        return Err(e);
    }

    tracing::info!("qrgate shutdown complete");
    Ok(())
}
