//! Configuration module for qrgate
//!
//! This module handles loading and validating configuration from environment
//! variables, providing strongly-typed configuration structures for the
//! server and its external tools.

use envconfig::Envconfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::{Error, Result};
use crate::external::Tool;

/// Main configuration structure for qrgate
#[derive(Debug, Clone, Deserialize, Serialize, Envconfig)]
pub struct Config {
    /// Server configuration
    #[serde(flatten)]
    #[envconfig(nested = true)]
    pub server: ServerConfig,

    /// External tool configuration
    #[serde(flatten)]
    #[envconfig(nested = true)]
    pub tools: ToolsConfig,

    /// Feature flags
    #[serde(flatten)]
    #[envconfig(nested = true)]
    pub features: FeatureFlags,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize, Envconfig)]
pub struct ServerConfig {
    /// Host to bind to
    #[envconfig(from = "HOST", default = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[envconfig(from = "PORT", default = "8080")]
    pub port: u16,

    /// Log level
    #[envconfig(from = "LOG_LEVEL", default = "info")]
    pub log_level: String,

    /// Environment (development, staging, production)
    #[envconfig(from = "ENVIRONMENT", default = "development")]
    pub environment: String,

    /// Request timeout in seconds
    #[envconfig(from = "REQUEST_TIMEOUT_SECS", default = "30")]
    pub request_timeout_secs: u64,

    /// Time allowed for in-flight requests to finish after a shutdown signal
    #[envconfig(from = "SHUTDOWN_TIMEOUT_SECS", default = "30")]
    pub shutdown_timeout_secs: u64,

    /// Maximum accepted upload size in bytes
    #[envconfig(from = "MAX_UPLOAD_BYTES", default = "10485760")]
    pub max_upload_bytes: usize,
}

impl ServerConfig {
    /// Get the server address as a string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get request timeout as Duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Get shutdown timeout as Duration
    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.shutdown_timeout_secs)
    }

    /// Check if running in production mode
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

/// External tool configuration
#[derive(Debug, Clone, Deserialize, Serialize, Envconfig)]
pub struct ToolsConfig {
    /// QR decoder executable
    #[envconfig(from = "ZBARIMG_BIN", default = "zbarimg")]
    pub zbarimg_bin: String,

    /// QR encoder executable
    #[envconfig(from = "QRENCODE_BIN", default = "qrencode")]
    pub qrencode_bin: String,

    /// Graphviz executable
    #[envconfig(from = "DOT_BIN", default = "dot")]
    pub dot_bin: String,

    /// Decode time limit in milliseconds
    #[envconfig(from = "DECODE_TIMEOUT_MS", default = "5000")]
    pub decode_timeout_ms: u64,

    /// Encode time limit in milliseconds
    #[envconfig(from = "ENCODE_TIMEOUT_MS", default = "5000")]
    pub encode_timeout_ms: u64,

    /// Diagram render time limit in milliseconds
    #[envconfig(from = "RENDER_TIMEOUT_MS", default = "3000")]
    pub render_timeout_ms: u64,
}

impl ToolsConfig {
    pub fn decoder(&self) -> Tool {
        Tool::new(
            "zbarimg",
            &self.zbarimg_bin,
            Duration::from_millis(self.decode_timeout_ms),
        )
    }

    pub fn encoder(&self) -> Tool {
        Tool::new(
            "qrencode",
            &self.qrencode_bin,
            Duration::from_millis(self.encode_timeout_ms),
        )
    }

    pub fn renderer(&self) -> Tool {
        Tool::new("dot", &self.dot_bin, Duration::from_millis(self.render_timeout_ms))
    }
}

/// Feature flags
#[derive(Debug, Clone, Deserialize, Serialize, Envconfig)]
pub struct FeatureFlags {
    /// Attach rendered diagrams to scan results
    #[envconfig(from = "ENABLE_DIAGRAMS", default = "true")]
    pub diagrams: bool,

    /// Interval between collaborator readiness probes
    #[envconfig(from = "HEALTH_PROBE_INTERVAL_SECS", default = "30")]
    pub health_probe_interval_secs: u64,
}

impl FeatureFlags {
    pub fn health_probe_interval(&self) -> Duration {
        Duration::from_secs(self.health_probe_interval_secs)
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if it exists (for local development)
        dotenv::dotenv().ok();

        Config::init_from_env().map_err(Error::from)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(Error::config("Server port cannot be 0"));
        }

        if self.server.shutdown_timeout_secs == 0 {
            return Err(Error::config("SHUTDOWN_TIMEOUT_SECS must be greater than 0"));
        }

        if self.server.max_upload_bytes == 0 {
            return Err(Error::config("Upload limit must be at least 1 byte"));
        }

        let binaries = [
            ("ZBARIMG_BIN", &self.tools.zbarimg_bin),
            ("QRENCODE_BIN", &self.tools.qrencode_bin),
            ("DOT_BIN", &self.tools.dot_bin),
        ];
        for (var, bin) in binaries {
            if bin.trim().is_empty() {
                return Err(Error::config(format!("{} cannot be empty", var)));
            }
        }

        let timeouts = [
            ("DECODE_TIMEOUT_MS", self.tools.decode_timeout_ms),
            ("ENCODE_TIMEOUT_MS", self.tools.encode_timeout_ms),
            ("RENDER_TIMEOUT_MS", self.tools.render_timeout_ms),
            ("HEALTH_PROBE_INTERVAL_SECS", self.features.health_probe_interval_secs),
        ];
        for (var, value) in timeouts {
            if value == 0 {
                return Err(Error::config(format!("{} must be greater than 0", var)));
            }
        }

        Ok(())
    }

    /// Log configuration
    pub fn log_config(&self) {
        tracing::info!(
            server_address = %self.server.address(),
            environment = %self.server.environment,
            log_level = %self.server.log_level,
            max_upload_bytes = %self.server.max_upload_bytes,
            shutdown_timeout_secs = %self.server.shutdown_timeout_secs,
            "Server configuration"
        );

        tracing::info!(
            zbarimg = %self.tools.zbarimg_bin,
            qrencode = %self.tools.qrencode_bin,
            dot = %self.tools.dot_bin,
            decode_timeout_ms = %self.tools.decode_timeout_ms,
            render_timeout_ms = %self.tools.render_timeout_ms,
            "Tool configuration"
        );

        tracing::info!(
            diagrams = %self.features.diagrams,
            health_probe_interval_secs = %self.features.health_probe_interval_secs,
            "Feature flags"
        );
    }
}
