//! Test utilities for qrgate
//!
//! This module provides mock collaborators and canned payloads for testing.
//! The mocks record what they were asked to do and can be told to fail the
//! same way the command-line tools do.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::api::{AppState, Collaborators};
use crate::config::{Config, FeatureFlags, ServerConfig, ToolsConfig};
use crate::external::{
    CollaboratorError, CollaboratorResult, GraphRenderer, QrDecoder, QrEncoder,
};

/// A custom payload that passes both strategies
pub const VALID_CUSTOM: &str =
    "ticket:550e8400-e29b-41d4-a716-446655440000:1.2.3:20240101T1200Z:id=12345,seat=A1";

/// A WiFi payload that passes both strategies
pub const VALID_WIFI: &str = "WIFI:S:MyNet;T:WPA2;P:secret123;;";

/// Smallest byte sequence the mocks hand out as "PNG" output
pub const FAKE_PNG: &[u8] = b"\x89PNG\r\n\x1a\nqrgate";

/// How a mock collaborator should fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockFailure {
    Unavailable,
    Timeout,
    Failed,
}

impl MockFailure {
    fn error(self, tool: &'static str) -> CollaboratorError {
        match self {
            MockFailure::Unavailable => CollaboratorError::Unavailable { tool },
            MockFailure::Timeout => CollaboratorError::Timeout {
                tool,
                after: Duration::from_millis(10),
            },
            MockFailure::Failed => CollaboratorError::Failed {
                tool,
                status: 1,
                stderr: "mock failure".to_string(),
            },
        }
    }
}

/// Shared failure switch used by every mock
#[derive(Debug, Clone, Default)]
struct FailureSwitch(Arc<Mutex<Option<MockFailure>>>);

impl FailureSwitch {
    fn set(&self, failure: Option<MockFailure>) {
        *self.0.lock().unwrap() = failure;
    }

    fn check(&self, tool: &'static str) -> CollaboratorResult<()> {
        match *self.0.lock().unwrap() {
            Some(failure) => Err(failure.error(tool)),
            None => Ok(()),
        }
    }
}

/// Mock QR decoder returning a fixed list of texts
#[derive(Debug, Clone, Default)]
pub struct MockDecoder {
    texts: Vec<String>,
    uploads: Arc<Mutex<Vec<Vec<u8>>>>,
    failure: FailureSwitch,
}

impl MockDecoder {
    /// Decode every image to these texts
    pub fn with_texts(texts: &[&str]) -> Self {
        Self {
            texts: texts.iter().map(|t| t.to_string()).collect(),
            ..Self::default()
        }
    }

    /// Fail every call, including probes
    pub fn failing(failure: MockFailure) -> Self {
        let decoder = Self::default();
        decoder.fail_with(Some(failure));
        decoder
    }

    /// Change the failure mode; `None` restores normal behaviour
    pub fn fail_with(&self, failure: Option<MockFailure>) {
        self.failure.set(failure);
    }

    /// Images received so far
    pub fn uploads(&self) -> Vec<Vec<u8>> {
        self.uploads.lock().unwrap().clone()
    }
}

#[async_trait]
impl QrDecoder for MockDecoder {
    async fn decode(&self, image: &[u8]) -> CollaboratorResult<Vec<String>> {
        self.failure.check("zbarimg")?;
        self.uploads.lock().unwrap().push(image.to_vec());
        Ok(self.texts.clone())
    }

    async fn probe(&self) -> CollaboratorResult<()> {
        self.failure.check("zbarimg")
    }
}

/// Mock QR encoder returning `FAKE_PNG` followed by the encoded text
#[derive(Debug, Clone, Default)]
pub struct MockEncoder {
    encoded: Arc<Mutex<Vec<String>>>,
    failure: FailureSwitch,
}

impl MockEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(failure: MockFailure) -> Self {
        let encoder = Self::default();
        encoder.fail_with(Some(failure));
        encoder
    }

    pub fn fail_with(&self, failure: Option<MockFailure>) {
        self.failure.set(failure);
    }

    /// Texts encoded so far
    pub fn encoded(&self) -> Vec<String> {
        self.encoded.lock().unwrap().clone()
    }
}

#[async_trait]
impl QrEncoder for MockEncoder {
    async fn encode(&self, text: &str) -> CollaboratorResult<Vec<u8>> {
        self.failure.check("qrencode")?;
        self.encoded.lock().unwrap().push(text.to_string());

        let mut png = FAKE_PNG.to_vec();
        png.extend_from_slice(text.as_bytes());
        Ok(png)
    }

    async fn probe(&self) -> CollaboratorResult<()> {
        self.failure.check("qrencode")
    }
}

/// Mock graph renderer returning `FAKE_PNG`
#[derive(Debug, Clone, Default)]
pub struct MockRenderer {
    descriptions: Arc<Mutex<Vec<String>>>,
    failure: FailureSwitch,
}

impl MockRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(failure: MockFailure) -> Self {
        let renderer = Self::default();
        renderer.fail_with(Some(failure));
        renderer
    }

    pub fn fail_with(&self, failure: Option<MockFailure>) {
        self.failure.set(failure);
    }

    /// Graph descriptions received so far
    pub fn descriptions(&self) -> Vec<String> {
        self.descriptions.lock().unwrap().clone()
    }
}

#[async_trait]
impl GraphRenderer for MockRenderer {
    async fn render(&self, description: &str) -> CollaboratorResult<Vec<u8>> {
        self.failure.check("dot")?;
        self.descriptions.lock().unwrap().push(description.to_string());
        Ok(FAKE_PNG.to_vec())
    }

    async fn probe(&self) -> CollaboratorResult<()> {
        self.failure.check("dot")
    }
}

/// Configuration with defaults suitable for tests
pub fn test_config() -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 8080,
            log_level: "info".to_string(),
            environment: "test".to_string(),
            request_timeout_secs: 30,
            shutdown_timeout_secs: 30,
            max_upload_bytes: 1024 * 1024,
        },
        tools: ToolsConfig {
            zbarimg_bin: "zbarimg".to_string(),
            qrencode_bin: "qrencode".to_string(),
            dot_bin: "dot".to_string(),
            decode_timeout_ms: 5000,
            encode_timeout_ms: 5000,
            render_timeout_ms: 3000,
        },
        features: FeatureFlags {
            diagrams: true,
            health_probe_interval_secs: 30,
        },
    }
}

/// Bundle mocks as the service's collaborators
pub fn mock_collaborators(
    decoder: MockDecoder,
    encoder: MockEncoder,
    renderer: MockRenderer,
) -> Collaborators {
    Collaborators {
        decoder: Arc::new(decoder),
        encoder: Arc::new(encoder),
        renderer: Arc::new(renderer),
    }
}

/// Application state over the given decoder and healthy encoder/renderer mocks
pub fn test_state(decoder: MockDecoder) -> AppState {
    test_state_with(mock_collaborators(decoder, MockEncoder::new(), MockRenderer::new()))
}

pub fn test_state_with(collaborators: Collaborators) -> AppState {
    AppState::new(Arc::new(test_config()), collaborators)
}
