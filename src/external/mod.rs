//! External collaborators
//!
//! QR decoding, QR encoding and graph rasterization are delegated to
//! command-line tools (`zbarimg`, `qrencode`, `dot`). Each call gets its own
//! temporary directory and an explicit timeout; the directory is removed and
//! the child process killed on every exit path.
//!
//! A tool that cannot be spawned surfaces as `CollaboratorError::Unavailable`,
//! which callers keep distinct from "the input was invalid".

mod graphviz;
mod process;
mod qrencode;
mod zbar;

pub use graphviz::GraphvizRenderer;
pub use process::Tool;
pub use qrencode::QrencodeEncoder;
pub use zbar::ZbarDecoder;

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Failure of an external collaborator
#[derive(Debug, Error)]
pub enum CollaboratorError {
    #[error("{tool} is not available")]
    Unavailable { tool: &'static str },

    #[error("{tool} timed out after {}ms", after.as_millis())]
    Timeout {
        tool: &'static str,
        after: Duration,
    },

    #[error("{tool} failed with status {status}: {stderr}")]
    Failed {
        tool: &'static str,
        status: i32,
        stderr: String,
    },

    #[error("{tool} I/O error: {source}")]
    Io {
        tool: &'static str,
        #[source]
        source: std::io::Error,
    },
}

impl CollaboratorError {
    pub fn io(tool: &'static str, source: std::io::Error) -> Self {
        CollaboratorError::Io { tool, source }
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, CollaboratorError::Unavailable { .. })
    }
}

pub type CollaboratorResult<T> = std::result::Result<T, CollaboratorError>;

/// Image bytes in, decoded QR texts out
#[async_trait]
pub trait QrDecoder: Send + Sync {
    /// Decode every QR symbol in the image
    ///
    /// An image with no symbols, or one the tool cannot read, yields `Ok(vec![])`.
    async fn decode(&self, image: &[u8]) -> CollaboratorResult<Vec<String>>;

    /// Check that the collaborator can be invoked
    async fn probe(&self) -> CollaboratorResult<()>;
}

/// Text in, PNG bytes of a QR symbol out
#[async_trait]
pub trait QrEncoder: Send + Sync {
    async fn encode(&self, text: &str) -> CollaboratorResult<Vec<u8>>;

    async fn probe(&self) -> CollaboratorResult<()>;
}

/// Graph description in, PNG bytes out
#[async_trait]
pub trait GraphRenderer: Send + Sync {
    async fn render(&self, description: &str) -> CollaboratorResult<Vec<u8>>;

    async fn probe(&self) -> CollaboratorResult<()>;
}
