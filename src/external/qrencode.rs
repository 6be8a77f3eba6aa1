//! QR encoding through `qrencode`

use async_trait::async_trait;
use std::ffi::OsStr;
use tempfile::TempDir;

use super::{CollaboratorError, CollaboratorResult, QrEncoder, Tool};

#[derive(Debug, Clone)]
pub struct QrencodeEncoder {
    tool: Tool,
}

impl QrencodeEncoder {
    pub fn new(tool: Tool) -> Self {
        Self { tool }
    }
}

#[async_trait]
impl QrEncoder for QrencodeEncoder {
    async fn encode(&self, text: &str) -> CollaboratorResult<Vec<u8>> {
        let name = self.tool.name();
        let workdir = TempDir::new().map_err(|e| CollaboratorError::io(name, e))?;
        let input = workdir.path().join("payload.txt");
        let output = workdir.path().join("payload.png");

        // text goes through a file so it is never parsed as a flag
        tokio::fs::write(&input, text)
            .await
            .map_err(|e| CollaboratorError::io(name, e))?;

        self.tool
            .run_checked([
                OsStr::new("-t"),
                OsStr::new("PNG"),
                OsStr::new("-r"),
                input.as_os_str(),
                OsStr::new("-o"),
                output.as_os_str(),
            ])
            .await?;

        tokio::fs::read(&output)
            .await
            .map_err(|e| CollaboratorError::io(name, e))
    }

    async fn probe(&self) -> CollaboratorResult<()> {
        self.tool.probe("--version").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_missing_tool() {
        let encoder = QrencodeEncoder::new(Tool::new(
            "qrencode",
            "qrgate-missing-qrencode",
            Duration::from_secs(1),
        ));
        assert!(encoder.encode("hello").await.unwrap_err().is_unavailable());
        assert!(encoder.probe().await.unwrap_err().is_unavailable());
    }
}
