//! Graph rasterization through Graphviz `dot`

use async_trait::async_trait;
use std::ffi::OsStr;
use tempfile::TempDir;

use super::{CollaboratorError, CollaboratorResult, GraphRenderer, Tool};

#[derive(Debug, Clone)]
pub struct GraphvizRenderer {
    tool: Tool,
}

impl GraphvizRenderer {
    pub fn new(tool: Tool) -> Self {
        Self { tool }
    }
}

#[async_trait]
impl GraphRenderer for GraphvizRenderer {
    async fn render(&self, description: &str) -> CollaboratorResult<Vec<u8>> {
        let name = self.tool.name();
        let workdir = TempDir::new().map_err(|e| CollaboratorError::io(name, e))?;
        let input = workdir.path().join("graph.dot");
        let output = workdir.path().join("graph.png");

        tokio::fs::write(&input, description)
            .await
            .map_err(|e| CollaboratorError::io(name, e))?;

        self.tool
            .run_checked([
                OsStr::new("-Tpng"),
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
        self.tool.probe("-V").await
    }
}
