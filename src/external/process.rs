//! Bounded invocation of command-line tools

use std::ffi::OsStr;
use std::io::ErrorKind;
use std::process::{Output, Stdio};
use std::time::Duration;
use tokio::process::Command;
use tracing::Instrument;

use super::{CollaboratorError, CollaboratorResult};
use crate::logging::Timer;

/// A command-line tool with a per-call time limit
#[derive(Debug, Clone)]
pub struct Tool {
    /// Name used in errors and logs
    name: &'static str,
    /// Executable to spawn (bare name resolved through `PATH`, or a path)
    program: String,
    timeout: Duration,
}

impl Tool {
    pub fn new(name: &'static str, program: impl Into<String>, timeout: Duration) -> Self {
        Self {
            name,
            program: program.into(),
            timeout,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Run the tool to completion and collect its output
    ///
    /// The child is killed if the time limit elapses. A non-zero exit status
    /// is returned as-is for the caller to interpret.
    pub async fn run<I, S>(&self, args: I) -> CollaboratorResult<Output>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let span = crate::tool_span!(self.name, self.timeout);
        let timer = Timer::start("tool");
        let outcome = self.spawn_and_wait(args).instrument(span.clone()).await;

        if let Ok(output) = &outcome {
            span.record("exit_status", output.status.code().unwrap_or(-1));
            span.record("stdout_bytes", output.stdout.len() as u64);
        }
        timer.stop_in(&span);
        outcome
    }

    async fn spawn_and_wait<I, S>(&self, args: I) -> CollaboratorResult<Output>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let child = Command::new(&self.program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound | ErrorKind::PermissionDenied => {
                    CollaboratorError::Unavailable { tool: self.name }
                },
                _ => CollaboratorError::io(self.name, e),
            })?;

        // dropping the wait future on timeout drops the child, which kills it
        match tokio::time::timeout(self.timeout, child.wait_with_output()).await {
            Ok(Ok(output)) => Ok(output),
            Ok(Err(e)) => Err(CollaboratorError::io(self.name, e)),
            Err(_) => {
                tracing::warn!(
                    tool = self.name,
                    timeout_ms = self.timeout.as_millis() as u64,
                    "Tool timed out"
                );
                Err(CollaboratorError::Timeout {
                    tool: self.name,
                    after: self.timeout,
                })
            },
        }
    }

    /// Run the tool and require a zero exit status
    pub async fn run_checked<I, S>(&self, args: I) -> CollaboratorResult<Output>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let output = self.run(args).await?;
        if output.status.success() {
            Ok(output)
        } else {
            Err(self.failure(&output))
        }
    }

    /// Spawn the tool with a version flag to confirm it is installed
    pub async fn probe(&self, version_flag: &str) -> CollaboratorResult<()> {
        self.run([version_flag]).await.map(|_| ())
    }

    pub(super) fn failure(&self, output: &Output) -> CollaboratorError {
        CollaboratorError::Failed {
            tool: self.name,
            status: output.status.code().unwrap_or(-1),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_program_is_unavailable() {
        let tool = Tool::new("ghost", "qrgate-no-such-binary", Duration::from_secs(1));
        let err = tool.run(["--version"]).await.unwrap_err();
        assert!(err.is_unavailable());
        assert!(tool.probe("--version").await.unwrap_err().is_unavailable());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_timeout_kills_child() {
        let tool = Tool::new("sleep", "sleep", Duration::from_millis(50));
        let err = tool.run(["5"]).await.unwrap_err();
        assert!(matches!(err, CollaboratorError::Timeout { tool: "sleep", .. }));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_non_zero_status() {
        let tool = Tool::new("false", "false", Duration::from_secs(5));
        let output = tool.run(std::iter::empty::<&str>()).await.unwrap();
        assert!(!output.status.success());

        let err = tool.run_checked(std::iter::empty::<&str>()).await.unwrap_err();
        assert!(matches!(err, CollaboratorError::Failed { tool: "false", .. }));
    }
}
