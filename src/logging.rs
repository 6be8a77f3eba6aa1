//! Logging module for qrgate
//!
//! This module configures structured logging using the tracing crate,
//! providing JSON output for production and pretty formatting for development.

use std::time::{Duration, Instant};
use tracing::Span;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Registry,
};

use crate::config::ServerConfig;
use crate::error::Result;

/// Filter used when `RUST_LOG` is not set
///
/// Tool spans are emitted at debug level, so they only show up when the
/// crate itself logs at debug.
fn default_filter(log_level: &str) -> String {
    format!("qrgate={},tower_http=debug", log_level)
}

/// Initialize the logging system
///
/// Configures tracing based on the environment:
/// - Production: JSON formatted logs with the current span attached
/// - Anything else: Pretty formatted logs with colors
pub fn init_tracing(server: &ServerConfig) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(&server.log_level)));

    if server.is_production() {
        // Production: JSON formatting
        let formatting_layer = fmt::layer()
            .json()
            .with_file(true)
            .with_line_number(true)
            .with_thread_ids(true)
            .with_thread_names(true)
            .with_target(true)
            .with_span_events(FmtSpan::CLOSE)
            .with_current_span(true);

        Registry::default()
            .with(env_filter)
            .with(formatting_layer)
            .try_init()
            .map_err(|e| {
                crate::error::Error::internal(format!("Failed to initialize tracing: {}", e))
            })?;
    } else {
        // Development: Pretty formatting with colors
        let formatting_layer = fmt::layer()
            .pretty()
            .with_file(true)
            .with_line_number(true)
            .with_thread_ids(false)
            .with_thread_names(false)
            .with_target(true)
            .with_span_events(FmtSpan::CLOSE);

        Registry::default()
            .with(env_filter)
            .with(formatting_layer)
            .try_init()
            .map_err(|e| {
                crate::error::Error::internal(format!("Failed to initialize tracing: {}", e))
            })?;
    }

    tracing::info!(
        environment = %server.environment,
        log_level = %server.log_level,
        "Logging initialized"
    );

    Ok(())
}

/// Create a span for validating one decoded payload
#[macro_export]
macro_rules! scan_span {
    ($schema:expr, $strategy:expr) => {
        tracing::info_span!(
            "scan_item",
            schema = %$schema,
            strategy = %$strategy,
            valid = tracing::field::Empty,
            path_len = tracing::field::Empty,
            diagram = tracing::field::Empty,
            duration_ms = tracing::field::Empty,
        )
    };
}

/// Create a span for one external tool invocation
#[macro_export]
macro_rules! tool_span {
    ($tool:expr, $timeout:expr) => {
        tracing::debug_span!(
            "tool",
            tool = $tool,
            timeout_ms = $timeout.as_millis() as u64,
            exit_status = tracing::field::Empty,
            stdout_bytes = tracing::field::Empty,
            duration_ms = tracing::field::Empty,
        )
    };
}

/// Log an error with context
#[macro_export]
macro_rules! log_error {
    ($error:expr, $msg:expr) => {
        tracing::error!(
            error = %$error,
            error_type = ?$error,
            $msg
        )
    };
    ($error:expr, $msg:expr, $($key:ident = $value:expr),* $(,)?) => {
        tracing::error!(
            error = %$error,
            error_type = ?$error,
            $($key = tracing::field::display(&$value),)*
            $msg
        )
    };
}

/// Times an operation and reports it on the span it runs in
pub struct Timer {
    start: Instant,
    operation: &'static str,
}

impl Timer {
    pub fn start(operation: &'static str) -> Self {
        Timer {
            start: Instant::now(),
            operation,
        }
    }

    /// Stop the timer, record `duration_ms` on `span` and log the duration
    pub fn stop_in(self, span: &Span) -> Duration {
        let duration = self.start.elapsed();
        let duration_ms = duration.as_millis() as u64;
        span.record("duration_ms", duration_ms);
        tracing::debug!(operation = self.operation, duration_ms, "Operation completed");
        duration
    }

    /// Stop the timer against the current span
    pub fn stop(self) -> Duration {
        self.stop_in(&Span::current())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter() {
        assert_eq!(default_filter("warn"), "qrgate=warn,tower_http=debug");
    }

    #[test]
    fn test_timer() {
        let timer = Timer::start("test_operation");
        std::thread::sleep(Duration::from_millis(10));
        let duration = timer.stop();
        assert!(duration.as_millis() >= 10);
    }

    #[test]
    fn test_timer_records_on_domain_spans() {
        let scan = crate::scan_span!("wifi", "DFA");
        let _entered = scan.enter();
        scan.record("valid", true);
        assert!(Timer::start("scan_item").stop() < Duration::from_secs(5));

        let tool = crate::tool_span!("dot", Duration::from_millis(250));
        tool.record("exit_status", 0);
        assert!(Timer::start("tool").stop_in(&tool) < Duration::from_secs(5));
    }

    #[test]
    fn test_log_error_macro() {
        let err = crate::external::CollaboratorError::Unavailable { tool: "dot" };
        crate::log_error!(err, "Probe failed");
        crate::log_error!(err, "Probe failed", component = "renderer");
    }
}
