//! HTTP server implementation for qrgate
//!
//! This module sets up the Axum web server with all routes, middleware,
//! and graceful shutdown handling.

use axum::{
    extract::{DefaultBodyLimit, MatchedPath},
    http::{header, Method, Request},
    routing::{get, post},
    Router,
};
use std::future::{Future, IntoFuture};
use std::net::SocketAddr;
use std::time::Duration;

use axum::http::HeaderName;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    request_id::{MakeRequestId, RequestId, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer},
    LatencyUnit,
};
use uuid::Uuid;

use crate::{
    api::handlers::{example, scan},
    api::health::{build_info, health_check, ready_check},
    api::AppState,
    error::Result,
};

/// Request ID generator
#[derive(Clone, Default)]
struct MakeRequestUuid;

impl MakeRequestId for MakeRequestUuid {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string();
        Some(RequestId::new(id.parse().ok()?))
    }
}

/// Create the main application router
pub fn create_router(state: AppState) -> Router {
    let config = state.config.clone();

    let api_routes = Router::new()
        .route("/scan", post(scan))
        .route("/example", get(example))
        .route("/health", get(health_check))
        .route("/healthz", get(health_check))
        .route("/readyz", get(ready_check))
        .route("/build", get(build_info))
        .with_state(state);

    // Apply middleware
    api_routes
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(config.server.max_upload_bytes))
        .layer(TimeoutLayer::new(config.server.request_timeout()))
        .layer(SetRequestIdLayer::new(
            HeaderName::from_static("x-request-id"),
            MakeRequestUuid,
        ))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                .allow_headers([header::CONTENT_TYPE]),
        )
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<_>| {
                    let matched_path =
                        request.extensions().get::<MatchedPath>().map(MatchedPath::as_str);
                    let request_id = request
                        .headers()
                        .get("x-request-id")
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or("unknown");

                    tracing::info_span!(
                        "http_request",
                        method = ?request.method(),
                        matched_path,
                        request_id,
                        latency = tracing::field::Empty,
                        status = tracing::field::Empty,
                    )
                })
                .on_request(DefaultOnRequest::new().level(tracing::Level::INFO))
                .on_response(
                    DefaultOnResponse::new()
                        .level(tracing::Level::INFO)
                        .latency_unit(LatencyUnit::Millis),
                ),
        )
}

/// Create and start the HTTP server
pub async fn create_server(state: AppState) -> Result<()> {
    let config = state.config.clone();
    let app = create_router(state);
    let addr: SocketAddr = config
        .server
        .address()
        .parse()
        .map_err(|e| crate::error::Error::config(format!("Invalid server address: {}", e)))?;

    tracing::info!(
        address = %addr,
        environment = %config.server.environment,
        "Starting HTTP server"
    );

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| crate::error::Error::internal(format!("Failed to bind to {}: {}", addr, e)))?;

    tracing::info!(
        address = %addr,
        "HTTP server listening"
    );

    serve_until(listener, app, shutdown_signal(), config.server.shutdown_timeout()).await
}

/// Serve until `signal` resolves, then drain in-flight requests for at most `grace`
///
/// Connections still open when the grace period ends are abandoned.
pub async fn serve_until<F>(
    listener: TcpListener,
    app: Router,
    signal: F,
    grace: Duration,
) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let (signalled_tx, signalled_rx) = oneshot::channel::<()>();
    let shutdown = async move {
        signal.await;
        let _ = signalled_tx.send(());
    };

    let server = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .into_future();
    tokio::pin!(server);

    tokio::select! {
        served = &mut server => {
            return served
                .map_err(|e| crate::error::Error::internal(format!("Server error: {}", e)));
        },
        Ok(()) = signalled_rx => {},
    }

    match tokio::time::timeout(grace, server).await {
        Ok(served) => {
            served.map_err(|e| crate::error::Error::internal(format!("Server error: {}", e)))
        },
        Err(_) => {
            tracing::warn!(
                grace_secs = grace.as_secs(),
                "Shutdown grace period elapsed with requests still in flight"
            );
            Ok(())
        },
    }
}

/// Shutdown signal handler
///
/// Waits for CTRL+C or SIGTERM signals to gracefully shutdown the server.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received CTRL+C, starting graceful shutdown");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::StatusCode;
    use tower::ServiceExt;

    use crate::test_utils::{test_state, MockDecoder};

    #[tokio::test]
    async fn test_health_endpoint() {
        let app = create_router(test_state(MockDecoder::default()));

        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_build_endpoint() {
        let app = create_router(test_state(MockDecoder::default()));

        let response = app
            .oneshot(Request::builder().uri("/build").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_shutdown_grace_is_bounded() {
        use std::sync::Arc;
        use tokio::io::AsyncWriteExt;
        use tokio::sync::Notify;

        let started = Arc::new(Notify::new());
        let handler_started = started.clone();
        let app = Router::new().route(
            "/slow",
            get(move || {
                let handler_started = handler_started.clone();
                async move {
                    handler_started.notify_one();
                    tokio::time::sleep(Duration::from_secs(30)).await;
                    "late"
                }
            }),
        );

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (stop_tx, stop_rx) = oneshot::channel::<()>();
        let server = tokio::spawn(serve_until(
            listener,
            app,
            async move {
                let _ = stop_rx.await;
            },
            Duration::from_millis(100),
        ));

        let mut client = tokio::net::TcpStream::connect(addr).await.unwrap();
        client
            .write_all(b"GET /slow HTTP/1.1\r\nHost: localhost\r\n\r\n")
            .await
            .unwrap();
        started.notified().await;

        stop_tx.send(()).unwrap();
        let served = tokio::time::timeout(Duration::from_secs(5), server)
            .await
            .expect("server outlived its shutdown grace period")
            .unwrap();
        assert!(served.is_ok());
    }

    #[tokio::test]
    async fn test_scan_requires_post() {
        let app = create_router(test_state(MockDecoder::default()));

        let response = app
            .oneshot(Request::builder().uri("/scan").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
