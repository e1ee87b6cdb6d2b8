//! HTTP surface over a [`Monitor`]
//!
//! - `GET /`: HTML page of cached versions with drift highlighting
//! - `GET /versions`: the same snapshot as JSON
//! - `GET /_healthz`: liveness probe
//! - `GET /metrics`: fetch counters in the Prometheus text format

pub mod drift;
pub mod page;

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Json;
use axum::Router;
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::monitor::metrics::FetchMetrics;
use crate::monitor::periodic::Monitor;

pub type SharedMonitor = Arc<dyn Monitor>;

#[derive(Clone)]
struct AppState {
    monitor: SharedMonitor,
    metrics: Arc<FetchMetrics>,
}

pub fn router(monitor: SharedMonitor, metrics: Arc<FetchMetrics>) -> Router {
    Router::new()
        .route("/", get(versions_page))
        .route("/versions", get(versions_json))
        .route("/_healthz", get(healthz))
        .route("/metrics", get(metrics_text))
        .layer(TraceLayer::new_for_http())
        .with_state(AppState { monitor, metrics })
}

async fn versions_page(State(state): State<AppState>) -> Response {
    match state.monitor.versions() {
        Ok(snapshot) => Html(page::render(&snapshot)).into_response(),
        Err(e) => {
            error!("Failed to render versions: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("failed to render versions: {}", e),
            )
                .into_response()
        }
    }
}

async fn versions_json(State(state): State<AppState>) -> Response {
    match state.monitor.versions() {
        Ok(snapshot) => Json(snapshot).into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({ "error": e.to_string() })),
        )
            .into_response(),
    }
}

async fn healthz() -> &'static str {
    "ok\n"
}

async fn metrics_text(State(state): State<AppState>) -> Response {
    match state.metrics.encode() {
        Ok(text) => ([(header::CONTENT_TYPE, prometheus::TEXT_FORMAT)], text).into_response(),
        Err(e) => {
            error!("Failed to encode metrics: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}

/// Completes once `signal` reports a shutdown request
///
/// A signal that fails to install never completes, so the server keeps
/// running instead of stopping right after start.
pub async fn shutdown_on(signal: impl Future<Output = std::io::Result<()>>) {
    match signal.await {
        Ok(()) => info!("Shutdown requested"),
        Err(e) => {
            error!("Failed to install shutdown signal handler: {}", e);
            std::future::pending::<()>().await;
        }
    }
}

/// Serve the HTTP surface on `addr` until `shutdown` completes
pub async fn serve(
    addr: SocketAddr,
    monitor: SharedMonitor,
    metrics: Arc<FetchMetrics>,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, router(monitor, metrics))
        .with_graceful_shutdown(shutdown)
        .await
}
