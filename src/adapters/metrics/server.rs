//! Metrics Server - `/metrics` Exposition Endpoint
//!
//! Serves the probe registry over HTTP via axum 0.7 for pull-based
//! scraping. Values are gathered on every request; nothing is cached.
//!
//! Lifecycle: `bind` (starting) → `serve` (serving until the process
//! exits or the optional stop signal fires). A bind failure is
//! returned to the caller, which treats it as fatal.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tracing::{error, info, instrument};

use super::prometheus::ProbeMetrics;

/// Content type of the Prometheus text exposition format.
pub const EXPOSITION_CONTENT_TYPE: &str = prometheus::TEXT_FORMAT;

/// Build the exporter router. Only `GET /metrics` is routed.
pub fn router(metrics: Arc<ProbeMetrics>) -> Router {
    Router::new()
        .route("/metrics", get(metrics_handler))
        .with_state(metrics)
}

/// Render the current registry contents.
async fn metrics_handler(State(metrics): State<Arc<ProbeMetrics>>) -> Response {
    match metrics.render() {
        Ok(body) => ([(header::CONTENT_TYPE, EXPOSITION_CONTENT_TYPE)], body).into_response(),
        Err(e) => {
            error!(error = %e, "Failed to render metrics");
            (StatusCode::INTERNAL_SERVER_ERROR, "failed to render metrics").into_response()
        }
    }
}

/// Axum-based Prometheus exporter bound to a listening socket.
pub struct MetricsServer {
    /// Registry rendered on every scrape.
    metrics: Arc<ProbeMetrics>,
    /// Bound listener.
    listener: TcpListener,
}

impl MetricsServer {
    /// Bind the listening socket.
    ///
    /// # Errors
    /// Fails if the address is malformed or already in use.
    pub async fn bind(metrics: Arc<ProbeMetrics>, bind_address: &str) -> Result<Self> {
        let listener = TcpListener::bind(bind_address)
            .await
            .with_context(|| format!("Failed to bind metrics server on {bind_address}"))?;
        Ok(Self { metrics, listener })
    }

    /// Address actually bound (resolves port 0).
    pub fn local_addr(&self) -> Result<SocketAddr> {
        self.listener
            .local_addr()
            .context("Failed to read metrics listener address")
    }

    /// Serve scrapes until the process exits.
    #[instrument(skip(self))]
    pub async fn serve(self) -> Result<()> {
        let addr = self.local_addr()?;
        info!(address = %addr, "Starting metrics server on {addr}/metrics");

        axum::serve(self.listener, router(self.metrics))
            .await
            .context("Metrics server failed")
    }

    /// Serve scrapes until `shutdown_rx` fires or its sender is dropped.
    #[instrument(skip(self, shutdown_rx))]
    pub async fn serve_with_shutdown(
        self,
        mut shutdown_rx: broadcast::Receiver<()>,
    ) -> Result<()> {
        let addr = self.local_addr()?;
        info!(address = %addr, "Starting metrics server on {addr}/metrics");

        axum::serve(self.listener, router(self.metrics))
            .with_graceful_shutdown(async move {
                let _ = shutdown_rx.recv().await;
            })
            .await
            .context("Metrics server failed")?;

        info!("Metrics server stopped");
        Ok(())
    }
}
