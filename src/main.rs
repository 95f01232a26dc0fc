//! Hybrid Link Probe — Entry Point
//!
//! Wiring sequence:
//! 1. Load config.toml (or built-in defaults) + validate
//! 2. Init tracing (text or JSON)
//! 3. Build the probe metrics registry
//! 4. Create the reqwest probe transport
//! 5. Spawn the prober as a background task
//! 6. Bind and serve `/metrics` on the main path until SIGINT

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::signal;
use tokio::sync::broadcast;
use tracing::{error, info, warn};

use hybrid_link_probe::adapters::http::{HttpTransport, HttpTransportConfig};
use hybrid_link_probe::adapters::metrics::{MetricsServer, ProbeMetrics};
use hybrid_link_probe::config::{self, AppSection, LogFormat};
use hybrid_link_probe::usecases::Prober;

#[tokio::main]
async fn main() -> Result<()> {
    // ── 1. Load configuration ───────────────────────────────
    let config_path = config::loader::config_path_from_env();
    let config = config::loader::load_or_default(&config_path)
        .context("Failed to load configuration")?;

    // ── 2. Initialize logging ───────────────────────────────
    init_tracing(&config.app);

    info!(
        name = %config.app.name,
        version = env!("CARGO_PKG_VERSION"),
        config_path = %config_path,
        target_url = %config.probe.target_url,
        interval_s = config.probe.interval_seconds,
        timeout_ms = config.probe.timeout_ms,
        "Starting hybrid link probe"
    );

    // ── 3. Metrics registry shared by prober and exporter ───
    let metrics = Arc::new(ProbeMetrics::new().context("Failed to register metrics")?);
    if config.metrics.process_metrics {
        metrics.register_process_metrics()?;
    }

    // ── 4. Probe transport with explicit request timeout ────
    let transport = Arc::new(
        HttpTransport::new(HttpTransportConfig {
            timeout: config.probe.timeout(),
            ..HttpTransportConfig::default()
        })
        .context("Failed to create probe HTTP client")?,
    );

    // ── 5. Spawn the prober ─────────────────────────────────
    let (shutdown_tx, _shutdown_rx) = broadcast::channel::<()>(1);
    let prober = Prober::new(transport, Arc::clone(&metrics), &config.probe);
    let prober_shutdown = shutdown_tx.subscribe();
    let prober_handle = tokio::spawn(async move {
        if let Err(e) = prober.run(prober_shutdown).await {
            error!(error = %e, "Prober task failed");
        }
    });

    // ── 6. Serve /metrics (bind failure is fatal) ───────────
    let server = MetricsServer::bind(metrics, &config.metrics.bind_address()).await?;

    tokio::select! {
        result = server.serve() => {
            result?;
        }
        _ = signal::ctrl_c() => {
            info!("SIGINT received, stopping prober");
        }
    }

    let _ = shutdown_tx.send(());
    if tokio::time::timeout(Duration::from_secs(5), prober_handle)
        .await
        .is_err()
    {
        warn!("Prober did not stop within 5s");
    }

    info!("Shutdown complete");
    Ok(())
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over `app.log_level`.
fn init_tracing(app: &AppSection) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&app.log_level));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match app.log_format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Text => builder.init(),
    }
}
