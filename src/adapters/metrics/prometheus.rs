//! Prometheus Metrics Registry - Probe Observability
//!
//! Owns an explicitly constructed `prometheus::Registry` holding the
//! latency gauge and its companions. One instance is shared via `Arc`
//! between the prober (sole writer) and the exporter (readers); the
//! prometheus atomics serialize access, so there is no extra locking.

use anyhow::{Context, Result};
use chrono::Utc;
#[cfg(target_os = "linux")]
use prometheus::process_collector::ProcessCollector;
use prometheus::{Encoder, Gauge, IntCounterVec, IntGauge, Opts, Registry, TextEncoder};

use crate::domain::probe::ProbeOutcome;
use crate::ports::latency_sink::LatencySink;

/// Name of the latency gauge series.
pub const LATENCY_METRIC: &str = "hybrid_link_latency_ms";

/// Help text of the latency gauge series.
pub const LATENCY_HELP: &str =
    "Current latency between controller and remote target in milliseconds.";

/// Name of the per-outcome probe counter.
pub const PROBES_METRIC: &str = "hybrid_link_probes_total";

/// Name of the last-success timestamp gauge.
pub const LAST_SUCCESS_METRIC: &str = "hybrid_link_last_success_timestamp_seconds";

/// Probe metrics shared by the prober and the `/metrics` endpoint.
///
/// The latency gauge starts at 0 and keeps its last successful value
/// across failed probes.
pub struct ProbeMetrics {
    /// Prometheus registry.
    registry: Registry,
    /// Most recent successful round trip (milliseconds, truncated).
    latency_ms: IntGauge,
    /// Probe attempts by outcome (`success` / `failure`).
    probes_total: IntCounterVec,
    /// Unix time of the last successful probe, 0 before the first.
    last_success_timestamp: Gauge,
}

impl ProbeMetrics {
    /// Create and register all probe metrics.
    pub fn new() -> Result<Self> {
        let registry = Registry::new();

        let latency_ms = IntGauge::new(LATENCY_METRIC, LATENCY_HELP)?;

        let probes_total = IntCounterVec::new(
            Opts::new(PROBES_METRIC, "Total probe attempts by outcome."),
            &["outcome"],
        )?;

        let last_success_timestamp = Gauge::new(
            LAST_SUCCESS_METRIC,
            "Unix time of the last successful probe in seconds.",
        )?;

        registry.register(Box::new(latency_ms.clone()))?;
        registry.register(Box::new(probes_total.clone()))?;
        registry.register(Box::new(last_success_timestamp.clone()))?;

        // Expose both series at 0 before the first probe.
        probes_total.with_label_values(&["success"]);
        probes_total.with_label_values(&["failure"]);

        Ok(Self {
            registry,
            latency_ms,
            probes_total,
            last_success_timestamp,
        })
    }

    /// Also export `process_*` series (CPU, RSS, start time).
    ///
    /// These change on every scrape, so repeated scrapes stop being
    /// byte-identical once registered. Only collected on Linux.
    pub fn register_process_metrics(&self) -> Result<()> {
        #[cfg(target_os = "linux")]
        {
            self.registry
                .register(Box::new(ProcessCollector::for_self()))
                .context("Failed to register process collector")?;
        }
        Ok(())
    }

    /// Current value of the latency gauge.
    pub fn latency_ms(&self) -> i64 {
        self.latency_ms.get()
    }

    /// Number of probes recorded with the given outcome label.
    pub fn probe_count(&self, outcome: &str) -> u64 {
        self.probes_total.with_label_values(&[outcome]).get()
    }

    /// Render every registered metric in the text exposition format.
    pub fn render(&self) -> Result<String> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder
            .encode(&metric_families, &mut buffer)
            .context("Failed to encode metrics")?;
        String::from_utf8(buffer).context("Metrics output is not UTF-8")
    }
}

impl LatencySink for ProbeMetrics {
    fn record(&self, outcome: &ProbeOutcome) {
        self.probes_total
            .with_label_values(&[outcome.label()])
            .inc();

        if let Some(ms) = outcome.latency_ms() {
            self.latency_ms.set(i64::try_from(ms).unwrap_or(i64::MAX));
            #[allow(clippy::cast_precision_loss)]
            let now = Utc::now().timestamp_millis() as f64 / 1000.0;
            self.last_success_timestamp.set(now);
        }
    }
}
