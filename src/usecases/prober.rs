//! Prober - Periodic Latency Measurement Loop
//!
//! Issues one GET against the configured target, times it, publishes
//! the outcome to the latency sink, then sleeps for the interval.
//! Failures are logged and swallowed; the loop only exits on the
//! stop signal.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tokio::sync::broadcast;
use tokio::time::{Instant, sleep};
use tracing::{error, info, instrument};

use crate::config::ProbeConfig;
use crate::domain::probe::{ProbeOutcome, StatusPolicy, latency_ms};
use crate::ports::latency_sink::LatencySink;
use crate::ports::transport::ProbeTransport;

/// Background prober for a single target.
pub struct Prober<T: ProbeTransport, S: LatencySink> {
    /// Outbound request port.
    transport: Arc<T>,
    /// Where outcomes are published.
    sink: Arc<S>,
    /// URL requested on every iteration.
    target_url: String,
    /// Pause after each iteration.
    interval: Duration,
    /// Whether non-2xx responses count as failures.
    status_policy: StatusPolicy,
}

impl<T: ProbeTransport, S: LatencySink> Prober<T, S> {
    /// Create a prober from the `[probe]` config section.
    pub fn new(transport: Arc<T>, sink: Arc<S>, config: &ProbeConfig) -> Self {
        Self {
            transport,
            sink,
            target_url: config.target_url.clone(),
            interval: config.interval(),
            status_policy: config.status_policy(),
        }
    }

    /// Run a single probe and publish its outcome.
    pub async fn probe_once(&self) -> ProbeOutcome {
        let start = Instant::now();
        let result = self.transport.get(&self.target_url).await;
        let elapsed = start.elapsed();

        let outcome = ProbeOutcome::classify(result, elapsed, self.status_policy);
        self.sink.record(&outcome);

        let url = &self.target_url;
        match &outcome {
            ProbeOutcome::Success { latency, status } => info!(
                url = %url,
                latency_ms = latency_ms(*latency),
                status,
                "Probe success: {url} | Latency: {latency:?}"
            ),
            ProbeOutcome::Failure { error } => error!(
                url = %url,
                error = %error,
                "Error probing {url}: {error}"
            ),
        }

        outcome
    }

    /// Probe forever until `shutdown_rx` fires or its sender is dropped.
    ///
    /// The stop signal is honoured both while a request is in flight
    /// and during the inter-probe sleep.
    #[instrument(skip(self, shutdown_rx), fields(url = %self.target_url))]
    pub async fn run(&self, mut shutdown_rx: broadcast::Receiver<()>) -> Result<()> {
        info!(
            interval_s = self.interval.as_secs(),
            policy = ?self.status_policy,
            "Prober started"
        );

        loop {
            tokio::select! {
                biased;
                _ = shutdown_rx.recv() => break,
                _ = self.probe_once() => {}
            }

            tokio::select! {
                biased;
                _ = shutdown_rx.recv() => break,
                () = sleep(self.interval) => {}
            }
        }

        info!("Prober stopped");
        Ok(())
    }
}
