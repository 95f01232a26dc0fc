//! Latency Sink Port - Probe Result Publication
//!
//! The prober is the only writer; the metrics exporter reads
//! whatever the sink implementation stores.

use crate::domain::probe::ProbeOutcome;

/// Receives the outcome of every probe iteration.
///
/// Implementations must leave the published latency untouched for
/// failed outcomes and overwrite it (not accumulate) for successes.
pub trait LatencySink: Send + Sync + 'static {
  /// Publish one probe outcome.
  fn record(&self, outcome: &ProbeOutcome);
}
