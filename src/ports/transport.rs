//! Probe Transport Port - Outbound Request Interface
//!
//! Defines the trait the prober uses to issue one request against
//! the target. The reqwest adapter implements it for production;
//! tests substitute scripted or delayed fakes.

use async_trait::async_trait;

use crate::domain::probe::{ProbeError, ProbeResponse};

/// Trait for issuing a single probe request.
///
/// Implementations must release the response body before returning
/// so no connection is held between probes. Timing is measured by
/// the caller around the whole call.
#[async_trait]
pub trait ProbeTransport: Send + Sync + 'static {
  /// Perform a GET against `url` and report the status, or the
  /// transport-level reason it failed.
  async fn get(&self, url: &str) -> Result<ProbeResponse, ProbeError>;
}
