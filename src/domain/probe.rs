//! Probe domain model.
//!
//! Pure types describing a single probe attempt and how its result is
//! classified. No I/O here: the transport lives behind
//! `ports::transport::ProbeTransport`, the clock in the prober.

use std::time::Duration;

use thiserror::Error;

/// How the HTTP status of a completed request affects the outcome.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusPolicy {
    /// Any completed response counts as success, whatever its status.
    #[default]
    AnyResponse,
    /// Only 2xx responses count as success.
    RequireSuccess,
}

impl StatusPolicy {
    /// Whether a response with `status` is a successful probe.
    pub fn accepts(self, status: u16) -> bool {
        match self {
            Self::AnyResponse => true,
            Self::RequireSuccess => (200..300).contains(&status),
        }
    }
}

/// Completed HTTP exchange, body already discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeResponse {
    /// HTTP status code.
    pub status: u16,
}

/// Why a probe did not produce a latency sample.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProbeError {
    /// No response within the configured request timeout.
    #[error("request timed out after {}ms", .0.as_millis())]
    Timeout(Duration),
    /// DNS resolution or TCP/TLS connection failure.
    #[error("connection failed: {0}")]
    Connect(String),
    /// Any other transport-level failure.
    #[error("request failed: {0}")]
    Request(String),
    /// Response arrived but its status was rejected by the policy.
    #[error("unexpected HTTP status {0}")]
    HttpStatus(u16),
}

/// Result of one probe iteration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// The target answered; `latency` is the full round trip.
    Success {
        /// Measured wall-clock round trip.
        latency: Duration,
        /// HTTP status of the response.
        status: u16,
    },
    /// The probe failed; the latency gauge must not move.
    Failure {
        /// What went wrong.
        error: ProbeError,
    },
}

impl ProbeOutcome {
    /// Classify a transport result measured over `elapsed`.
    pub fn classify(
        result: Result<ProbeResponse, ProbeError>,
        elapsed: Duration,
        policy: StatusPolicy,
    ) -> Self {
        match result {
            Ok(response) if policy.accepts(response.status) => Self::Success {
                latency: elapsed,
                status: response.status,
            },
            Ok(response) => Self::Failure {
                error: ProbeError::HttpStatus(response.status),
            },
            Err(error) => Self::Failure { error },
        }
    }

    /// Whether this outcome should update the latency gauge.
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Latency in whole milliseconds for a successful probe.
    pub fn latency_ms(&self) -> Option<u64> {
        match self {
            Self::Success { latency, .. } => Some(latency_ms(*latency)),
            Self::Failure { .. } => None,
        }
    }

    /// Label value used for the per-outcome probe counter.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Success { .. } => "success",
            Self::Failure { .. } => "failure",
        }
    }
}

/// Whole milliseconds in `duration`, truncated toward zero.
///
/// Saturates at `u64::MAX`, which no real round trip reaches.
pub fn latency_ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
