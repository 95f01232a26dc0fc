//! Domain layer - Probe model and classification rules.
//!
//! Pure logic with no I/O (hexagonal architecture inner ring).

pub mod probe;

pub use probe::{ProbeError, ProbeOutcome, ProbeResponse, StatusPolicy, latency_ms};
