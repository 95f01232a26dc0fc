//! Metrics and Exposition Adapters
//!
//! Provides the probe metrics registry (implements the
//! `LatencySink` port) and the axum server exposing `/metrics`.

pub mod prometheus;
pub mod server;

pub use prometheus::ProbeMetrics;
pub use server::MetricsServer;
