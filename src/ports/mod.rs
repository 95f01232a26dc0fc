//! Ports Layer - Hexagonal Architecture Boundaries
//!
//! Defines the interfaces (traits) the prober requires from the
//! outside world. Adapters implement these traits.
//!
//! Port categories:
//! - `ProbeTransport`: Outbound HTTP request to the probe target
//! - `LatencySink`: Publication of probe outcomes as metrics

pub mod latency_sink;
pub mod transport;

pub use latency_sink::LatencySink;
pub use transport::ProbeTransport;
