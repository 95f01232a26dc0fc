//! Outbound HTTP adapter for the probe transport port.

pub mod client;

pub use client::{HttpTransport, HttpTransportConfig};
