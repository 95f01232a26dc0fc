//! Use Cases Layer - Application Logic
//!
//! Orchestrates domain logic with port interfaces.
//!
//! Use cases:
//! - `Prober`: periodic latency measurement of one target

pub mod prober;

pub use prober::Prober;
