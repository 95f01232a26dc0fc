//! Adapters Layer - Hexagonal Architecture Outer Ring
//!
//! Implements the port traits defined in `crate::ports` with concrete
//! external dependencies.
//!
//! Adapter categories:
//! - `http`: reqwest client issuing probe requests
//! - `metrics`: Prometheus registry and `/metrics` endpoint

pub mod http;
pub mod metrics;
