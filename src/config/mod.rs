//! Configuration Module - TOML-based Probe Configuration
//!
//! Loads and validates configuration from `config.toml`.
//! Target URL, probe cadence and the exporter address are
//! externalized here - nothing is hardcoded in the prober.
//! Every field has a default, so an empty file is a valid config.

pub mod loader;

use std::time::Duration;

use serde::Deserialize;

use crate::domain::probe::StatusPolicy;

/// Top-level probe configuration.
///
/// Loaded from `config.toml` at startup. All fields are validated
/// before any task is spawned.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
  /// Process identity and logging.
  #[serde(default)]
  pub app: AppSection,
  /// Probe target and cadence.
  #[serde(default)]
  pub probe: ProbeConfig,
  /// Metrics exporter listener.
  #[serde(default)]
  pub metrics: MetricsConfig,
}

/// Process identity and logging configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppSection {
  /// Human-readable instance name (logged at startup).
  #[serde(default = "default_name")]
  pub name: String,
  /// Log level (trace, debug, info, warn, error). `RUST_LOG` wins.
  #[serde(default = "default_log_level")]
  pub log_level: String,
  /// Log line format.
  #[serde(default)]
  pub log_format: LogFormat,
}

/// Output format of the tracing subscriber.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
  /// Human-readable single-line events.
  #[default]
  Text,
  /// One JSON object per event.
  Json,
}

/// Probe target and cadence.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProbeConfig {
  /// URL requested on every probe (http or https).
  #[serde(default = "default_target_url")]
  pub target_url: String,
  /// Pause between the end of one probe and the start of the next.
  #[serde(default = "default_interval_seconds")]
  pub interval_seconds: u64,
  /// Per-request timeout in milliseconds. Must not exceed the interval.
  #[serde(default = "default_timeout_ms")]
  pub timeout_ms: u64,
  /// Treat non-2xx responses as failed probes.
  #[serde(default)]
  pub fail_on_http_error: bool,
}

impl ProbeConfig {
  /// Probe interval as a `Duration`.
  pub fn interval(&self) -> Duration {
    Duration::from_secs(self.interval_seconds)
  }

  /// Request timeout as a `Duration`.
  pub fn timeout(&self) -> Duration {
    Duration::from_millis(self.timeout_ms)
  }

  /// Status code handling selected by `fail_on_http_error`.
  pub fn status_policy(&self) -> StatusPolicy {
    if self.fail_on_http_error {
      StatusPolicy::RequireSuccess
    } else {
      StatusPolicy::AnyResponse
    }
  }
}

/// Metrics exporter configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MetricsConfig {
  /// Interface to bind (all interfaces by default).
  #[serde(default = "default_listen_address")]
  pub listen_address: String,
  /// TCP port serving `/metrics`.
  #[serde(default = "default_listen_port")]
  pub listen_port: u16,
  /// Also export `process_*` series (Linux only).
  #[serde(default)]
  pub process_metrics: bool,
}

impl MetricsConfig {
  /// `host:port` string handed to the TCP listener.
  pub fn bind_address(&self) -> String {
    format!("{}:{}", self.listen_address, self.listen_port)
  }
}

impl Default for AppSection {
  fn default() -> Self {
    Self {
      name: default_name(),
      log_level: default_log_level(),
      log_format: LogFormat::default(),
    }
  }
}

impl Default for ProbeConfig {
  fn default() -> Self {
    Self {
      target_url: default_target_url(),
      interval_seconds: default_interval_seconds(),
      timeout_ms: default_timeout_ms(),
      fail_on_http_error: false,
    }
  }
}

impl Default for MetricsConfig {
  fn default() -> Self {
    Self {
      listen_address: default_listen_address(),
      listen_port: default_listen_port(),
      process_metrics: false,
    }
  }
}

// Default value functions for serde

fn default_name() -> String {
  "hybrid-link-probe".to_string()
}

fn default_log_level() -> String {
  "info".to_string()
}

fn default_target_url() -> String {
  "https://www.google.com".to_string()
}

fn default_interval_seconds() -> u64 {
  10
}

fn default_timeout_ms() -> u64 {
  5_000
}

fn default_listen_address() -> String {
  "0.0.0.0".to_string()
}

fn default_listen_port() -> u16 {
  8080
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_empty_document_uses_defaults() {
    let config: AppConfig = toml::from_str("").unwrap();
    assert_eq!(config.probe.target_url, "https://www.google.com");
    assert_eq!(config.probe.interval(), Duration::from_secs(10));
    assert_eq!(config.probe.timeout(), Duration::from_secs(5));
    assert_eq!(config.metrics.bind_address(), "0.0.0.0:8080");
    assert_eq!(config.app.log_format, LogFormat::Text);
    assert!(!config.metrics.process_metrics);
  }

  #[test]
  fn test_status_policy_follows_flag() {
    let mut probe = ProbeConfig::default();
    assert_eq!(probe.status_policy(), StatusPolicy::AnyResponse);
    probe.fail_on_http_error = true;
    assert_eq!(probe.status_policy(), StatusPolicy::RequireSuccess);
  }

  #[test]
  fn test_partial_section_keeps_other_defaults() {
    let config: AppConfig = toml::from_str(
      r#"
        [probe]
        target_url = "http://10.0.0.5/healthz"

        [app]
        log_format = "json"
      "#,
    )
    .unwrap();
    assert_eq!(config.probe.target_url, "http://10.0.0.5/healthz");
    assert_eq!(config.probe.interval_seconds, 10);
    assert_eq!(config.app.log_format, LogFormat::Json);
    assert_eq!(config.metrics.listen_port, 8080);
  }

  #[test]
  fn test_unknown_field_rejected() {
    let result: Result<AppConfig, _> = toml::from_str("[probe]\ntarget = \"x\"\n");
    assert!(result.is_err());
  }
}
