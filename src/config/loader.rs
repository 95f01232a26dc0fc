//! Configuration Loader - File Loading and Validation
//!
//! Handles loading `config.toml`, validating all parameters,
//! and providing clear error messages for misconfiguration.

use std::path::Path;

use anyhow::{Context, Result};
use reqwest::Url;
use tracing::{info, warn};

use super::AppConfig;

/// Environment variable overriding the config file location.
pub const CONFIG_PATH_ENV: &str = "HYBRID_PROBE_CONFIG";

/// Default config file location, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Resolve the config path from `HYBRID_PROBE_CONFIG` or the default.
pub fn config_path_from_env() -> String {
  std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string())
}

/// Load and validate configuration from a TOML file.
///
/// # Errors
/// Returns detailed error if:
/// - File doesn't exist or can't be read
/// - TOML parsing fails
/// - Validation rules are violated
pub fn load_config(path: &str) -> Result<AppConfig> {
  let path = Path::new(path);

  let content = std::fs::read_to_string(path)
    .with_context(|| format!("Failed to read config file: {}", path.display()))?;

  let config: AppConfig = toml::from_str(&content)
    .with_context(|| format!("Failed to parse {}", path.display()))?;

  validate_config(&config)?;

  info!(
    target_url = %config.probe.target_url,
    interval_s = config.probe.interval_seconds,
    timeout_ms = config.probe.timeout_ms,
    "Configuration loaded successfully"
  );

  Ok(config)
}

/// Load configuration, falling back to built-in defaults when the
/// file does not exist. A file that exists but is invalid is still
/// an error.
pub fn load_or_default(path: &str) -> Result<AppConfig> {
  if Path::new(path).exists() {
    return load_config(path);
  }

  warn!(path, "Config file not found — using built-in defaults");
  let config = AppConfig::default();
  validate_config(&config)?;
  Ok(config)
}

/// Validate all configuration parameters.
///
/// Checks for:
/// - An absolute http(s) target URL
/// - Non-zero interval and timeout, with timeout <= interval
/// - A non-zero listen port
pub fn validate_config(config: &AppConfig) -> Result<()> {
  let url = Url::parse(&config.probe.target_url)
    .with_context(|| format!("Invalid probe target_url: {}", config.probe.target_url))?;
  anyhow::ensure!(
    matches!(url.scheme(), "http" | "https"),
    "Probe target_url must use http or https, got {}",
    url.scheme()
  );

  anyhow::ensure!(
    config.probe.interval_seconds > 0,
    "Probe interval_seconds must be positive"
  );
  anyhow::ensure!(
    config.probe.timeout_ms > 0,
    "Probe timeout_ms must be positive"
  );
  anyhow::ensure!(
    config.probe.timeout() <= config.probe.interval(),
    "Probe timeout_ms ({}) must not exceed interval_seconds ({}s)",
    config.probe.timeout_ms,
    config.probe.interval_seconds
  );

  anyhow::ensure!(
    !config.metrics.listen_address.is_empty(),
    "Metrics listen_address must not be empty"
  );
  anyhow::ensure!(
    config.metrics.listen_port > 0,
    "Metrics listen_port must be non-zero"
  );

  Ok(())
}

#[cfg(test)]
mod tests {
  use std::io::Write;

  use super::*;

  fn write_config(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
  }

  #[test]
  fn test_load_nonexistent_file() {
    let result = load_config("nonexistent.toml");
    assert!(result.is_err());
  }

  #[test]
  fn test_example_config_is_valid() {
    let config = load_config(concat!(env!("CARGO_MANIFEST_DIR"), "/config.example.toml")).unwrap();
    assert_eq!(config.probe.interval_seconds, 10);
    assert!(!config.probe.fail_on_http_error);
  }

  #[test]
  fn test_missing_file_falls_back_to_defaults() {
    let config = load_or_default("definitely-not-here.toml").unwrap();
    assert_eq!(config.probe.target_url, "https://www.google.com");
    assert_eq!(config.metrics.listen_port, 8080);
  }

  #[test]
  fn test_load_valid_file() {
    let file = write_config(
      "[probe]\ntarget_url = \"http://gke.internal:8081/ping\"\ninterval_seconds = 30\n\n[metrics]\nlisten_port = 9100\n",
    );
    let config = load_config(file.path().to_str().unwrap()).unwrap();
    assert_eq!(config.probe.target_url, "http://gke.internal:8081/ping");
    assert_eq!(config.probe.interval_seconds, 30);
    assert_eq!(config.metrics.bind_address(), "0.0.0.0:9100");
  }

  #[test]
  fn test_invalid_file_is_error_even_with_fallback() {
    let file = write_config("[probe]\ninterval_seconds = \"ten\"\n");
    assert!(load_or_default(file.path().to_str().unwrap()).is_err());
  }

  #[test]
  fn test_rejects_non_http_scheme() {
    let mut config = AppConfig::default();
    config.probe.target_url = "ftp://example.com".to_string();
    assert!(validate_config(&config).is_err());
  }

  #[test]
  fn test_rejects_relative_url() {
    let mut config = AppConfig::default();
    config.probe.target_url = "www.google.com".to_string();
    assert!(validate_config(&config).is_err());
  }

  #[test]
  fn test_rejects_timeout_longer_than_interval() {
    let mut config = AppConfig::default();
    config.probe.interval_seconds = 2;
    config.probe.timeout_ms = 2_500;
    assert!(validate_config(&config).is_err());

    config.probe.timeout_ms = 2_000;
    assert!(validate_config(&config).is_ok());
  }

  #[test]
  fn test_rejects_zero_interval_and_port() {
    let mut config = AppConfig::default();
    config.probe.interval_seconds = 0;
    assert!(validate_config(&config).is_err());

    let mut config = AppConfig::default();
    config.metrics.listen_port = 0;
    assert!(validate_config(&config).is_err());
  }
}
