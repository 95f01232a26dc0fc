//! Probe HTTP Client - reqwest-backed ProbeTransport
//!
//! Wraps a single shared reqwest client configured with the probe
//! request timeout. Only the status line is kept; the response body
//! is dropped unread as soon as headers arrive.

use std::error::Error as StdError;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::domain::probe::{ProbeError, ProbeResponse};
use crate::ports::transport::ProbeTransport;

/// Configuration for the probe HTTP client.
#[derive(Debug, Clone)]
pub struct HttpTransportConfig {
  /// Whole-request timeout (connect + headers).
  pub timeout: Duration,
  /// `User-Agent` header sent with every probe.
  pub user_agent: String,
}

impl Default for HttpTransportConfig {
  fn default() -> Self {
    Self {
      timeout: Duration::from_secs(5),
      user_agent: concat!("hybrid-link-probe/", env!("CARGO_PKG_VERSION")).to_string(),
    }
  }
}

/// reqwest implementation of the `ProbeTransport` port.
pub struct HttpTransport {
  /// Underlying HTTP client.
  http: Client,
  /// Timeout reported in `ProbeError::Timeout`.
  timeout: Duration,
}

impl HttpTransport {
  /// Create a new probe client.
  pub fn new(config: HttpTransportConfig) -> Result<Self> {
    let http = Client::builder()
      .timeout(config.timeout)
      .user_agent(config.user_agent)
      .build()
      .context("Failed to build HTTP client")?;

    Ok(Self {
      http,
      timeout: config.timeout,
    })
  }

  /// Map a reqwest failure onto the transport-agnostic probe error.
  fn classify_error(&self, err: &reqwest::Error) -> ProbeError {
    if err.is_timeout() {
      ProbeError::Timeout(self.timeout)
    } else if err.is_connect() {
      ProbeError::Connect(error_chain(err))
    } else {
      ProbeError::Request(error_chain(err))
    }
  }
}

#[async_trait]
impl ProbeTransport for HttpTransport {
  async fn get(&self, url: &str) -> Result<ProbeResponse, ProbeError> {
    match self.http.get(url).send().await {
      Ok(response) => {
        let status = response.status().as_u16();
        drop(response);
        debug!(url, status, "Probe response received");
        Ok(ProbeResponse { status })
      }
      Err(e) => Err(self.classify_error(&e)),
    }
  }
}

/// Render an error and its sources as `outer: inner: root`.
///
/// reqwest's own `Display` omits the cause (e.g. "connection refused").
fn error_chain(err: &(dyn StdError + 'static)) -> String {
  let mut message = err.to_string();
  let mut source = err.source();
  while let Some(cause) = source {
    message.push_str(": ");
    message.push_str(&cause.to_string());
    source = cause.source();
  }
  message
}

#[cfg(test)]
mod tests {
  use super::*;

  #[derive(Debug)]
  struct Leaf;

  impl std::fmt::Display for Leaf {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
      write!(f, "connection refused")
    }
  }

  impl StdError for Leaf {}

  #[derive(Debug)]
  struct Wrapper(Leaf);

  impl std::fmt::Display for Wrapper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
      write!(f, "error sending request")
    }
  }

  impl StdError for Wrapper {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
      Some(&self.0)
    }
  }

  #[test]
  fn test_error_chain_includes_root_cause() {
    let err = Wrapper(Leaf);
    assert_eq!(error_chain(&err), "error sending request: connection refused");
  }

  #[test]
  fn test_default_config() {
    let config = HttpTransportConfig::default();
    assert_eq!(config.timeout, Duration::from_secs(5));
    assert!(config.user_agent.starts_with("hybrid-link-probe/"));
  }

  #[tokio::test]
  async fn test_connection_refused_is_connect_error() {
    // Bind then drop to obtain a local port with no listener.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let transport = HttpTransport::new(HttpTransportConfig::default()).unwrap();
    let result = transport.get(&format!("http://{addr}/")).await;
    assert!(matches!(result, Err(ProbeError::Connect(_))), "got {result:?}");
  }
}
