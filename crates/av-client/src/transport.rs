//! HTTP transport layer for AlphaVantage API requests

use crate::request::RequestDescriptor;
use async_trait::async_trait;
use av_core::{Config, Error, Result};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, instrument};

/// Sends composed requests and returns the raw response body
///
/// Implementations must be usable from concurrent calls on a shared
/// reference; the client adds no locking of its own. Failures are reported
/// through [`Error::Transport`] and reach the caller unchanged.
#[async_trait]
pub trait Transport: Send + Sync {
  /// Issue `request` and return the response body text
  async fn send(&self, request: &RequestDescriptor) -> Result<String>;

  /// Release any resources held by the transport
  ///
  /// Consumes the transport, so it runs at most once per instance.
  fn close(self: Box<Self>) {}
}

/// Production transport backed by a [`reqwest::Client`]
pub struct HttpTransport {
  client: Client,
  timeout: Duration,
}

impl HttpTransport {
  /// Create a new transport instance
  ///
  /// # Errors
  ///
  /// Returns [`Error::Transport`] if the underlying HTTP client cannot be built.
  pub fn new(config: &Config) -> Result<Self> {
    let timeout = Duration::from_secs(config.timeout_secs);
    let client = Client::builder()
      .timeout(timeout)
      .user_agent(concat!("av-client/", env!("CARGO_PKG_VERSION")))
      .build()
      .map_err(Error::transport)?;

    Ok(Self { client, timeout })
  }

  /// Wrap an already configured reqwest client
  pub fn from_client(client: Client) -> Self {
    Self { client, timeout: Duration::from_secs(av_core::DEFAULT_TIMEOUT_SECS) }
  }

  /// Get request timeout duration
  pub fn timeout(&self) -> Duration {
    self.timeout
  }
}

#[async_trait]
impl Transport for HttpTransport {
  #[instrument(skip_all, fields(method = %request.method()))]
  async fn send(&self, request: &RequestDescriptor) -> Result<String> {
    debug!("Making request to: {}", request.redacted_url());

    let response = self
      .client
      .request(request.method().clone(), request.url().clone())
      .send()
      .await
      .map_err(|e| Error::transport(e.without_url()))?;

    // Status codes are not interpreted here; the body decides success.
    debug!("Response status: {}", response.status());

    let text = response.text().await.map_err(|e| Error::transport(e.without_url()))?;
    debug!("Response body length: {} bytes", text.len());
    Ok(text)
  }

  fn close(self: Box<Self>) {
    debug!("Releasing HTTP transport");
  }
}

impl std::fmt::Debug for HttpTransport {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("HttpTransport").field("timeout", &self.timeout).finish()
  }
}
