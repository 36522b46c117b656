/*
 *
 *
 *
 *
 * MIT License
 * Copyright (c) 2025. Dwight J. Browne
 * dwight[-at-]dwightjbrowne[-dot-]com
 *
 *
 * Permission is hereby granted, free of charge, to any person obtaining a copy
 * of this software and associated documentation files (the "Software"), to deal
 * in the Software without restriction, including without limitation the rights
 * to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
 * copies of the Software, and to permit persons to whom the Software is
 * furnished to do so, subject to the following conditions:
 *
 * The above copyright notice and this permission notice shall be included in all
 * copies or substantial portions of the Software.
 *
 * THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
 * IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
 * FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
 * AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
 * LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
 * OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
 * SOFTWARE.
 */

//! Client orchestration: build, send, validate, normalize, parse

use crate::request::build_request;
use crate::response::{assert_not_error, parse_document, strip_sequence_prefixes};
use crate::transport::{HttpTransport, Transport};
use av_core::{ApiFunction, Config, Error, Result};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;
use tracing::{debug, error, info, instrument};
use url::Url;

/// Main AlphaVantage API client
///
/// Holds the API key and owns a [`Transport`]. Each request call issues
/// exactly one HTTP request and either returns the complete result or fails.
///
/// The transport is released exactly once: explicitly through
/// [`close`](Self::close), or when the client is dropped.
///
/// # Examples
///
/// ```rust,no_run
/// use av_client::{AlphaVantageClient, ApiFunction};
/// use av_core::Config;
/// use std::collections::HashMap;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = AlphaVantageClient::new(Config::from_env()?)?;
///
///     let mut query = HashMap::new();
///     query.insert("symbol".to_string(), "IBM".to_string());
///
///     let quote = client.request_parsed_json(ApiFunction::GlobalQuote, Some(&query), true).await?;
///     println!("IBM price: {}", quote["Global Quote"]["price"]);
///
///     client.close();
///     Ok(())
/// }
/// ```
pub struct AlphaVantageClient {
  api_key: String,
  base_url: Url,
  transport: Option<Box<dyn Transport>>,
}

impl AlphaVantageClient {
  /// Create a new AlphaVantage API client backed by [`HttpTransport`]
  ///
  /// # Errors
  ///
  /// Returns an error if the base URL is invalid or the HTTP client cannot be created.
  pub fn new(config: Config) -> Result<Self> {
    let transport = HttpTransport::new(&config)?;
    Self::with_transport(config, transport)
  }

  /// Create a client that sends requests through `transport`
  ///
  /// # Errors
  ///
  /// Returns [`Error::InvalidUrl`] if `config.base_url` cannot be parsed.
  pub fn with_transport<T>(config: Config, transport: T) -> Result<Self>
  where
    T: Transport + 'static,
  {
    let base_url = Url::parse(&config.base_url)
      .map_err(|e| Error::InvalidUrl(format!("{}: {}", config.base_url, e)))?;

    Ok(Self { api_key: config.api_key, base_url, transport: Some(Box::new(transport)) })
  }

  /// Request an API function and return the response body as text
  ///
  /// # Arguments
  ///
  /// * `function` - The API function to call
  /// * `query` - Additional query parameters; `apikey` and `function` are overridden
  /// * `normalize` - Strip ordinal key prefixes, so `"1. price"` becomes `"price"`
  ///
  /// # Errors
  ///
  /// * [`Error::Transport`] if the request could not be sent
  /// * [`Error::Api`] if the body carries the service's error marker
  #[instrument(skip(self, query), fields(function = %function))]
  pub async fn request_raw_json(
    &self,
    function: ApiFunction,
    query: Option<&HashMap<String, String>>,
    normalize: bool,
  ) -> Result<String> {
    let transport = self.transport.as_deref().ok_or(Error::ClientClosed)?;
    let request = build_request(&self.base_url, &self.api_key, function, query);
    debug!("Sending {}", request);

    let body = transport.send(&request).await?;

    #[cfg(feature = "debug-logging")]
    tracing::trace!("Response body: {}", body);

    if let Err(e) = assert_not_error(&body) {
      error!("API returned an error for function {}", function);
      return Err(e);
    }

    if normalize {
      return Ok(strip_sequence_prefixes(&body));
    }
    Ok(body)
  }

  /// Request an API function and return the parsed JSON document
  ///
  /// # Errors
  ///
  /// Everything [`request_raw_json`](Self::request_raw_json) returns, plus
  /// [`Error::JsonParse`] when the body is not valid JSON.
  pub async fn request_parsed_json(
    &self,
    function: ApiFunction,
    query: Option<&HashMap<String, String>>,
    normalize: bool,
  ) -> Result<Value> {
    let text = self.request_raw_json(function, query, normalize).await?;
    let document = parse_document(&text)?;
    info!("Successfully parsed response for function: {}", function);
    Ok(document)
  }

  /// Request an API function and deserialize the body into `T`
  ///
  /// Combine with `normalize = true` to deserialize into structs whose
  /// field names carry no ordinal prefixes.
  pub async fn request_as<T>(
    &self,
    function: ApiFunction,
    query: Option<&HashMap<String, String>>,
    normalize: bool,
  ) -> Result<T>
  where
    T: DeserializeOwned,
  {
    let text = self.request_raw_json(function, query, normalize).await?;
    Ok(serde_json::from_str(&text)?)
  }

  /// Base URL requests are sent to
  pub fn base_url(&self) -> &Url {
    &self.base_url
  }

  /// Release the transport and consume the client
  pub fn close(mut self) {
    self.release();
  }

  fn release(&mut self) {
    if let Some(transport) = self.transport.take() {
      debug!("Releasing client transport");
      transport.close();
    }
  }
}

impl Drop for AlphaVantageClient {
  fn drop(&mut self) {
    self.release();
  }
}

impl std::fmt::Debug for AlphaVantageClient {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("AlphaVantageClient")
      .field("api_key", &"***")
      .field("base_url", &self.base_url.as_str())
      .field("open", &self.transport.is_some())
      .finish()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::request::RequestDescriptor;
  use async_trait::async_trait;
  use std::io;
  use std::sync::atomic::{AtomicUsize, Ordering};
  use std::sync::{Arc, Mutex};

  /// In-memory transport returning a fixed body and recording traffic.
  #[derive(Clone, Default)]
  struct FakeTransport {
    body: String,
    fail: bool,
    sent: Arc<Mutex<Vec<RequestDescriptor>>>,
    closed: Arc<AtomicUsize>,
  }

  impl FakeTransport {
    fn returning(body: &str) -> Self {
      Self { body: body.to_string(), ..Default::default() }
    }

    fn failing() -> Self {
      Self { fail: true, ..Default::default() }
    }
  }

  #[async_trait]
  impl Transport for FakeTransport {
    async fn send(&self, request: &RequestDescriptor) -> Result<String> {
      self.sent.lock().unwrap().push(request.clone());
      if self.fail {
        return Err(Error::transport(io::Error::new(io::ErrorKind::TimedOut, "timed out")));
      }
      Ok(self.body.clone())
    }

    fn close(self: Box<Self>) {
      self.closed.fetch_add(1, Ordering::SeqCst);
    }
  }

  fn client_with(transport: FakeTransport) -> AlphaVantageClient {
    let config = Config::default_with_key("test_key").with_base_url("https://mock.alphavantage.co/query");
    AlphaVantageClient::with_transport(config, transport).unwrap()
  }

  #[tokio::test]
  async fn test_raw_json_is_returned_verbatim() {
    let body = "{\n  \"1. price\": \"10.5\",\n  \"name\": \"ACME\"\n}";
    let client = client_with(FakeTransport::returning(body));

    let text = client.request_raw_json(ApiFunction::GlobalQuote, None, false).await.unwrap();
    assert_eq!(text, body);
  }

  #[tokio::test]
  async fn test_raw_json_normalized() {
    let client = client_with(FakeTransport::returning(r#"{"1. price": "10.5", "name": "ACME"}"#));

    let text = client.request_raw_json(ApiFunction::GlobalQuote, None, true).await.unwrap();
    assert_eq!(text, r#"{"price": "10.5", "name": "ACME"}"#);
  }

  #[tokio::test]
  async fn test_parsed_json_normalized() {
    let client = client_with(FakeTransport::returning(r#"{"1a. open": "1.0"}"#));

    let doc = client.request_parsed_json(ApiFunction::TimeSeriesDaily, None, true).await.unwrap();
    let fields = doc.as_object().unwrap();
    assert_eq!(fields.len(), 1);
    assert_eq!(fields["open"], "1.0");
  }

  #[tokio::test]
  async fn test_request_carries_key_function_and_query() {
    let transport = FakeTransport::returning("{}");
    let sent = transport.sent.clone();
    let client = client_with(transport);

    let mut query = HashMap::new();
    query.insert("symbol".to_string(), "IBM".to_string());
    query.insert("apikey".to_string(), "other".to_string());
    client.request_raw_json(ApiFunction::Overview, Some(&query), false).await.unwrap();

    let sent = sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    let params = sent[0].query_params();
    assert_eq!(params["apikey"], "test_key");
    assert_eq!(params["function"], "OVERVIEW");
    assert_eq!(params["symbol"], "IBM");
  }

  #[tokio::test]
  async fn test_api_error_carries_body() {
    let body = r#"{"Error Message": "Invalid API call. Please retry or visit the documentation"}"#;
    let client = client_with(FakeTransport::returning(body));

    let err = client.request_parsed_json(ApiFunction::Overview, None, true).await.unwrap_err();
    assert_eq!(err.response_body(), Some(body));
  }

  #[tokio::test]
  async fn test_transport_error_propagates_unchanged() {
    let client = client_with(FakeTransport::failing());

    let err = client.request_raw_json(ApiFunction::Overview, None, false).await.unwrap_err();
    match err {
      Error::Transport(source) => {
        let io_err = source.downcast_ref::<io::Error>().unwrap();
        assert_eq!(io_err.kind(), io::ErrorKind::TimedOut);
      }
      other => panic!("Expected Transport error, got {:?}", other),
    }
  }

  #[tokio::test]
  async fn test_invalid_json_is_parse_error() {
    let client = client_with(FakeTransport::returning("<html>busy</html>"));

    let raw = client.request_raw_json(ApiFunction::Overview, None, false).await.unwrap();
    assert_eq!(raw, "<html>busy</html>");

    let err = client.request_parsed_json(ApiFunction::Overview, None, false).await.unwrap_err();
    assert!(matches!(err, Error::JsonParse(_)));
  }

  #[tokio::test]
  async fn test_request_as_typed() {
    #[derive(serde::Deserialize)]
    struct Quote {
      symbol: String,
      price: String,
    }

    let client = client_with(FakeTransport::returning(r#"{"01. symbol": "IBM", "05. price": "188.2000"}"#));
    let quote: Quote = client.request_as(ApiFunction::GlobalQuote, None, true).await.unwrap();
    assert_eq!(quote.symbol, "IBM");
    assert_eq!(quote.price, "188.2000");
  }

  #[test]
  fn test_close_releases_transport_once() {
    let transport = FakeTransport::returning("{}");
    let closed = transport.closed.clone();

    let client = client_with(transport);
    client.close();
    assert_eq!(closed.load(Ordering::SeqCst), 1);
  }

  #[test]
  fn test_drop_releases_transport_once() {
    let transport = FakeTransport::returning("{}");
    let closed = transport.closed.clone();

    {
      let _client = client_with(transport);
    }
    assert_eq!(closed.load(Ordering::SeqCst), 1);
  }

  #[test]
  fn test_invalid_base_url() {
    let config = Config::default_with_key("k").with_base_url("not a url");
    let result = AlphaVantageClient::with_transport(config, FakeTransport::default());
    assert!(matches!(result, Err(Error::InvalidUrl(_))));
  }

  #[test]
  fn test_debug_redacts_api_key() {
    let client = client_with(FakeTransport::default());
    let rendered = format!("{:?}", client);
    assert!(!rendered.contains("test_key"));
    assert!(rendered.contains("mock.alphavantage.co"));
  }

  #[tokio::test]
  async fn test_concurrent_requests_share_client() {
    let transport = FakeTransport::returning(r#"{"ok": true}"#);
    let sent = transport.sent.clone();
    let client = Arc::new(client_with(transport));

    let mut handles = Vec::new();
    for _ in 0..4 {
      let client = client.clone();
      handles.push(tokio::spawn(async move {
        client.request_parsed_json(ApiFunction::MarketStatus, None, false).await
      }));
    }
    for handle in handles {
      assert_eq!(handle.await.unwrap().unwrap()["ok"], true);
    }
    assert_eq!(sent.lock().unwrap().len(), 4);
  }
}
