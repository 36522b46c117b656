//! # av-client
//!
//! A small AlphaVantage API client for Rust.
//!
//! Every call runs the same pipeline:
//!
//! 1. [`request::build_request`] composes a GET request from the API key, the
//!    [`ApiFunction`] and optional query parameters.
//! 2. A [`Transport`] sends it and returns the raw body.
//! 3. [`response::assert_not_error`] rejects bodies carrying the service's
//!    `Error Message` marker.
//! 4. Optionally, [`response::strip_sequence_prefixes`] turns keys such as
//!    `"1. open"` into `"open"`.
//! 5. Optionally, the text is parsed into a [`serde_json::Value`].
//!
//! ## Usage
//!
//! ```rust,no_run
//! use av_client::{AlphaVantageClient, ApiFunction};
//! use av_core::Config;
//! use std::collections::HashMap;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_env()?;
//!     let client = AlphaVantageClient::new(config)?;
//!
//!     let mut query = HashMap::new();
//!     query.insert("symbol".to_string(), "AAPL".to_string());
//!
//!     let raw = client.request_raw_json(ApiFunction::TimeSeriesDaily, Some(&query), false).await?;
//!     println!("{} bytes", raw.len());
//!
//!     client.close();
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! All methods return `Result<T, av_core::Error>`. Transport failures arrive
//! as `Error::Transport` with the original error boxed inside, API failures
//! as `Error::Api` carrying the full body, malformed JSON as
//! `Error::JsonParse`. Nothing is retried.

#![deny(missing_docs)]
#![warn(clippy::all)]

pub mod client;
pub mod request;
pub mod response;
pub mod transport;

// Re-export the main client and common types
pub use av_core::{ApiFunction, Config, Error, Result};
pub use client::AlphaVantageClient;
pub use request::RequestDescriptor;
pub use transport::{HttpTransport, Transport};

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_client_creation() {
    let config = Config::default_with_key("test_key".to_string());
    let client = AlphaVantageClient::new(config).expect("Failed to create client");
    assert_eq!(client.base_url().as_str(), av_core::ALPHA_VANTAGE_BASE_URL);
    client.close();
  }

  #[test]
  fn test_parsed_request_through_injected_transport() {
    struct Canned;

    #[async_trait::async_trait]
    impl Transport for Canned {
      async fn send(&self, _request: &RequestDescriptor) -> Result<String> {
        Ok(r#"{"Meta Data": {"1. Information": "Daily Prices"}}"#.to_string())
      }
    }

    let config = Config::default_with_key("test_key");
    let client = AlphaVantageClient::with_transport(config, Canned).unwrap();

    let doc = tokio_test::block_on(client.request_parsed_json(ApiFunction::TimeSeriesDaily, None, true))
      .unwrap();
    assert_eq!(doc["Meta Data"]["Information"], "Daily Prices");
    client.close();
  }
}
