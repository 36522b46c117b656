//! Configuration management for AlphaVantage client

use crate::error::{Error, Result};
use dotenvy::dotenv;
use serde::Deserialize;
use std::env;
use std::fmt;

/// Main configuration struct for AlphaVantage client
#[derive(Clone, Deserialize)]
pub struct Config {
  /// AlphaVantage API key
  pub api_key: String,

  /// Base URL for AlphaVantage API
  #[serde(default = "default_base_url")]
  pub base_url: String,

  /// Request timeout in seconds, applied by the HTTP transport
  #[serde(default = "default_timeout_secs")]
  pub timeout_secs: u64,
}

fn default_base_url() -> String {
  crate::ALPHA_VANTAGE_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
  crate::DEFAULT_TIMEOUT_SECS
}

impl Config {
  /// Load configuration from environment variables
  ///
  /// Reads `ALPHA_VANTAGE_API_KEY` (required), `AV_BASE_URL` and
  /// `AV_TIMEOUT_SECS`. A `.env` file is loaded first when present.
  pub fn from_env() -> Result<Self> {
    dotenv().ok();

    let api_key = env::var("ALPHA_VANTAGE_API_KEY")
      .map_err(|_| Error::ApiKey("ALPHA_VANTAGE_API_KEY not set".to_string()))?;

    let timeout_secs = env::var("AV_TIMEOUT_SECS")
      .unwrap_or_else(|_| crate::DEFAULT_TIMEOUT_SECS.to_string())
      .parse()
      .map_err(|_| Error::Config("Invalid AV_TIMEOUT_SECS".to_string()))?;

    let base_url = env::var("AV_BASE_URL").unwrap_or_else(|_| default_base_url());

    Ok(Config { api_key, base_url, timeout_secs })
  }

  /// Create a config with default values
  pub fn default_with_key(api_key: impl Into<String>) -> Self {
    Config {
      api_key: api_key.into(),
      base_url: default_base_url(),
      timeout_secs: crate::DEFAULT_TIMEOUT_SECS,
    }
  }

  /// Point the config at a different endpoint, e.g. a mock server
  pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
    self.base_url = base_url.into();
    self
  }
}

// The API key is only ever sent in the request URL.
impl fmt::Debug for Config {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Config")
      .field("api_key", &"***")
      .field("base_url", &self.base_url)
      .field("timeout_secs", &self.timeout_secs)
      .finish()
  }
}
