//! # av-core
//!
//! Shared vocabulary for the AlphaVantage client crates: the [`ApiFunction`]
//! identifiers, wire constants, the [`Error`] type, [`Config`] and the
//! locale-invariant value [`parsing`] helpers.

pub mod config;
pub mod error;
pub mod function;
pub mod parsing;

pub use config::Config;
pub use error::{Error, Result};
pub use function::ApiFunction;

/// Base URL for AlphaVantage API
pub const ALPHA_VANTAGE_BASE_URL: &str = "https://www.alphavantage.co/query";

/// Reserved query parameter carrying the API key
pub const API_KEY_QUERY_VAR: &str = "apikey";

/// Reserved query parameter carrying the [`ApiFunction`] wire name
pub const FUNCTION_QUERY_VAR: &str = "function";

/// Substring the service embeds in a response body to flag a failed call.
pub const ERROR_MARKER: &str = "Error Message";

/// Default request timeout handed to the HTTP transport
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
