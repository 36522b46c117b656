use thiserror::Error;

/// Boxed error produced by a transport implementation
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The main error type for av-* crates
#[derive(Error, Debug)]
pub enum Error {
  /// Configuration error
  #[error("Configuration error: {0}")]
  Config(String),

  /// API key error
  #[error("Failed to retrieve API key: {0}")]
  ApiKey(String),

  /// Network or connection failure raised by the transport, kept as-is
  #[error("Transport error: {0}")]
  Transport(#[source] BoxError),

  /// The service flagged the call as failed; `body` is the full response
  #[error("API error: {body}")]
  Api { body: String },

  /// Response text is not well-formed JSON
  #[error("JSON parse error: {0}")]
  JsonParse(#[from] serde_json::Error),

  /// Base URL could not be parsed
  #[error("Invalid URL: {0}")]
  InvalidUrl(String),

  /// Parse error for data processing
  #[error("Parse error: {0}")]
  Parse(String),

  /// The client's transport has already been released
  #[error("Client transport already released")]
  ClientClosed,
}

impl Error {
  /// Wrap a transport failure without altering it
  pub fn transport<E>(err: E) -> Self
  where
    E: Into<BoxError>,
  {
    Error::Transport(err.into())
  }

  /// Full response body for [`Error::Api`], `None` otherwise
  pub fn response_body(&self) -> Option<&str> {
    match self {
      Error::Api { body } => Some(body),
      _ => None,
    }
  }
}

/// Result type alias for av-* crates
pub type Result<T> = std::result::Result<T, Error>;
