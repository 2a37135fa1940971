//! Error types for the Riffle server client.

use thiserror::Error;

/// Errors that can occur when talking to a Riffle server.
#[derive(Error, Debug)]
pub enum ServerClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server returned an error response
    #[error("Server error ({status}): {message}")]
    ServerError { status: u16, message: String },

    /// Authentication required but no token available (or it was rejected)
    #[error("Authentication required")]
    AuthRequired,

    /// Requested release, playlist or track does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid server URL
    #[error("Invalid server URL: {0}")]
    InvalidUrl(String),

    /// Failed to parse server response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Server is offline or unreachable
    #[error("Server unreachable: {0}")]
    ServerUnreachable(String),

    /// Settings could not be loaded or are invalid
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<config::ConfigError> for ServerClientError {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

/// Result type for server client operations.
pub type Result<T> = std::result::Result<T, ServerClientError>;
