//! Client error types.

use thiserror::Error;

/// Client error type.
#[derive(Debug, Error)]
pub enum Error {
    /// HTTP transport failure (connection refused, TLS, timeout, ...).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// URL parsing failed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A header value could not be encoded.
    #[error("Invalid header value for {name}")]
    InvalidHeader {
        /// Header name.
        name: &'static str,
    },

    /// Request path violated the builder contract.
    #[error("Invalid request path: {0}")]
    InvalidPath(String),

    /// Invalid client configuration (region/host/credential).
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, Error>;
