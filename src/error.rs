//! Error types for Confab.

use thiserror::Error;

/// Primary error type for all Confab operations.
#[derive(Error, Debug)]
pub enum ConfabError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Rate limited: retry after {retry_after_ms:?}ms")]
    RateLimited { retry_after_ms: Option<u64> },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Tokenization error: {0}")]
    Tokenization(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl ConfabError {
    /// Whether this failure came from a rejected credential.
    ///
    /// Lets callers branch toward re-authentication instead of retrying.
    pub fn is_authentication(&self) -> bool {
        matches!(self, Self::Authentication(_))
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, ConfabError>;
