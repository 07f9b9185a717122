//! Error types for the debate client.

use thiserror::Error;

/// Result type for debate client operations.
pub type Result<T> = std::result::Result<T, DebateError>;

/// Debate client errors.
///
/// These never escape a [`DebateSession`](crate::DebateSession) run; the
/// session records them in [`DebateState::error`](crate::DebateState::error).
#[derive(Debug, Error)]
pub enum DebateError {
    /// Configuration error (invalid URL, unsupported language)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Network error (connection failed, stream interrupted)
    #[error("Network error: {0}")]
    Network(String),

    /// Non-success response from the debate service
    #[error("HTTP {status}: {message}")]
    Api { status: u16, message: String },

    /// Parse error (invalid JSON, unexpected payload shape)
    #[error("Parse error: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for DebateError {
    fn from(err: reqwest::Error) -> Self {
        DebateError::Network(err.to_string())
    }
}
