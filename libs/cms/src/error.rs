//! Custom error types for the content client

use thiserror::Error;

/// Errors raised while talking to the content store
///
/// Missing or malformed fields inside a document are never errors; the mapper
/// substitutes defaults for them. Only transport and configuration problems
/// end up here.
#[derive(Error, Debug)]
pub enum CmsError {
    /// The HTTP request could not be sent or the connection failed
    #[error("Content store request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The content store answered with a non-success status
    #[error("Content store returned {status}: {message}")]
    Status { status: u16, message: String },

    /// The response body was not the expected JSON envelope
    #[error("Content store response could not be decoded: {0}")]
    Decode(#[from] serde_json::Error),

    /// Fixture documents could not be read
    #[error("Fixture file error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Content store configuration error: {0}")]
    Configuration(String),
}

/// Type alias for Result with CmsError
pub type CmsResult<T> = Result<T, CmsError>;

impl From<common::error::EnvError> for CmsError {
    fn from(err: common::error::EnvError) -> Self {
        CmsError::Configuration(err.to_string())
    }
}
