//! Custom error types for the state store

use thiserror::Error;

/// Errors raised by persistence backends
///
/// The store itself never surfaces these to callers: a failed write is logged
/// and the in-memory state stays authoritative for the session.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The snapshot could not be serialized
    #[error("State serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// File backend error
    #[error("State file error: {0}")]
    Io(#[from] std::io::Error),

    /// Redis backend error
    #[error("State cache error: {0}")]
    Cache(#[from] common::error::CacheError),

    /// Invalid storage key
    #[error("Invalid storage key: {0:?}")]
    InvalidKey(String),
}

/// Type alias for Result with StoreError
pub type StoreResult<T> = Result<T, StoreError>;
