//! Custom error types for the common library
//!
//! This module defines the error types shared by the crates that talk to
//! infrastructure (Redis, environment configuration).

use redis::RedisError;
use thiserror::Error;

/// Custom error type for key-value cache operations
#[derive(Error, Debug)]
pub enum CacheError {
    /// Error occurred while opening the client or a connection
    #[error("Cache connection error: {0}")]
    Connection(#[source] RedisError),

    /// Error occurred while executing a command
    #[error("Cache command error: {0}")]
    Command(#[source] RedisError),

    /// Configuration error
    #[error("Cache configuration error: {0}")]
    Configuration(String),
}

/// Type alias for Result with CacheError
pub type CacheResult<T> = Result<T, CacheError>;

/// Error raised when an environment variable holds a value that cannot be used
#[derive(Error, Debug, PartialEq, Eq)]
#[error("Invalid value {value:?} for environment variable {name}")]
pub struct EnvError {
    pub name: String,
    pub value: String,
}
