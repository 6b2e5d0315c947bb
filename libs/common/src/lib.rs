//! Common library for the Premier+ workspace
//!
//! This crate provides shared functionality used across the content client,
//! the state store and the API service: the Redis key-value pool, error
//! types and environment configuration helpers.

pub mod cache;
pub mod env;
pub mod error;

/// Example usage of the cache module
///
/// ```rust,no_run
/// use common::cache::{RedisConfig, RedisPool};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = RedisConfig::from_env()?;
///     let pool = RedisPool::new(&config)?;
///     println!("Redis health check: {}", pool.health_check().await?);
///     Ok(())
/// }
/// ```
pub fn example_usage() {}
