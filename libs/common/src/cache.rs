//! Redis key-value module for the Premier+ workspace
//!
//! This module provides the Redis connection used as a durable key-value
//! store for persisted client state, with plain get/set/delete operations.

use redis::{AsyncCommands, Client};
use tracing::{debug, info};

use crate::env;
use crate::error::{CacheError, CacheResult};

/// Configuration for Redis connection
#[derive(Debug, Clone)]
pub struct RedisConfig {
    /// Redis connection URL (e.g., "redis://localhost:6379")
    pub url: String,
    /// Prefix prepended to every key written through the pool
    pub key_prefix: String,
}

impl RedisConfig {
    /// Create a new RedisConfig from environment variables
    ///
    /// # Environment Variables
    /// - `REDIS_URL`: Redis connection URL (default: "redis://localhost:6379")
    /// - `REDIS_KEY_PREFIX`: Key namespace (default: "premier")
    pub fn from_env() -> CacheResult<Self> {
        let url = env::var_or("REDIS_URL", "redis://localhost:6379");
        if !url.starts_with("redis://") && !url.starts_with("rediss://") {
            return Err(CacheError::Configuration(format!(
                "Unsupported Redis URL scheme: {}",
                url
            )));
        }

        Ok(RedisConfig {
            url,
            key_prefix: env::var_or("REDIS_KEY_PREFIX", "premier"),
        })
    }
}

/// Redis connection pool
#[derive(Clone)]
pub struct RedisPool {
    client: Client,
    key_prefix: String,
}

impl RedisPool {
    /// Initialize a new Redis connection pool
    pub fn new(config: &RedisConfig) -> CacheResult<Self> {
        let client = Client::open(config.url.clone()).map_err(CacheError::Connection)?;
        info!("Redis client initialized with URL: {}", config.url);
        Ok(RedisPool {
            client,
            key_prefix: config.key_prefix.clone(),
        })
    }

    fn namespaced(&self, key: &str) -> String {
        if self.key_prefix.is_empty() {
            key.to_string()
        } else {
            format!("{}:{}", self.key_prefix, key)
        }
    }

    async fn get_connection(&self) -> CacheResult<redis::aio::MultiplexedConnection> {
        self.client
            .get_multiplexed_async_connection()
            .await
            .map_err(CacheError::Connection)
    }

    /// Store a value without expiry
    pub async fn set(&self, key: &str, value: &str) -> CacheResult<()> {
        let key = self.namespaced(key);
        let mut conn = self.get_connection().await?;
        let _: () = conn.set(&key, value).await.map_err(CacheError::Command)?;
        debug!("Stored {} bytes under {}", value.len(), key);
        Ok(())
    }

    /// Get a value by key
    pub async fn get(&self, key: &str) -> CacheResult<Option<String>> {
        let key = self.namespaced(key);
        let mut conn = self.get_connection().await?;
        conn.get(&key).await.map_err(CacheError::Command)
    }

    /// Delete a key
    pub async fn delete(&self, key: &str) -> CacheResult<()> {
        let key = self.namespaced(key);
        let mut conn = self.get_connection().await?;
        let _: u64 = conn.del(&key).await.map_err(CacheError::Command)?;
        Ok(())
    }

    /// Check if Redis is reachable
    pub async fn health_check(&self) -> CacheResult<bool> {
        let mut conn = self.get_connection().await?;
        let pong: String = redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .map_err(CacheError::Command)?;
        Ok(pong == "PONG")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn local_config() -> RedisConfig {
        RedisConfig {
            url: "redis://localhost:6379".to_string(),
            key_prefix: "premier-test".to_string(),
        }
    }

    #[test]
    fn test_keys_are_namespaced() {
        let pool = RedisPool::new(&local_config()).expect("client should open lazily");
        assert_eq!(pool.namespaced("state"), "premier-test:state");

        let bare = RedisPool::new(&RedisConfig {
            key_prefix: String::new(),
            ..local_config()
        })
        .expect("client should open lazily");
        assert_eq!(bare.namespaced("state"), "state");
    }

    #[test]
    fn test_invalid_url_is_rejected() {
        let result = RedisPool::new(&RedisConfig {
            url: "not a url".to_string(),
            key_prefix: String::new(),
        });
        assert!(matches!(result, Err(CacheError::Connection(_))));
    }

    #[tokio::test]
    #[ignore = "requires a running Redis server"]
    async fn test_set_get_delete() -> CacheResult<()> {
        let pool = RedisPool::new(&local_config())?;
        assert!(pool.health_check().await?);

        pool.set("test_key", "test_value").await?;
        assert_eq!(pool.get("test_key").await?, Some("test_value".to_string()));

        pool.delete("test_key").await?;
        assert_eq!(pool.get("test_key").await?, None);

        Ok(())
    }
}
