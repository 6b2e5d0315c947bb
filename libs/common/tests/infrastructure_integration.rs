//! Integration tests for the infrastructure components
//!
//! These tests verify that the Redis key-value store backing persisted
//! client state is configured and accessible from the application.

use common::cache::{RedisConfig, RedisPool};

/// Round-trips a JSON payload through Redis the way the state store does
#[tokio::test]
#[ignore = "requires a running Redis server"]
async fn test_infrastructure_integration() -> Result<(), Box<dyn std::error::Error>> {
    let redis_config = RedisConfig::from_env()?;
    let redis_pool = RedisPool::new(&redis_config)?;

    assert!(
        redis_pool.health_check().await?,
        "Redis health check failed"
    );

    let test_key = "integration_test_state";
    let test_value = r#"{"watchlist":[],"theme":"light"}"#;

    redis_pool.set(test_key, test_value).await?;

    let retrieved_value = redis_pool.get(test_key).await?;
    assert_eq!(
        retrieved_value,
        Some(test_value.to_string()),
        "Redis SET/GET test failed"
    );

    redis_pool.delete(test_key).await?;

    let retrieved_value = redis_pool.get(test_key).await?;
    assert_eq!(retrieved_value, None, "Redis delete operation failed");

    Ok(())
}
