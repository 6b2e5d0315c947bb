use anyhow::{Context, Result};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod config;
mod error;
mod models;
mod routes;
mod state;

use app_store::{AppStore, FilePersistence, MemoryPersistence, RedisPersistence, StateBackend};
use cms::{ContentApi, config::CmsConfig, store::ContentBackend};
use common::cache::{RedisConfig, RedisPool};
use tokio::{net::TcpListener, signal};

use crate::{
    config::{ServiceConfig, StateBackendKind},
    state::AppState,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Starting API service");

    let service_config = ServiceConfig::from_env().context("invalid API_* configuration")?;
    let cms_config = CmsConfig::from_env()?;

    let content = ContentApi::new(ContentBackend::from_config(&cms_config)?, &cms_config);

    let persistence = state_backend(&service_config).await?;
    let store = AppStore::hydrate(persistence).await;

    let app_state = AppState::new(content, store, service_config.search_debounce());

    info!("API service initialized successfully");

    // Start the web server
    let app = routes::create_router(app_state);

    let listener = TcpListener::bind(&service_config.bind_addr).await?;
    info!("API service listening on {}", service_config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("API service stopped");
    Ok(())
}

async fn state_backend(config: &ServiceConfig) -> Result<StateBackend> {
    let backend = match config.state_backend {
        StateBackendKind::Memory => {
            warn!("Using in-memory client state; nothing survives a restart");
            StateBackend::Memory(MemoryPersistence::new())
        }
        StateBackendKind::File => {
            info!("Persisting client state under {}", config.state_dir.display());
            StateBackend::File(FilePersistence::new(&config.state_dir))
        }
        StateBackendKind::Redis => {
            let pool = RedisPool::new(&RedisConfig::from_env()?)?;
            if pool.health_check().await? {
                info!("Redis connection successful");
            } else {
                anyhow::bail!("Failed to connect to Redis");
            }
            StateBackend::Redis(RedisPersistence::new(pool))
        }
    };
    Ok(backend)
}

async fn shutdown_signal() {
    if let Err(err) = signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", err);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
