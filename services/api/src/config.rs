//! Service configuration

use std::path::PathBuf;
use std::time::Duration;

use config::{Config, ConfigError, Environment};
use serde::Deserialize;

/// Where the persisted client state lives
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StateBackendKind {
    #[default]
    File,
    Redis,
    Memory,
}

/// API service configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    /// Socket address to listen on
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
    /// Persistence backend for the watchlist and theme
    #[serde(default)]
    pub state_backend: StateBackendKind,
    /// Directory used by the file backend
    #[serde(default = "default_state_dir")]
    pub state_dir: PathBuf,
    /// Quiet period before a search-as-you-type query is issued
    #[serde(default = "default_search_debounce_ms")]
    pub search_debounce_ms: u64,
}

fn default_bind_addr() -> String {
    "0.0.0.0:3001".to_string()
}

fn default_state_dir() -> PathBuf {
    PathBuf::from(".premier")
}

fn default_search_debounce_ms() -> u64 {
    500
}

impl ServiceConfig {
    /// Load from `API_*` environment variables
    ///
    /// # Environment Variables
    /// - `API_BIND_ADDR` (default: "0.0.0.0:3001")
    /// - `API_STATE_BACKEND`: `file`, `redis` or `memory` (default: "file")
    /// - `API_STATE_DIR` (default: ".premier")
    /// - `API_SEARCH_DEBOUNCE_MS` (default: 500)
    pub fn from_env() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(Environment::with_prefix("API").try_parsing(true))
            .build()?
            .try_deserialize()
    }

    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }
}
