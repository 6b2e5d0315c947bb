//! Durable key-value backends for the persisted state slice

use std::collections::HashMap;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use common::cache::RedisPool;
use tracing::debug;

use crate::error::{StoreError, StoreResult};

/// A durable string-keyed store
pub trait StatePersistence: Send + Sync {
    fn load(&self, key: &str) -> impl Future<Output = StoreResult<Option<String>>> + Send;
    fn save(&self, key: &str, value: &str) -> impl Future<Output = StoreResult<()>> + Send;
}

/// Process-local storage. Clones share the same entries.
#[derive(Debug, Clone, Default)]
pub struct MemoryPersistence {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryPersistence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw stored value, for inspection
    pub fn get(&self, key: &str) -> Option<String> {
        self.lock().get(key).cloned()
    }

    /// Write a raw value, bypassing the store
    pub fn put(&self, key: &str, value: &str) {
        self.lock().insert(key.to_string(), value.to_string());
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl StatePersistence for MemoryPersistence {
    fn load(&self, key: &str) -> impl Future<Output = StoreResult<Option<String>>> + Send {
        let value = self.get(key);
        async move { Ok(value) }
    }

    fn save(&self, key: &str, value: &str) -> impl Future<Output = StoreResult<()>> + Send {
        self.put(key, value);
        async { Ok(()) }
    }
}

/// One JSON file per key inside a directory
#[derive(Debug, Clone)]
pub struct FilePersistence {
    dir: PathBuf,
}

impl FilePersistence {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> StoreResult<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(StoreError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }

    async fn read(&self, key: &str) -> StoreResult<Option<String>> {
        let path = self.path_for(key)?;
        match tokio::fs::read_to_string(&path).await {
            Ok(raw) => Ok(Some(raw)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    async fn write(&self, key: &str, value: &str) -> StoreResult<()> {
        let path = self.path_for(key)?;
        tokio::fs::create_dir_all(&self.dir).await?;

        // Write-then-rename so a crash never leaves a truncated file behind
        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, value).await?;
        tokio::fs::rename(&tmp, &path).await?;

        debug!("Persisted {} bytes to {}", value.len(), path.display());
        Ok(())
    }
}

impl StatePersistence for FilePersistence {
    fn load(&self, key: &str) -> impl Future<Output = StoreResult<Option<String>>> + Send {
        self.read(key)
    }

    fn save(&self, key: &str, value: &str) -> impl Future<Output = StoreResult<()>> + Send {
        self.write(key, value)
    }
}

/// Redis-backed storage, for deployments running several API replicas
#[derive(Clone)]
pub struct RedisPersistence {
    pool: RedisPool,
}

impl RedisPersistence {
    pub fn new(pool: RedisPool) -> Self {
        Self { pool }
    }
}

impl StatePersistence for RedisPersistence {
    async fn load(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.pool.get(key).await?)
    }

    async fn save(&self, key: &str, value: &str) -> StoreResult<()> {
        Ok(self.pool.set(key, value).await?)
    }
}

/// The backend selected at startup
#[derive(Clone)]
pub enum StateBackend {
    Memory(MemoryPersistence),
    File(FilePersistence),
    Redis(RedisPersistence),
}

impl StatePersistence for StateBackend {
    async fn load(&self, key: &str) -> StoreResult<Option<String>> {
        match self {
            StateBackend::Memory(backend) => backend.load(key).await,
            StateBackend::File(backend) => backend.load(key).await,
            StateBackend::Redis(backend) => backend.load(key).await,
        }
    }

    async fn save(&self, key: &str, value: &str) -> StoreResult<()> {
        match self {
            StateBackend::Memory(backend) => backend.save(key, value).await,
            StateBackend::File(backend) => backend.save(key, value).await,
            StateBackend::Redis(backend) => backend.save(key, value).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_file_round_trip() -> StoreResult<()> {
        let dir = tempfile::tempdir()?;
        let files = FilePersistence::new(dir.path().join("state"));

        assert_eq!(files.load("ebs-premier-storage").await?, None);

        files.save("ebs-premier-storage", r#"{"theme":"light"}"#).await?;
        assert_eq!(
            files.load("ebs-premier-storage").await?.as_deref(),
            Some(r#"{"theme":"light"}"#)
        );
        assert!(dir.path().join("state/ebs-premier-storage.json").exists());
        assert!(!dir.path().join("state/ebs-premier-storage.json.tmp").exists());
        Ok(())
    }

    #[tokio::test]
    async fn test_file_rejects_path_like_keys() {
        let files = FilePersistence::new("/tmp/unused");
        let err = files.save("../escape", "{}").await.unwrap_err();
        assert!(matches!(err, StoreError::InvalidKey(_)));
    }

    #[tokio::test]
    async fn test_memory_clones_share_entries() -> StoreResult<()> {
        let memory = MemoryPersistence::new();
        let clone = memory.clone();
        clone.save("k", "v").await?;
        assert_eq!(memory.load("k").await?.as_deref(), Some("v"));
        Ok(())
    }
}
