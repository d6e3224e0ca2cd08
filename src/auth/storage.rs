use anyhow::{Context, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::{debug, warn};

/// Session-scoped key-value persistence.
/// Values are opaque strings; callers store JSON.
#[async_trait]
pub trait SessionStorage: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>>;

    async fn set(&self, key: &str, value: &str) -> Result<()>;

    async fn remove(&self, key: &str) -> Result<()>;
}

/// Storage that lives as long as the process
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStorage for MemoryStorage {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries
            .lock()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.entries.lock().await.remove(key);
        Ok(())
    }
}

/// Storage kept in a single JSON object on disk, so a session survives
/// between separate runs of the CLI until it is cleared
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<HashMap<String, String>> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) if contents.trim().is_empty() => Ok(HashMap::new()),
            Ok(contents) => serde_json::from_str(&contents)
                .with_context(|| format!("Session file {} is not valid JSON", self.path.display())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(HashMap::new()),
            Err(e) => Err(e)
                .with_context(|| format!("Failed to read session file {}", self.path.display())),
        }
    }

    /// Entries to rewrite; a file that cannot be parsed is replaced
    async fn load_for_update(&self) -> Result<HashMap<String, String>> {
        match self.load().await {
            Err(e) if is_corrupt(&e) => {
                warn!("Resetting session file: {:#}", e);
                Ok(HashMap::new())
            }
            other => other,
        }
    }

    async fn save(&self, entries: &HashMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let json = serde_json::to_string_pretty(entries)?;
        tokio::fs::write(&self.path, json)
            .await
            .with_context(|| format!("Failed to write session file {}", self.path.display()))?;
        debug!("Saved {} session entries to {}", entries.len(), self.path.display());
        Ok(())
    }
}

fn is_corrupt(error: &anyhow::Error) -> bool {
    error.downcast_ref::<serde_json::Error>().is_some()
}

#[async_trait]
impl SessionStorage for FileStorage {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let _guard = self.lock.lock().await;
        Ok(self.load().await?.remove(key))
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let _guard = self.lock.lock().await;
        let mut entries = self.load_for_update().await?;
        entries.insert(key.to_string(), value.to_string());
        self.save(&entries).await
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let _guard = self.lock.lock().await;
        match self.load().await {
            Ok(mut entries) => {
                if entries.remove(key).is_some() {
                    self.save(&entries).await?;
                }
            }
            Err(e) if is_corrupt(&e) => {
                warn!("Resetting session file: {:#}", e);
                self.save(&HashMap::new()).await?;
            }
            Err(e) => return Err(e),
        }
        Ok(())
    }
}
