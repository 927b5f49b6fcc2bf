use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::debug;

/// Store key for the authenticated member's profile snapshot. One copy
/// process-wide.
pub const PROFILE_KEY: &str = "profile";

/// A cached snapshot with its write timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedData<T> {
    pub data: T,
    pub cached_at: DateTime<Utc>,
}

impl<T> CachedData<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            cached_at: Utc::now(),
        }
    }

    pub fn age_minutes(&self) -> i64 {
        (Utc::now() - self.cached_at).num_minutes()
    }
}

/// Key-value persistence for client-side snapshots.
///
/// Injected into the components that read or write local state so tests
/// can substitute an in-memory double. Values are opaque JSON blobs; no
/// invariant enforcement happens at this layer.
pub trait CacheStore {
    /// Read the raw value for `key`, or `None` if absent or unreadable.
    fn get(&self, key: &str) -> Option<String>;

    fn set(&self, key: &str, value: &str) -> Result<()>;

    fn remove(&self, key: &str) -> Result<()>;

    /// Drop every stored value. Called on logout.
    fn clear(&self) -> Result<()>;
}

/// Load and decode a cached snapshot. Absent or unparseable entries are
/// reported as `None`; the page proceeds without a paint hint.
pub fn load<T: DeserializeOwned>(store: &dyn CacheStore, key: &str) -> Option<CachedData<T>> {
    let raw = store.get(key)?;
    match serde_json::from_str(&raw) {
        Ok(cached) => Some(cached),
        Err(e) => {
            debug!(key, error = %e, "Discarding unparseable cache entry");
            None
        }
    }
}

/// Encode and persist a snapshot, stamping it with the current time.
pub fn save<T: Serialize>(store: &dyn CacheStore, key: &str, data: &T) -> Result<()> {
    let cached = CachedData::new(data);
    let raw = serde_json::to_string_pretty(&cached)?;
    store.set(key, &raw)
}

/// File-backed store keeping one JSON file per key under a cache
/// directory.
pub struct FileStore {
    cache_dir: PathBuf,
}

impl FileStore {
    pub fn new(cache_dir: PathBuf) -> Result<Self> {
        std::fs::create_dir_all(&cache_dir)
            .with_context(|| format!("Failed to create cache directory {}", cache_dir.display()))?;
        Ok(Self { cache_dir })
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.cache_dir.join(format!("{}.json", key))
    }
}

impl CacheStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        let path = self.entry_path(key);
        if !path.exists() {
            return None;
        }
        match std::fs::read_to_string(&path) {
            Ok(contents) => Some(contents),
            Err(e) => {
                debug!(key, error = %e, "Failed to read cache file");
                None
            }
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        std::fs::write(self.entry_path(key), value)
            .with_context(|| format!("Failed to write cache file for {key}"))
    }

    fn remove(&self, key: &str) -> Result<()> {
        let path = self.entry_path(key);
        if path.exists() {
            std::fs::remove_file(&path)
                .with_context(|| format!("Failed to remove cache file for {key}"))?;
        }
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        for entry in std::fs::read_dir(&self.cache_dir).context("Failed to read cache directory")? {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                std::fs::remove_file(&path)?;
            }
        }
        Ok(())
    }
}

/// In-memory store for tests and embedded hosts without a filesystem.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CacheStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().expect("store lock poisoned").get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries
            .lock()
            .expect("store lock poisoned")
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.entries.lock().expect("store lock poisoned").remove(key);
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        self.entries.lock().expect("store lock poisoned").clear();
        Ok(())
    }
}
