//! Client-local durable storage for the portal profile.
//! One JSON object per profile directory, cached in memory and written
//! through on every change. Reads are fail-soft: unreadable state is treated
//! as absent so a damaged profile can never keep the portal from starting.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use parking_lot::RwLock;
use tracing::warn;

/// Key-value contract for persisted client state.
pub trait LocalStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn put(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

/// Volatile store for tests and ephemeral sessions.
#[derive(Default)]
pub struct MemStore {
    map: RwLock<HashMap<String, String>>,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LocalStore for MemStore {
    fn get(&self, key: &str) -> Option<String> {
        self.map.read().get(key).cloned()
    }

    fn put(&self, key: &str, value: &str) -> Result<()> {
        self.map.write().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.map.write().remove(key);
        Ok(())
    }
}

/// File-backed store holding a single `local.json` under the profile dir.
pub struct FileStore {
    path: PathBuf,
    map: RwLock<HashMap<String, String>>,
}

impl FileStore {
    pub fn open(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir)
            .with_context(|| format!("creating profile dir {}", dir.display()))?;
        let path = dir.join("local.json");
        let map = match std::fs::read(&path) {
            Ok(bytes) => match serde_json::from_slice::<HashMap<String, String>>(&bytes) {
                Ok(m) => m,
                Err(e) => {
                    warn!(target: "storage", "unreadable profile state at {}: {}; starting empty", path.display(), e);
                    HashMap::new()
                }
            },
            Err(_) => HashMap::new(),
        };
        Ok(Self { path, map: RwLock::new(map) })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    // Write the whole object to a temp file, then rename over the live one.
    fn persist(&self) -> Result<()> {
        let snapshot = self.map.read().clone();
        let bytes = serde_json::to_vec_pretty(&snapshot)?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, bytes)
            .with_context(|| format!("writing {}", tmp.display()))?;
        std::fs::rename(&tmp, &self.path)
            .with_context(|| format!("replacing {}", self.path.display()))?;
        Ok(())
    }
}

impl LocalStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.map.read().get(key).cloned()
    }

    fn put(&self, key: &str, value: &str) -> Result<()> {
        self.map.write().insert(key.to_string(), value.to_string());
        self.persist()
    }

    fn remove(&self, key: &str) -> Result<()> {
        let existed = self.map.write().remove(key).is_some();
        if existed {
            self.persist()?;
        }
        Ok(())
    }
}

/// Profile directory for persisted state: `SCHOLA_PROFILE_DIR` when set,
/// otherwise `./profile`.
pub fn default_profile_dir() -> PathBuf {
    std::env::var("SCHOLA_PROFILE_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("profile"))
}
