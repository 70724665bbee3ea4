use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// The fixed key space of the local store.
pub mod keys {
    pub const TOKEN: &str = "token";
    pub const WATCHLIST: &str = "watchlist";
    pub const ANALYTICS: &str = "analytics";
    pub const TEMP_USER_ID: &str = "tempUserId";
}

/// Locally persisted client state: one JSON file per key under the store
/// directory. All operations are synchronous and immediately durable;
/// writes go through a temp file and rename.
#[derive(Debug, Clone)]
pub struct LocalStore {
    dir: PathBuf,
}

impl LocalStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let store = Self::new(dir);
        std::fs::create_dir_all(&store.dir)
            .with_context(|| format!("failed to create store dir {}", store.dir.display()))?;
        Ok(store)
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }

    /// Read a key. A missing key is `Ok(None)`; an undecodable value is
    /// logged and treated as missing rather than failing the caller.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let path = self.key_path(key);
        if !path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read store key '{}'", key))?;
        match serde_json::from_str(&content) {
            Ok(value) => Ok(Some(value)),
            Err(err) => {
                warn!(key, %err, "stored value is undecodable, treating as missing");
                Ok(None)
            }
        }
    }

    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("failed to create store dir {}", self.dir.display()))?;
        let path = self.key_path(key);
        let content = serde_json::to_string(value)?;
        let temp_path = path.with_extension("json.tmp");
        std::fs::write(&temp_path, content)
            .with_context(|| format!("failed to write store key '{}'", key))?;
        std::fs::rename(&temp_path, &path)
            .with_context(|| format!("failed to persist store key '{}'", key))?;
        debug!(key, "persisted store key");
        Ok(())
    }

    pub fn remove(&self, key: &str) -> Result<()> {
        let path = self.key_path(key);
        if path.exists() {
            std::fs::remove_file(&path)
                .with_context(|| format!("failed to remove store key '{}'", key))?;
        }
        Ok(())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.key_path(key).exists()
    }

    /// Raw bytes of a key's backing file, if present. Lets callers check
    /// that an operation left storage untouched.
    pub fn raw(&self, key: &str) -> Option<Vec<u8>> {
        std::fs::read(self.key_path(key)).ok()
    }

    // Typed conveniences for the fixed keys.

    pub fn token(&self) -> Option<String> {
        self.get(keys::TOKEN).ok().flatten()
    }

    pub fn set_token(&self, token: &str) -> Result<()> {
        self.set(keys::TOKEN, &token)
    }

    pub fn clear_token(&self) -> Result<()> {
        self.remove(keys::TOKEN)
    }

    /// The anonymous user id, generated and persisted on first use.
    pub fn temp_user_id(&self) -> Result<String> {
        if let Some(id) = self.get::<String>(keys::TEMP_USER_ID)? {
            return Ok(id);
        }
        let id = format!("anon-{:016x}", rand::random::<u64>());
        self.set(keys::TEMP_USER_ID, &id)?;
        Ok(id)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}
