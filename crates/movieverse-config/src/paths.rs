use anyhow::Result;
use std::path::{Path, PathBuf};

/// Resolves the on-disk layout: config file, local store, logs.
pub struct PathManager {
    config_dir: PathBuf,
    store_dir: PathBuf,
    log_dir: PathBuf,
}

impl PathManager {
    pub fn new() -> Result<Self> {
        let base_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?
            .join("movieverse");
        Ok(Self::with_base(&base_dir))
    }

    /// Root all paths under an explicit base directory. Used by tests and
    /// the `MOVIEVERSE_BASE_PATH` override.
    pub fn with_base(base_dir: &Path) -> Self {
        Self {
            config_dir: base_dir.to_path_buf(),
            store_dir: base_dir.join("store"),
            log_dir: base_dir.join("logs"),
        }
    }

    /// Honors `MOVIEVERSE_BASE_PATH` when set, otherwise the platform
    /// config dir.
    pub fn from_env() -> Result<Self> {
        match std::env::var("MOVIEVERSE_BASE_PATH") {
            Ok(base) => Ok(Self::with_base(Path::new(&base))),
            Err(_) => Self::new(),
        }
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join("config.toml")
    }

    pub fn store_dir(&self) -> &Path {
        &self.store_dir
    }

    pub fn log_file(&self) -> PathBuf {
        self.log_dir.join("movieverse.log")
    }

    pub fn ensure_dirs(&self) -> Result<()> {
        std::fs::create_dir_all(&self.config_dir)?;
        std::fs::create_dir_all(&self.store_dir)?;
        Ok(())
    }
}
