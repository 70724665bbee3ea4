use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Top-level configuration, stored as TOML under the config dir.
///
/// The metadata sections are optional: without a TMDB key the trailer
/// resolver skips its primary lookup, without a YouTube key it skips the
/// search fallback.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub tmdb: Option<TmdbConfig>,
    #[serde(default)]
    pub youtube: Option<YouTubeConfig>,
    /// Static external_id -> trailer URL table, the last rung of the
    /// resolver's fallback chain.
    #[serde(default)]
    pub fallback_trailers: HashMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    #[serde(default = "default_backend_url")]
    pub base_url: String,
    #[serde(default = "default_backend_timeout")]
    pub timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_backend_url(),
            timeout_secs: default_backend_timeout(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TmdbConfig {
    pub api_key: String,
    #[serde(default = "default_metadata_timeout")]
    pub timeout_secs: u64,
    /// Minimum gap between requests against the TMDB quota.
    #[serde(default = "default_min_interval_ms")]
    pub min_interval_ms: u64,
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            timeout_secs: default_metadata_timeout(),
            min_interval_ms: default_min_interval_ms(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YouTubeConfig {
    pub api_key: String,
    #[serde(default = "default_metadata_timeout")]
    pub timeout_secs: u64,
    #[serde(default = "default_max_results")]
    pub max_results: u32,
}

impl Default for YouTubeConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            timeout_secs: default_metadata_timeout(),
            max_results: default_max_results(),
        }
    }
}

fn default_backend_url() -> String {
    "https://movieverse-backend-ewhk.onrender.com".to_string()
}

fn default_backend_timeout() -> u64 {
    10
}

fn default_metadata_timeout() -> u64 {
    15
}

fn default_min_interval_ms() -> u64 {
    250
}

fn default_max_results() -> u32 {
    5
}

impl Config {
    /// Load the config file, falling back to defaults when it does not
    /// exist yet.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("failed to parse config file {}", path.display()))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("failed to write config file {}", path.display()))?;
        Ok(())
    }
}
