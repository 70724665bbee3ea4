pub mod config;
pub mod paths;

pub use config::{BackendConfig, Config, TmdbConfig, YouTubeConfig};
pub use paths::PathManager;
