use color_eyre::Result;
use movieverse_api::{BackendClient, RateLimiter, TmdbClient, YouTubeClient};
use movieverse_config::{Config, PathManager};
use movieverse_core::TrailerResolver;
use movieverse_store::{ClickTracker, LocalStore, Watchlist};
use std::sync::Arc;
use std::time::Duration;

/// Shared wiring for every command: config, local store, and the
/// backend client carrying the stored session token.
pub struct AppContext {
    pub config: Config,
    pub paths: PathManager,
    pub store: LocalStore,
    pub backend: Arc<BackendClient>,
}

impl AppContext {
    pub fn init() -> Result<Self> {
        let paths = PathManager::from_env().map_err(|e| color_eyre::eyre::eyre!("{}", e))?;
        paths
            .ensure_dirs()
            .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

        let config = Config::load(&paths.config_file())
            .map_err(|e| color_eyre::eyre::eyre!("failed to load configuration: {}", e))?;
        let store = LocalStore::open(paths.store_dir())
            .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

        let backend = Arc::new(
            BackendClient::new(&config.backend.base_url)
                .with_timeout(Duration::from_secs(config.backend.timeout_secs))
                .with_token(store.token()),
        );

        Ok(Self {
            config,
            paths,
            store,
            backend,
        })
    }

    pub fn watchlist(&self) -> Watchlist {
        Watchlist::new(self.store.clone())
    }

    pub fn tracker(&self) -> ClickTracker {
        ClickTracker::new(self.store.clone())
    }

    /// Build the trailer resolver from whichever metadata sources are
    /// configured; unconfigured rungs of the chain are simply skipped.
    pub fn trailer_resolver(&self) -> TrailerResolver {
        let mut resolver = TrailerResolver::new().with_fallback(self.config.fallback_trailers.clone());

        if let Some(tmdb) = &self.config.tmdb {
            let client = TmdbClient::new(&tmdb.api_key)
                .with_timeout(Duration::from_secs(tmdb.timeout_secs))
                .with_limiter(Arc::new(RateLimiter::new(Duration::from_millis(
                    tmdb.min_interval_ms,
                ))));
            resolver = resolver.with_catalog(Arc::new(client));
        }

        if let Some(youtube) = &self.config.youtube {
            let client = YouTubeClient::new(&youtube.api_key)
                .with_timeout(Duration::from_secs(youtube.timeout_secs))
                .with_max_results(youtube.max_results);
            resolver = resolver.with_search(Arc::new(client));
        }

        resolver
    }
}
