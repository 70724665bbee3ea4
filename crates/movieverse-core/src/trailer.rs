use async_trait::async_trait;
use movieverse_api::{ApiError, SearchHit, TmdbClient, TmdbVideo, YouTubeClient};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// Channels trusted to publish studio trailers; used to rank search
/// hits in the fallback path.
const OFFICIAL_CHANNELS: &[&str] = &[
    "Warner Bros. Pictures",
    "Sony Pictures Entertainment",
    "Universal Pictures",
    "Paramount Pictures",
    "20th Century Studios",
    "Walt Disney Studios",
    "Marvel Entertainment",
    "Lionsgate Movies",
    "Netflix",
    "A24",
    "Rotten Tomatoes Trailers",
    "Movieclips Trailers",
];

/// Primary metadata lookup seam (TMDB in production).
#[async_trait]
pub trait VideoCatalog: Send + Sync {
    async fn movie_videos(&self, external_id: &str) -> Result<Vec<TmdbVideo>, ApiError>;
    async fn movie_images(&self, external_id: &str) -> Result<Vec<String>, ApiError>;
}

/// Search-based lookup seam (YouTube in production).
#[async_trait]
pub trait VideoSearch: Send + Sync {
    async fn search(&self, query: &str) -> Result<Vec<SearchHit>, ApiError>;
}

#[async_trait]
impl VideoCatalog for TmdbClient {
    async fn movie_videos(&self, external_id: &str) -> Result<Vec<TmdbVideo>, ApiError> {
        TmdbClient::movie_videos(self, external_id).await
    }

    async fn movie_images(&self, external_id: &str) -> Result<Vec<String>, ApiError> {
        TmdbClient::movie_images(self, external_id).await
    }
}

#[async_trait]
impl VideoSearch for YouTubeClient {
    async fn search(&self, query: &str) -> Result<Vec<SearchHit>, ApiError> {
        YouTubeClient::search(self, query).await
    }
}

pub fn watch_url(key: &str) -> String {
    format!("https://www.youtube.com/watch?v={}", key)
}

/// Rewrite a watch URL into its embeddable form for player iframes.
pub fn embed_url(url: &str) -> String {
    url.replacen("watch?v=", "embed/", 1)
}

/// Best-effort trailer lookup: primary catalog, then search, then the
/// static fallback table. Never returns an error; every failing step is
/// absorbed and logged.
pub struct TrailerResolver {
    catalog: Option<Arc<dyn VideoCatalog>>,
    search: Option<Arc<dyn VideoSearch>>,
    fallback: HashMap<String, String>,
}

impl TrailerResolver {
    pub fn new() -> Self {
        Self {
            catalog: None,
            search: None,
            fallback: HashMap::new(),
        }
    }

    pub fn with_catalog(mut self, catalog: Arc<dyn VideoCatalog>) -> Self {
        self.catalog = Some(catalog);
        self
    }

    pub fn with_search(mut self, search: Arc<dyn VideoSearch>) -> Self {
        self.search = Some(search);
        self
    }

    pub fn with_fallback(mut self, fallback: HashMap<String, String>) -> Self {
        self.fallback = fallback;
        self
    }

    /// Resolve a playable trailer URL, short-circuiting on the first
    /// step that yields one. Title and year are only needed for the
    /// search fallback.
    pub async fn resolve(
        &self,
        external_id: &str,
        title: Option<&str>,
        year: Option<u32>,
    ) -> Option<String> {
        if let Some(url) = self.from_catalog(external_id).await {
            return Some(url);
        }
        if let Some(url) = self.from_search(title, year).await {
            return Some(url);
        }
        let url = self.fallback.get(external_id).cloned();
        if url.is_none() {
            debug!(external_id, "no trailer found through any source");
        }
        url
    }

    async fn from_catalog(&self, external_id: &str) -> Option<String> {
        let catalog = self.catalog.as_ref()?;
        let videos = match catalog.movie_videos(external_id).await {
            Ok(videos) => videos,
            Err(err) if err.is_unauthorized() => {
                warn!(external_id, %err, "metadata API rejected credentials during trailer lookup");
                return None;
            }
            Err(err) => {
                debug!(external_id, %err, "primary trailer lookup failed");
                return None;
            }
        };
        pick_trailer(&videos).map(|video| watch_url(&video.key))
    }

    async fn from_search(&self, title: Option<&str>, year: Option<u32>) -> Option<String> {
        let search = self.search.as_ref()?;
        let (title, year) = (title?, year?);
        let query = format!("{} {} official trailer", title, year);
        let hits = match search.search(&query).await {
            Ok(hits) => hits,
            Err(err) => {
                debug!(query, %err, "trailer search fallback failed");
                return None;
            }
        };
        let chosen = hits.iter().find(|hit| is_official_hit(hit)).or_else(|| hits.first())?;
        Some(watch_url(&chosen.video_id))
    }

    /// Screenshot lookup with the same absorb-all policy: failures
    /// degrade to an empty list.
    pub async fn screenshots(&self, external_id: &str) -> Vec<String> {
        let Some(catalog) = self.catalog.as_ref() else {
            return Vec::new();
        };
        match catalog.movie_images(external_id).await {
            Ok(images) => images,
            Err(err) => {
                debug!(external_id, %err, "screenshot lookup failed");
                Vec::new()
            }
        }
    }
}

impl Default for TrailerResolver {
    fn default() -> Self {
        Self::new()
    }
}

/// Prefer the official YouTube trailer, then any YouTube trailer.
fn pick_trailer(videos: &[TmdbVideo]) -> Option<&TmdbVideo> {
    videos
        .iter()
        .find(|v| v.is_youtube_trailer() && v.official)
        .or_else(|| videos.iter().find(|v| v.is_youtube_trailer()))
}

fn is_official_hit(hit: &SearchHit) -> bool {
    OFFICIAL_CHANNELS
        .iter()
        .any(|channel| channel.eq_ignore_ascii_case(&hit.channel_title))
        && hit.title.to_lowercase().contains("official trailer")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct StubCatalog {
        videos: Result<Vec<TmdbVideo>, u16>,
        calls: AtomicUsize,
    }

    impl StubCatalog {
        fn ok(videos: Vec<TmdbVideo>) -> Self {
            Self {
                videos: Ok(videos),
                calls: AtomicUsize::new(0),
            }
        }

        fn failing(status: u16) -> Self {
            Self {
                videos: Err(status),
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl VideoCatalog for StubCatalog {
        async fn movie_videos(&self, _external_id: &str) -> Result<Vec<TmdbVideo>, ApiError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.videos {
                Ok(videos) => Ok(videos.clone()),
                Err(status) => Err(ApiError::Http {
                    status: *status,
                    message: "stub failure".to_string(),
                }),
            }
        }

        async fn movie_images(&self, _external_id: &str) -> Result<Vec<String>, ApiError> {
            Err(ApiError::Network("stub".to_string()))
        }
    }

    struct StubSearch {
        hits: Vec<SearchHit>,
        calls: AtomicUsize,
    }

    impl StubSearch {
        fn new(hits: Vec<SearchHit>) -> Self {
            Self {
                hits,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl VideoSearch for StubSearch {
        async fn search(&self, _query: &str) -> Result<Vec<SearchHit>, ApiError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.hits.clone())
        }
    }

    fn video(key: &str, kind: &str, site: &str, official: bool) -> TmdbVideo {
        TmdbVideo {
            key: key.to_string(),
            site: site.to_string(),
            kind: kind.to_string(),
            official,
            name: String::new(),
        }
    }

    fn hit(video_id: &str, title: &str, channel: &str) -> SearchHit {
        SearchHit {
            video_id: video_id.to_string(),
            title: title.to_string(),
            channel_title: channel.to_string(),
        }
    }

    #[tokio::test]
    async fn test_official_trailer_preferred() {
        let catalog = Arc::new(StubCatalog::ok(vec![
            video("fan1", "Trailer", "YouTube", false),
            video("official", "Trailer", "YouTube", true),
            video("fan2", "Trailer", "YouTube", false),
        ]));
        let resolver = TrailerResolver::new().with_catalog(catalog);
        assert_eq!(
            resolver.resolve("603", None, None).await.as_deref(),
            Some("https://www.youtube.com/watch?v=official")
        );
    }

    #[tokio::test]
    async fn test_any_youtube_trailer_when_no_official() {
        let catalog = Arc::new(StubCatalog::ok(vec![
            video("clip", "Clip", "YouTube", true),
            video("fan", "Trailer", "YouTube", false),
        ]));
        let resolver = TrailerResolver::new().with_catalog(catalog);
        assert_eq!(
            resolver.resolve("603", None, None).await.as_deref(),
            Some("https://www.youtube.com/watch?v=fan")
        );
    }

    #[tokio::test]
    async fn test_search_fallback_issues_one_search() {
        let catalog = Arc::new(StubCatalog::ok(vec![video("v", "Featurette", "Vimeo", true)]));
        let search = Arc::new(StubSearch::new(vec![
            hit("first", "Some reaction video", "Random Channel"),
            hit("studio", "The Matrix Official Trailer", "Warner Bros. Pictures"),
        ]));
        let resolver = TrailerResolver::new()
            .with_catalog(catalog)
            .with_search(search.clone());

        let url = resolver.resolve("603", Some("The Matrix"), Some(1999)).await;
        assert_eq!(url.as_deref(), Some("https://www.youtube.com/watch?v=studio"));
        assert_eq!(search.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_search_fallback_uses_first_hit_without_official_match() {
        let search = Arc::new(StubSearch::new(vec![
            hit("first", "Some reaction video", "Random Channel"),
            hit("second", "Another video", "Other Channel"),
        ]));
        let resolver = TrailerResolver::new().with_search(search);
        let url = resolver.resolve("603", Some("The Matrix"), Some(1999)).await;
        assert_eq!(url.as_deref(), Some("https://www.youtube.com/watch?v=first"));
    }

    #[tokio::test]
    async fn test_search_skipped_without_title_and_year() {
        let search = Arc::new(StubSearch::new(vec![hit("x", "y", "z")]));
        let resolver = TrailerResolver::new().with_search(search.clone());
        assert_eq!(resolver.resolve("603", Some("The Matrix"), None).await, None);
        assert_eq!(search.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_static_fallback_table() {
        let catalog = Arc::new(StubCatalog::failing(500));
        let mut fallback = HashMap::new();
        fallback.insert(
            "603".to_string(),
            "https://www.youtube.com/watch?v=static".to_string(),
        );
        let resolver = TrailerResolver::new()
            .with_catalog(catalog)
            .with_fallback(fallback);

        assert_eq!(
            resolver.resolve("603", None, None).await.as_deref(),
            Some("https://www.youtube.com/watch?v=static")
        );
        assert_eq!(resolver.resolve("999", None, None).await, None);
    }

    #[tokio::test]
    async fn test_auth_failure_is_absorbed() {
        let catalog = Arc::new(StubCatalog::failing(401));
        let resolver = TrailerResolver::new().with_catalog(catalog.clone());
        assert_eq!(resolver.resolve("603", None, None).await, None);
        assert_eq!(catalog.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_screenshots_degrade_to_empty() {
        let catalog = Arc::new(StubCatalog::failing(500));
        let resolver = TrailerResolver::new().with_catalog(catalog);
        assert!(resolver.screenshots("603").await.is_empty());
    }

    #[test]
    fn test_embed_url_rewrite() {
        assert_eq!(
            embed_url("https://www.youtube.com/watch?v=abc"),
            "https://www.youtube.com/embed/abc"
        );
    }
}
