use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use crate::error::ApiError;
use crate::rate_limiter::RateLimiter;

const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);
const IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p/w780";

/// Client for the TMDB metadata API (the primary trailer source).
///
/// Authentication is an `api_key` query parameter. All calls pass
/// through the shared rate limiter before dispatch.
#[derive(Debug, Clone)]
pub struct TmdbClient {
    client: Client,
    base_url: String,
    api_key: String,
    timeout: Duration,
    limiter: Arc<RateLimiter>,
}

impl TmdbClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.into(),
            timeout: DEFAULT_TIMEOUT,
            limiter: Arc::new(RateLimiter::default_interval()),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Share one limiter across every client hitting the same quota.
    pub fn with_limiter(mut self, limiter: Arc<RateLimiter>) -> Self {
        self.limiter = limiter;
        self
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.limiter.acquire().await;

        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "TMDB request");
        let response = self
            .client
            .get(url)
            .timeout(self.timeout)
            .query(&[("api_key", self.api_key.as_str())])
            .send()
            .await
            .map_err(ApiError::from)?;

        let status = response.status();
        let body = response.text().await.map_err(ApiError::from)?;

        if !status.is_success() {
            let message = serde_json::from_str::<TmdbErrorBody>(&body)
                .map(|b| b.status_message)
                .unwrap_or_else(|_| {
                    status
                        .canonical_reason()
                        .unwrap_or("request failed")
                        .to_string()
                });
            return Err(ApiError::Http {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str(&body)
            .map_err(|err| ApiError::InvalidResponse(format!("failed to decode body: {}", err)))
    }

    /// Videos associated with a movie id.
    pub async fn movie_videos(&self, external_id: &str) -> Result<Vec<TmdbVideo>, ApiError> {
        let path = format!("/movie/{}/videos", urlencoding::encode(external_id));
        let response: VideosResponse = self.get_json(&path).await?;
        Ok(response.results)
    }

    /// Backdrop images for a movie id, composed into full image URLs.
    pub async fn movie_images(&self, external_id: &str) -> Result<Vec<String>, ApiError> {
        let path = format!("/movie/{}/images", urlencoding::encode(external_id));
        let response: ImagesResponse = self.get_json(&path).await?;
        Ok(response
            .backdrops
            .into_iter()
            .map(|image| format!("{}{}", IMAGE_BASE_URL, image.file_path))
            .collect())
    }
}

/// One entry of a TMDB videos listing.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct TmdbVideo {
    pub key: String,
    #[serde(default)]
    pub site: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub official: bool,
    #[serde(default)]
    pub name: String,
}

impl TmdbVideo {
    pub fn is_youtube_trailer(&self) -> bool {
        self.kind == "Trailer" && self.site == "YouTube"
    }
}

#[derive(Debug, Deserialize)]
struct VideosResponse {
    #[serde(default)]
    results: Vec<TmdbVideo>,
}

#[derive(Debug, Deserialize)]
struct ImagesResponse {
    #[serde(default)]
    backdrops: Vec<ImageEntry>,
}

#[derive(Debug, Deserialize)]
struct ImageEntry {
    file_path: String,
}

#[derive(Debug, Deserialize)]
struct TmdbErrorBody {
    status_message: String,
}
