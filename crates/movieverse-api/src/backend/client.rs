use movieverse_models::{Movie, NewReply, NewReview, Notice, ReactionCounts, ReactionKind, Reply, Review};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

use super::payload::{self, AuthResponse, CategoryPayload, ErrorBody, TallyPayload};
use crate::error::ApiError;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Client for the MovieVerse REST backend.
///
/// Every request carries JSON content headers and, when a session token
/// is set, a bearer Authorization header. Failures are normalized into
/// [`ApiError`]: transport/timeout problems become `Network`, non-2xx
/// responses become `Http` with the server's `msg` when it sends one.
#[derive(Debug, Clone)]
pub struct BackendClient {
    client: Client,
    base_url: String,
    token: Option<String>,
    timeout: Duration,
}

impl BackendClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "backend request");
        let mut request = self
            .client
            .request(method, url)
            .timeout(self.timeout)
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json");
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        request
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let response = request.send().await.map_err(ApiError::from)?;
        let status = response.status();
        let body = response.text().await.map_err(ApiError::from)?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(|b| b.msg)
                .unwrap_or_else(|| {
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

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send(self.request(Method::GET, path)).await
    }

    async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        self.send(self.request(Method::POST, path).json(body)).await
    }

    /// Fetch one category listing. Any of the backend's envelope shapes
    /// normalize to a movie list; `success: false` or a missing payload
    /// is "no data". A 404 surfaces as `Http` so callers can degrade it.
    pub async fn get_category(&self, category_id: &str) -> Result<Vec<Movie>, ApiError> {
        let path = format!(
            "/api/movies/categories/{}",
            urlencoding::encode(category_id)
        );
        let payload: CategoryPayload = self.get(&path).await?;
        Ok(payload.into_movies())
    }

    /// Fetch details for one movie. A body without `externalId` is
    /// rejected as invalid.
    pub async fn get_movie_details(
        &self,
        source: &str,
        external_id: &str,
    ) -> Result<Movie, ApiError> {
        let path = format!(
            "/api/movies/details/{}/{}",
            urlencoding::encode(source),
            urlencoding::encode(external_id)
        );
        let movie: Movie = self.get(&path).await?;
        if movie.external_id.is_empty() {
            return Err(ApiError::InvalidResponse(
                "movie details missing externalId".to_string(),
            ));
        }
        Ok(movie)
    }

    pub async fn get_reviews(
        &self,
        source: &str,
        external_id: &str,
    ) -> Result<Vec<Review>, ApiError> {
        let path = format!(
            "/api/reviews/{}/{}",
            urlencoding::encode(source),
            urlencoding::encode(external_id)
        );
        let value: serde_json::Value = self.get(&path).await?;
        Ok(payload::reviews_from(value))
    }

    pub async fn submit_review(
        &self,
        source: &str,
        external_id: &str,
        review: &NewReview,
    ) -> Result<Review, ApiError> {
        let path = format!(
            "/api/reviews/{}/{}",
            urlencoding::encode(source),
            urlencoding::encode(external_id)
        );
        self.post(&path, review).await
    }

    pub async fn submit_reply(
        &self,
        source: &str,
        external_id: &str,
        review_id: &str,
        reply: &NewReply,
    ) -> Result<Reply, ApiError> {
        let path = format!(
            "/api/reviews/{}/{}/reply/{}",
            urlencoding::encode(source),
            urlencoding::encode(external_id),
            urlencoding::encode(review_id)
        );
        self.post(&path, reply).await
    }

    pub async fn submit_reaction(
        &self,
        source: &str,
        external_id: &str,
        reaction: ReactionKind,
    ) -> Result<ReactionCounts, ApiError> {
        let path = format!(
            "/api/movies/reactions/{}/{}",
            urlencoding::encode(source),
            urlencoding::encode(external_id)
        );
        let tally: TallyPayload = self
            .post(&path, &serde_json::json!({ "reaction": reaction }))
            .await?;
        Ok(tally.into_counts())
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<String, ApiError> {
        let response: AuthResponse = self
            .post(
                "/api/auth/login",
                &serde_json::json!({ "email": email, "password": password }),
            )
            .await?;
        Ok(response.token)
    }

    pub async fn register(&self, email: &str, password: &str) -> Result<String, ApiError> {
        let response: AuthResponse = self
            .post(
                "/api/auth/register",
                &serde_json::json!({ "email": email, "password": password }),
            )
            .await?;
        Ok(response.token)
    }

    pub async fn get_notices(&self) -> Result<Vec<Notice>, ApiError> {
        let value: serde_json::Value = self.get("/api/movies/notices").await?;
        Ok(payload::notices_from(value))
    }
}
