use futures::future::join_all;
use movieverse_api::BackendClient;
use movieverse_models::{Category, Movie, Notice};
use rand::seq::SliceRandom;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(15);

/// Everything the home view needs, assembled in one pass.
#[derive(Debug, Clone)]
pub struct HomePage {
    /// Category listings in the configured order; a failed category is
    /// present with an empty list.
    pub categories: Vec<(Category, Vec<Movie>)>,
    /// One trending movie chosen uniformly at random.
    pub featured: Option<Movie>,
    pub notices: Vec<Notice>,
    /// Review count per external_id. Empty when trending had no movies.
    pub review_counts: HashMap<String, usize>,
    /// Human-readable summary of every non-404 fetch failure, or None
    /// when everything loaded.
    pub error_summary: Option<String>,
}

/// Fans out all category fetches concurrently and reassembles the
/// results in input order, isolating failures per category.
pub struct CategoryAggregator {
    backend: Arc<BackendClient>,
    fetch_timeout: Duration,
}

impl CategoryAggregator {
    pub fn new(backend: Arc<BackendClient>) -> Self {
        Self {
            backend,
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
        }
    }

    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    pub async fn load_home(&self, categories: &[Category]) -> HomePage {
        let mut errors: Vec<String> = Vec::new();

        let notices = match tokio::time::timeout(self.fetch_timeout, self.backend.get_notices())
            .await
        {
            Ok(Ok(notices)) => notices,
            Ok(Err(err)) => {
                warn!(%err, "failed to fetch notices");
                errors.push(format!("Error loading notices: {}.", err));
                Vec::new()
            }
            Err(_) => {
                warn!("notices fetch timed out");
                errors.push("Error loading notices: request timed out.".to_string());
                Vec::new()
            }
        };

        let fetches = categories.iter().map(|category| self.load_category(category));
        let results = join_all(fetches).await;

        let mut loaded: Vec<(Category, Vec<Movie>)> = Vec::with_capacity(categories.len());
        for (category, (movies, error)) in categories.iter().zip(results) {
            if let Some(error) = error {
                errors.push(error);
            }
            loaded.push((category.clone(), movies));
        }

        let featured = loaded
            .iter()
            .find(|(category, _)| category.id == "trending")
            .and_then(|(_, movies)| movies.choose(&mut rand::thread_rng()).cloned());

        // Counts are only worth fetching once a featured pick exists,
        // i.e. when trending returned movies.
        let review_counts = if featured.is_some() {
            let all: Vec<&Movie> = loaded.iter().flat_map(|(_, movies)| movies.iter()).collect();
            self.load_review_counts(&all).await
        } else {
            HashMap::new()
        };

        let error_summary = if errors.is_empty() {
            None
        } else {
            Some(errors.join(" "))
        };

        HomePage {
            categories: loaded,
            featured,
            notices,
            review_counts,
            error_summary,
        }
    }

    /// One category fetch: 404 and empty payloads degrade to an empty
    /// list silently; every other failure degrades to an empty list and
    /// contributes to the error summary.
    async fn load_category(&self, category: &Category) -> (Vec<Movie>, Option<String>) {
        let result =
            tokio::time::timeout(self.fetch_timeout, self.backend.get_category(&category.id)).await;
        match result {
            Ok(Ok(movies)) => {
                let movies: Vec<Movie> =
                    movies.into_iter().filter(|m| m.has_valid_key()).collect();
                debug!(category = %category.id, count = movies.len(), "category loaded");
                (movies, None)
            }
            Ok(Err(err)) if err.is_not_found() => {
                warn!(category = %category.id, "category not found, treating as empty");
                (Vec::new(), None)
            }
            Ok(Err(err)) => {
                warn!(category = %category.id, %err, "category fetch failed");
                (
                    Vec::new(),
                    Some(format!("Error loading {}: {}.", category.name, err)),
                )
            }
            Err(_) => {
                warn!(category = %category.id, "category fetch timed out");
                (
                    Vec::new(),
                    Some(format!(
                        "Error loading {}: request timed out.",
                        category.name
                    )),
                )
            }
        }
    }

    /// Per-movie review counts, fanned out concurrently; a failed fetch
    /// counts as zero.
    async fn load_review_counts(&self, movies: &[&Movie]) -> HashMap<String, usize> {
        let fetches = movies.iter().map(|movie| {
            let backend = Arc::clone(&self.backend);
            let timeout = self.fetch_timeout;
            async move {
                let count = match tokio::time::timeout(
                    timeout,
                    backend.get_reviews(&movie.source, &movie.external_id),
                )
                .await
                {
                    Ok(Ok(reviews)) => reviews.len(),
                    Ok(Err(err)) => {
                        debug!(key = %movie.key(), %err, "review count fetch failed");
                        0
                    }
                    Err(_) => {
                        debug!(key = %movie.key(), "review count fetch timed out");
                        0
                    }
                };
                (movie.external_id.clone(), count)
            }
        });
        join_all(fetches).await.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn movie_json(external_id: &str) -> serde_json::Value {
        serde_json::json!({
            "source": "tmdb",
            "externalId": external_id,
            "title": format!("Movie {}", external_id)
        })
    }

    async fn mount_category(server: &MockServer, id: &str, body: serde_json::Value) {
        Mock::given(method("GET"))
            .and(path(format!("/api/movies/categories/{}", id)))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(server)
            .await;
    }

    async fn mount_notices(server: &MockServer) {
        Mock::given(method("GET"))
            .and(path("/api/movies/notices"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .mount(server)
            .await;
    }

    fn aggregator(server: &MockServer) -> CategoryAggregator {
        CategoryAggregator::new(Arc::new(BackendClient::new(server.uri())))
            .with_fetch_timeout(Duration::from_secs(5))
    }

    #[tokio::test]
    async fn test_one_failing_category_is_isolated() {
        let server = MockServer::start().await;
        mount_notices(&server).await;

        let categories = Category::defaults();
        for category in &categories {
            if category.id == "tamil" {
                Mock::given(method("GET"))
                    .and(path("/api/movies/categories/tamil"))
                    .respond_with(ResponseTemplate::new(500).set_body_json(
                        serde_json::json!({"msg": "database unavailable"}),
                    ))
                    .mount(&server)
                    .await;
            } else {
                mount_category(
                    &server,
                    &category.id,
                    serde_json::json!([movie_json(&format!("id-{}", category.id))]),
                )
                .await;
            }
        }
        // Review counts for every listed movie.
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .mount(&server)
            .await;

        let home = aggregator(&server).load_home(&categories).await;

        assert_eq!(home.categories.len(), 12);
        let ids: Vec<&str> = home.categories.iter().map(|(c, _)| c.id.as_str()).collect();
        let expected: Vec<&str> = categories.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, expected);

        for (category, movies) in &home.categories {
            if category.id == "tamil" {
                assert!(movies.is_empty());
            } else {
                assert_eq!(movies.len(), 1);
            }
        }

        let summary = home.error_summary.unwrap();
        assert!(summary.contains("Tamil"));
        for category in categories.iter().filter(|c| c.id != "tamil") {
            assert!(
                !summary.contains(&category.name),
                "summary should not mention {}",
                category.name
            );
        }
    }

    #[tokio::test]
    async fn test_404_degrades_without_error_summary() {
        let server = MockServer::start().await;
        mount_notices(&server).await;

        let categories = vec![Category::new("classics", "Classics")];
        Mock::given(method("GET"))
            .and(path("/api/movies/categories/classics"))
            .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({"msg": "Not Found"})))
            .mount(&server)
            .await;

        let home = aggregator(&server).load_home(&categories).await;
        assert!(home.categories[0].1.is_empty());
        assert!(home.error_summary.is_none());
        assert!(home.featured.is_none());
        assert!(home.review_counts.is_empty());
    }

    #[tokio::test]
    async fn test_featured_comes_from_trending_and_counts_follow() {
        let server = MockServer::start().await;
        mount_notices(&server).await;

        let categories = vec![
            Category::new("trending", "Trending"),
            Category::new("action", "Action"),
        ];
        mount_category(
            &server,
            "trending",
            serde_json::json!([movie_json("t1"), movie_json("t2")]),
        )
        .await;
        mount_category(&server, "action", serde_json::json!([movie_json("a1")])).await;

        Mock::given(method("GET"))
            .and(path("/api/reviews/tmdb/t1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"_id": "r1", "name": "A", "text": "x", "createdAt": "2026-01-01T00:00:00Z"},
                {"_id": "r2", "name": "B", "text": "y", "createdAt": "2026-01-02T00:00:00Z"}
            ])))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .mount(&server)
            .await;

        let home = aggregator(&server).load_home(&categories).await;

        let featured = home.featured.unwrap();
        assert!(featured.external_id == "t1" || featured.external_id == "t2");
        assert_eq!(home.review_counts.get("t1"), Some(&2));
        assert_eq!(home.review_counts.get("a1"), Some(&0));
        assert!(home.error_summary.is_none());
    }

    #[tokio::test]
    async fn test_movies_without_valid_keys_are_filtered() {
        let server = MockServer::start().await;
        mount_notices(&server).await;

        let categories = vec![Category::new("action", "Action")];
        mount_category(
            &server,
            "action",
            serde_json::json!([
                movie_json("a1"),
                {"title": "No identity"},
                {"source": "tmdb", "externalId": "undefined"}
            ]),
        )
        .await;

        let home = aggregator(&server).load_home(&categories).await;
        assert_eq!(home.categories[0].1.len(), 1);
        assert_eq!(home.categories[0].1[0].external_id, "a1");
    }
}
