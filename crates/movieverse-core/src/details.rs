use movieverse_api::{ApiError, BackendClient};
use movieverse_models::{Movie, ReactionCounts, Review};
use tracing::warn;

/// Everything the details view needs for one movie.
#[derive(Debug, Clone)]
pub struct MovieDetailsPage {
    pub movie: Movie,
    pub reviews: Vec<Review>,
    pub reactions: ReactionCounts,
}

/// Load details and reviews concurrently. The movie fetch is
/// authoritative and fails the whole load; a failed review fetch
/// degrades to an empty list.
pub async fn load_details(
    backend: &BackendClient,
    source: &str,
    external_id: &str,
) -> Result<MovieDetailsPage, ApiError> {
    let (movie, reviews) = tokio::join!(
        backend.get_movie_details(source, external_id),
        backend.get_reviews(source, external_id),
    );

    let movie = movie?;
    let reviews = match reviews {
        Ok(reviews) => reviews,
        Err(err) => {
            warn!(source, external_id, %err, "review fetch failed, showing none");
            Vec::new()
        }
    };

    let reactions = movie.reaction_counts.clone().unwrap_or_default();
    Ok(MovieDetailsPage {
        movie,
        reviews,
        reactions,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_load_details_joins_movie_and_reviews() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/movies/details/tmdb/603"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "source": "tmdb",
                "externalId": "603",
                "title": "The Matrix",
                "reactionCounts": {"excellent": 4, "good": 1}
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/reviews/tmdb/603"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"_id": "r1", "name": "Alice", "text": "Great", "createdAt": "2026-01-10T12:00:00Z"}
            ])))
            .mount(&server)
            .await;

        let client = BackendClient::new(server.uri());
        let page = load_details(&client, "tmdb", "603").await.unwrap();
        assert_eq!(page.movie.display_title(), "The Matrix");
        assert_eq!(page.reviews.len(), 1);
        assert_eq!(page.reactions.excellent, 4);
        assert_eq!(page.reactions.sad, 0);
    }

    #[tokio::test]
    async fn test_review_failure_degrades_to_empty() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/movies/details/tmdb/603"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "source": "tmdb",
                "externalId": "603"
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/reviews/tmdb/603"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let client = BackendClient::new(server.uri());
        let page = load_details(&client, "tmdb", "603").await.unwrap();
        assert!(page.reviews.is_empty());
        assert_eq!(page.reactions.total(), 0);
    }

    #[tokio::test]
    async fn test_movie_failure_fails_the_load() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/movies/details/tmdb/999"))
            .respond_with(
                ResponseTemplate::new(404).set_body_json(serde_json::json!({"msg": "Not Found"})),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/reviews/tmdb/999"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .mount(&server)
            .await;

        let client = BackendClient::new(server.uri());
        let err = load_details(&client, "tmdb", "999").await.unwrap_err();
        assert!(err.is_not_found());
    }
}
