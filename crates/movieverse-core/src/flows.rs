use movieverse_api::{ApiError, BackendClient};
use movieverse_models::{NewReply, NewReview, ReactionCounts, ReactionKind, Review};
use regex::Regex;
use std::sync::OnceLock;
use tracing::info;

fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email pattern"))
}

pub fn validate_email(email: &str) -> Result<(), ApiError> {
    if email_regex().is_match(email) {
        Ok(())
    } else {
        Err(ApiError::Validation(
            "Please enter a valid email address.".to_string(),
        ))
    }
}

/// Local checks applied before a review or reply goes on the wire. A
/// failing submission never reaches the backend.
fn validate_submission(name: &str, email: &str, text: &str) -> Result<(), ApiError> {
    if name.trim().is_empty() {
        return Err(ApiError::Validation("Please enter your name.".to_string()));
    }
    validate_email(email)?;
    if text.trim().is_empty() {
        return Err(ApiError::Validation(
            "Please enter some text before submitting.".to_string(),
        ));
    }
    Ok(())
}

/// Validate and submit a review, then re-fetch the full review list so
/// the caller renders what the server actually stored.
pub async fn submit_review(
    backend: &BackendClient,
    source: &str,
    external_id: &str,
    review: NewReview,
) -> Result<Vec<Review>, ApiError> {
    validate_submission(&review.name, &review.email, &review.text)?;
    if let Some(rating) = review.rating {
        if !(1..=10).contains(&rating) {
            return Err(ApiError::Validation(
                "Rating must be between 1 and 10.".to_string(),
            ));
        }
    }

    let created = backend.submit_review(source, external_id, &review).await?;
    info!(source, external_id, review_id = %created.id, "review submitted");
    backend.get_reviews(source, external_id).await
}

/// Validate and submit a reply, then re-fetch the review list.
pub async fn submit_reply(
    backend: &BackendClient,
    source: &str,
    external_id: &str,
    review_id: &str,
    reply: NewReply,
) -> Result<Vec<Review>, ApiError> {
    validate_submission(&reply.name, &reply.email, &reply.text)?;
    if review_id.trim().is_empty() {
        return Err(ApiError::Validation(
            "A reply needs the review it answers.".to_string(),
        ));
    }

    let created = backend
        .submit_reply(source, external_id, review_id, &reply)
        .await?;
    info!(source, external_id, review_id, reply_id = %created.id, "reply submitted");
    backend.get_reviews(source, external_id).await
}

/// Record a reaction and return the server's updated tally.
pub async fn send_reaction(
    backend: &BackendClient,
    source: &str,
    external_id: &str,
    reaction: ReactionKind,
) -> Result<ReactionCounts, ApiError> {
    let counts = backend.submit_reaction(source, external_id, reaction).await?;
    info!(source, external_id, reaction = %reaction, "reaction recorded");
    Ok(counts)
}

/// Authenticate and return the session token. Persisting the token is
/// the caller's concern.
pub async fn login(
    backend: &BackendClient,
    email: &str,
    password: &str,
) -> Result<String, ApiError> {
    validate_email(email)?;
    if password.is_empty() {
        return Err(ApiError::Validation(
            "Please enter your password.".to_string(),
        ));
    }
    backend.login(email, password).await
}

/// Create an account and return the session token.
pub async fn register(
    backend: &BackendClient,
    email: &str,
    password: &str,
) -> Result<String, ApiError> {
    validate_email(email)?;
    if password.len() < 6 {
        return Err(ApiError::Validation(
            "Password must be at least 6 characters.".to_string(),
        ));
    }
    backend.register(email, password).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_email_validation() {
        assert!(validate_email("alice@example.com").is_ok());
        assert!(validate_email("a@b.co").is_ok());
        assert!(validate_email("not-an-email").is_err());
        assert!(validate_email("two words@example.com").is_err());
        assert!(validate_email("alice@nodot").is_err());
        assert!(validate_email("").is_err());
    }

    #[tokio::test]
    async fn test_invalid_review_never_hits_the_wire() {
        let server = MockServer::start().await;
        // No mounted mocks: any request would 404 and received_requests
        // would record it.
        let client = BackendClient::new(server.uri());

        let review = NewReview {
            text: "Great".to_string(),
            name: "Alice".to_string(),
            email: "bad-email".to_string(),
            rating: None,
        };
        let err = submit_review(&client, "tmdb", "603", review)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));

        let review = NewReview {
            text: "   ".to_string(),
            name: "Alice".to_string(),
            email: "alice@example.com".to_string(),
            rating: None,
        };
        assert!(submit_review(&client, "tmdb", "603", review).await.is_err());

        let review = NewReview {
            text: "Great".to_string(),
            name: "Alice".to_string(),
            email: "alice@example.com".to_string(),
            rating: Some(11),
        };
        assert!(submit_review(&client, "tmdb", "603", review).await.is_err());

        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_submit_review_refetches_list() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/reviews/tmdb/603"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "_id": "r2", "name": "Bob", "text": "Fun", "createdAt": "2026-02-01T00:00:00Z"
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/reviews/tmdb/603"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"_id": "r1", "name": "Alice", "text": "Great", "createdAt": "2026-01-10T12:00:00Z"},
                {"_id": "r2", "name": "Bob", "text": "Fun", "createdAt": "2026-02-01T00:00:00Z"}
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let client = BackendClient::new(server.uri());
        let review = NewReview {
            text: "Fun".to_string(),
            name: "Bob".to_string(),
            email: "bob@example.com".to_string(),
            rating: Some(8),
        };
        let reviews = submit_review(&client, "tmdb", "603", review).await.unwrap();
        assert_eq!(reviews.len(), 2);
    }

    #[tokio::test]
    async fn test_submit_reply_requires_review_id() {
        let server = MockServer::start().await;
        let client = BackendClient::new(server.uri());
        let reply = NewReply {
            text: "Agreed".to_string(),
            name: "Carol".to_string(),
            email: "carol@example.com".to_string(),
        };
        let err = submit_reply(&client, "tmdb", "603", "  ", reply)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_send_reaction_returns_tally() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/movies/reactions/tmdb/603"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "reactionCounts": {"excellent": 3, "sad": 1}
            })))
            .mount(&server)
            .await;

        let client = BackendClient::new(server.uri());
        let counts = send_reaction(&client, "tmdb", "603", ReactionKind::Excellent)
            .await
            .unwrap();
        assert_eq!(counts.excellent, 3);
        assert_eq!(counts.total(), 4);
    }

    #[tokio::test]
    async fn test_login_rejects_bad_email_locally() {
        let server = MockServer::start().await;
        let client = BackendClient::new(server.uri());
        assert!(login(&client, "nope", "secret").await.is_err());
        assert!(login(&client, "alice@example.com", "").await.is_err());
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_register_enforces_password_length() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/register"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"token": "jwt-new"})),
            )
            .mount(&server)
            .await;

        let client = BackendClient::new(server.uri());
        assert!(register(&client, "alice@example.com", "short")
            .await
            .is_err());
        let token = register(&client, "alice@example.com", "longenough")
            .await
            .unwrap();
        assert_eq!(token, "jwt-new");
    }
}
