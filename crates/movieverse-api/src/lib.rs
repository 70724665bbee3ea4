pub mod backend;
pub mod error;
pub mod rate_limiter;
pub mod tmdb;
pub mod youtube;

pub use backend::BackendClient;
pub use error::ApiError;
pub use rate_limiter::RateLimiter;
pub use tmdb::{TmdbClient, TmdbVideo};
pub use youtube::{SearchHit, YouTubeClient};
