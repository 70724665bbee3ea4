pub mod analytics;
pub mod category;
pub mod movie;
pub mod notice;
pub mod reaction;
pub mod review;

pub use analytics::ClickEvent;
pub use category::Category;
pub use movie::{Genres, Movie, MovieKey, Provider, ProviderGroup};
pub use notice::Notice;
pub use reaction::{ReactionCounts, ReactionKind};
pub use review::{relative_age, NewReply, NewReview, Reply, Review};
