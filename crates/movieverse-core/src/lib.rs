pub mod aggregator;
pub mod details;
pub mod flows;
pub mod recommend;
pub mod trailer;

pub use aggregator::{CategoryAggregator, HomePage};
pub use details::{load_details, MovieDetailsPage};
pub use flows::{login, register, send_reaction, submit_reply, submit_review, validate_email};
pub use recommend::recommendations;
pub use trailer::{embed_url, watch_url, TrailerResolver, VideoCatalog, VideoSearch};
