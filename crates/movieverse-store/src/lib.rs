pub mod analytics;
pub mod local;
pub mod watchlist;

pub use analytics::ClickTracker;
pub use local::{keys, LocalStore};
pub use watchlist::Watchlist;
