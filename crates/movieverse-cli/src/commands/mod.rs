pub mod auth;
pub mod config;
pub mod context;
pub mod details;
pub mod home;
pub mod notices;
pub mod react;
pub mod review;
pub mod trailer;
pub mod watchlist;
