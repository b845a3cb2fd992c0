pub mod api;
pub mod config;
pub mod error;
pub mod game;
pub mod sessions;
pub mod view;

pub use api::router;
