//! HTTP handlers for newsdesk-web

pub mod health;
pub mod search;

pub use health::health_routes;
pub use search::{search, serve_index};
