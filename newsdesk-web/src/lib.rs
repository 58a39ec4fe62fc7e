//! newsdesk-web library
//!
//! Web front-end for a news search API: a search form, paginated results
//! fetched from the upstream on every request, and static assets.

use axum::Router;
use std::path::{Path, PathBuf};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod newsapi;
pub mod pagination;
pub mod render;

use newsapi::NewsClient;

/// Application state shared across HTTP handlers
///
/// Built once at startup; cloning only bumps reference counts inside the
/// HTTP client.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Upstream search client
    pub news: NewsClient,
    /// Directory served under `/assets`
    pub assets_dir: PathBuf,
}

impl AppState {
    /// Create new application state
    pub fn new(news: NewsClient, assets_dir: impl AsRef<Path>) -> Self {
        Self {
            news,
            assets_dir: assets_dir.as_ref().to_path_buf(),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::get;

    let assets = ServeDir::new(&state.assets_dir);

    Router::new()
        .route("/", get(api::serve_index))
        .route("/search", get(api::search))
        .merge(api::health_routes())
        .nest_service("/assets", assets)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
