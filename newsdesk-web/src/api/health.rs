//! Liveness probe for load balancers and uptime checks

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::AppState;

const SERVICE_NAME: &str = "newsdesk-web";

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub module: &'static str,
    pub version: &'static str,
    /// Articles requested per upstream call
    pub page_size: u32,
}

/// GET /health
///
/// Reports only local state; the news API is not contacted, so an
/// upstream outage does not mark this service unhealthy.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        module: SERVICE_NAME,
        version: env!("CARGO_PKG_VERSION"),
        page_size: state.news.page_size(),
    })
}

pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
