//! Search form and results pages
//!
//! GET /         empty form
//! GET /search   one page of upstream results, `?q=<text>&page=<n>`

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use serde::Deserialize;
use thiserror::Error;

use crate::newsapi::NewsApiError;
use crate::pagination::{parse_page, PageError, PaginationState};
use crate::render::{self, SearchView};
use crate::AppState;

/// Query parameters for the results page
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    /// Free text, passed upstream as-is (empty included)
    #[serde(default)]
    pub q: String,

    /// Raw page number; absent or empty means 1
    #[serde(default)]
    pub page: Option<String>,
}

/// GET /
pub async fn serve_index() -> Result<Html<String>, SearchError> {
    Ok(Html(render::render_index()?))
}

/// GET /search?q=TEXT&page=N
///
/// The page number is validated before any upstream call. Errors abort
/// the whole response; nothing is partially rendered.
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Html<String>, SearchError> {
    let page = parse_page(params.page.as_deref())?;

    let results = state.news.fetch_everything(&params.q, page).await?;

    let pagination = PaginationState::new(page, results.total_results, state.news.page_size());
    tracing::debug!(
        next_page = pagination.next_page,
        total_pages = pagination.total_pages,
        last_page = pagination.is_last_page(),
        "Derived pagination"
    );

    let view = SearchView::new(params.q, pagination, results);
    Ok(Html(render::render_search(view)?))
}

/// Search errors
#[derive(Debug, Error)]
pub enum SearchError {
    #[error(transparent)]
    InvalidPage(#[from] PageError),

    #[error(transparent)]
    Upstream(#[from] NewsApiError),

    #[error("Template error: {0}")]
    Render(#[from] askama::Error),
}

impl IntoResponse for SearchError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "Search request failed");
        (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()).into_response()
    }
}
