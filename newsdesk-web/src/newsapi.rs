//! News API client
//!
//! Wraps the paginated `everything` search endpoint of newsapi.org.
//! One GET per call, no retries, no caching.

use chrono::{DateTime, Utc};
use newsdesk_common::config::DEFAULT_BASE_URL;
use newsdesk_common::ApiKey;
use reqwest::StatusCode;
use serde::{Deserialize, Deserializer, Serialize};
use std::time::Duration;
use thiserror::Error;
use url::Url;

const USER_AGENT: &str = concat!("newsdesk/", env!("CARGO_PKG_VERSION"));

/// Upstream ceiling for `pageSize`
pub const MAX_PAGE_SIZE: u32 = 100;

const SORT_BY: &str = "publishedAt";
const LANGUAGE: &str = "en";

/// News API client errors
#[derive(Debug, Error)]
pub enum NewsApiError {
    /// DNS, connect, timeout or body read failure
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Upstream answered with anything but 200
    #[error("News API returned status {0} with body {1}")]
    ApiError(u16, String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),
}

impl NewsApiError {
    /// HTTP status reported by the upstream, if the call got that far
    pub fn status(&self) -> Option<u16> {
        match self {
            NewsApiError::ApiError(status, _) => Some(*status),
            _ => None,
        }
    }
}

/// Treat an explicit JSON `null` like a missing key
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Publisher of an article
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Source {
    /// Upstream source identifier; null for many smaller publishers
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
}

/// A single search hit
///
/// The upstream sends `null` for almost any field of a sparse article;
/// none of them fails the whole result set.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    #[serde(default, deserialize_with = "null_as_default")]
    pub source: Source,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(default)]
    pub url_to_image: Option<String>,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
    /// Truncated body snippet
    #[serde(default)]
    pub content: Option<String>,
}

impl Article {
    /// Publication date as `YYYY-MM-DD`, empty when unknown
    pub fn format_published_date(&self) -> String {
        self.published_at
            .map(|at| at.format("%Y-%m-%d").to_string())
            .unwrap_or_default()
    }
}

/// Response body of the `everything` endpoint
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultSet {
    pub status: String,
    pub total_results: u64,
    /// Upstream order (newest first), untouched
    #[serde(default, deserialize_with = "null_as_default")]
    pub articles: Vec<Article>,
}

/// Build the shared HTTP transport
///
/// The returned client pools connections and is cheap to clone, so one
/// instance serves every request.
pub fn build_http_client(timeout: Duration) -> Result<reqwest::Client, NewsApiError> {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .build()
        .map_err(|e| NewsApiError::NetworkError(e.to_string()))
}

/// News API client
#[derive(Debug, Clone)]
pub struct NewsClient {
    http: reqwest::Client,
    base_url: Url,
    api_key: ApiKey,
    page_size: u32,
}

impl NewsClient {
    /// Create a client against the public endpoint
    ///
    /// `page_size` is clamped into `1..=MAX_PAGE_SIZE`; out-of-range values
    /// are adjusted, never rejected.
    pub fn new(http: reqwest::Client, api_key: ApiKey, page_size: u32) -> Self {
        Self {
            http,
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid"),
            api_key,
            page_size: page_size.clamp(1, MAX_PAGE_SIZE),
        }
    }

    /// Point the client at another base URL
    ///
    /// A trailing slash is added when missing so that `everything` lands
    /// under the given path rather than replacing its last segment.
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self, NewsApiError> {
        let mut url = Url::parse(base_url)
            .map_err(|e| NewsApiError::InvalidBaseUrl(format!("{}: {}", base_url, e)))?;

        if url.cannot_be_a_base() {
            return Err(NewsApiError::InvalidBaseUrl(base_url.to_string()));
        }

        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }

        self.base_url = url;
        Ok(self)
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Outbound URL for one page of results
    ///
    /// Every parameter is form-urlencoded, so reserved characters in
    /// `query` survive the round trip.
    pub fn everything_url(&self, query: &str, page: u32) -> Url {
        let mut url = self.base_url.clone();
        let path = format!("{}everything", url.path());
        url.set_path(&path);

        url.query_pairs_mut()
            .clear()
            .append_pair("q", query)
            .append_pair("pageSize", &self.page_size.to_string())
            .append_pair("page", &page.to_string())
            .append_pair("apiKey", self.api_key.expose())
            .append_pair("sortBy", SORT_BY)
            .append_pair("language", LANGUAGE);

        url
    }

    /// Fetch one page of search results
    pub async fn fetch_everything(&self, query: &str, page: u32) -> Result<ResultSet, NewsApiError> {
        let url = self.everything_url(query, page);

        // The URL carries the API key, so only the search terms are logged
        tracing::debug!(query = %query, page, page_size = self.page_size, "Querying news API");

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| NewsApiError::NetworkError(e.without_url().to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| NewsApiError::NetworkError(e.without_url().to_string()))?;

        if status != StatusCode::OK {
            tracing::warn!(status = status.as_u16(), "News API returned error status");
            return Err(NewsApiError::ApiError(status.as_u16(), body));
        }

        let results: ResultSet =
            serde_json::from_str(&body).map_err(|e| NewsApiError::ParseError(e.to_string()))?;

        tracing::info!(
            query = %query,
            page,
            total_results = results.total_results,
            articles = results.articles.len(),
            "Retrieved search results"
        );

        Ok(results)
    }
}
