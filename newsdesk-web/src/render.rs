//! HTML rendering
//!
//! Templates live in `templates/` and are compiled into the binary by
//! askama. One page serves both the empty form and the results.

use askama::Template;
use url::form_urlencoded;

use crate::newsapi::{Article, ResultSet};
use crate::pagination::PaginationState;

/// Search page, with or without results
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub search: Option<SearchView>,
}

/// Everything the results section needs
#[derive(Debug, Clone)]
pub struct SearchView {
    pub query: String,
    pub pagination: PaginationState,
    pub total_results: u64,
    pub articles: Vec<ArticleCard>,
}

impl SearchView {
    pub fn new(query: String, pagination: PaginationState, results: ResultSet) -> Self {
        Self {
            query,
            pagination,
            total_results: results.total_results,
            articles: results.articles.into_iter().map(ArticleCard::from).collect(),
        }
    }

    /// Link to another page of the same search
    pub fn page_href(&self, page: u32) -> String {
        let query = form_urlencoded::Serializer::new(String::new())
            .append_pair("q", &self.query)
            .append_pair("page", &page.to_string())
            .finish();
        format!("/search?{}", query)
    }

    pub fn previous_href(&self) -> String {
        self.page_href(self.pagination.previous_page())
    }

    pub fn next_href(&self) -> String {
        self.page_href(self.pagination.next_page)
    }

    pub fn has_previous(&self) -> bool {
        self.pagination.current_page() > 1
    }

    pub fn has_next(&self) -> bool {
        !self.pagination.is_last_page()
    }
}

/// One article, flattened for display
#[derive(Debug, Clone)]
pub struct ArticleCard {
    pub title: String,
    pub url: String,
    pub image_url: Option<String>,
    pub description: String,
    pub source_name: String,
    pub author: Option<String>,
    pub published: String,
}

impl From<Article> for ArticleCard {
    fn from(article: Article) -> Self {
        let published = article.format_published_date();
        Self {
            title: article.title,
            url: article.url,
            image_url: article.url_to_image.filter(|u| !u.is_empty()),
            description: article.description.unwrap_or_default(),
            source_name: article.source.name,
            author: article.author.filter(|a| !a.is_empty()),
            published,
        }
    }
}

/// Empty search form
pub fn render_index() -> askama::Result<String> {
    IndexTemplate { search: None }.render()
}

/// Form plus one page of results
pub fn render_search(view: SearchView) -> askama::Result<String> {
    IndexTemplate { search: Some(view) }.render()
}
