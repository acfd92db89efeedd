//! Content source abstraction for Onboard.
//!
//! Provides a trait-based interface for fetching website content as markdown.

mod firecrawl;

pub use firecrawl::FirecrawlSource;

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// One fetched page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    /// URL the content was fetched from.
    pub url: String,
    /// Page content as markdown.
    pub markdown: String,
}

impl Page {
    pub fn new(url: impl Into<String>, markdown: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            markdown: markdown.into(),
        }
    }
}

/// Trait for website content providers.
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Fetch a single page.
    async fn scrape(&self, url: &str) -> Result<Page>;

    /// Crawl a site starting at `url`, returning at most `limit` pages.
    async fn crawl(&self, url: &str, limit: u32) -> Result<Vec<Page>>;
}

/// Check that `input` is an absolute http(s) URL.
pub fn validate_url(input: &str) -> Result<url::Url> {
    let parsed = url::Url::parse(input.trim()).map_err(|e| {
        crate::error::OnboardError::InvalidInput(format!("Invalid URL '{}': {}", input, e))
    })?;

    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        other => Err(crate::error::OnboardError::InvalidInput(format!(
            "Unsupported URL scheme '{}' in {}",
            other, input
        ))),
    }
}
