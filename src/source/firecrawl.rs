//! Firecrawl source implementation.
//!
//! Talks to the Firecrawl v1 REST API. Scrapes are synchronous; crawls are
//! started as a job and polled until they finish.

use super::{ContentSource, Page};
use crate::config::FirecrawlSettings;
use crate::error::{OnboardError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument};

/// Firecrawl API client.
pub struct FirecrawlSource {
    client: Client,
    api_url: String,
    api_key: String,
    poll_interval: Duration,
    max_wait: Duration,
}

impl FirecrawlSource {
    /// Create a client from settings, resolving the API key.
    pub fn from_settings(settings: &FirecrawlSettings) -> Result<Self> {
        let api_key = settings.resolve_api_key()?;
        Self::new(&settings.api_url, &api_key, settings.timeout_secs).map(|source| {
            source.with_polling(
                Duration::from_secs(settings.poll_interval_secs),
                Duration::from_secs(settings.max_wait_secs),
            )
        })
    }

    /// Create a client for `api_url` with a per-request timeout.
    pub fn new(api_url: &str, api_key: &str, timeout_secs: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            poll_interval: Duration::from_secs(2),
            max_wait: Duration::from_secs(300),
        })
    }

    /// Override crawl polling cadence and deadline.
    pub fn with_polling(mut self, poll_interval: Duration, max_wait: Duration) -> Self {
        self.poll_interval = poll_interval;
        self.max_wait = max_wait;
        self
    }

    async fn post<T: DeserializeOwned>(&self, endpoint: &str, body: serde_json::Value) -> Result<T> {
        let url = format!("{}{}", self.api_url, endpoint);
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;
        Self::decode(&url, response).await
    }

    async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let response = self
            .client
            .get(url)
            .bearer_auth(&self.api_key)
            .send()
            .await?;
        Self::decode(url, response).await
    }

    async fn decode<T: DeserializeOwned>(url: &str, response: reqwest::Response) -> Result<T> {
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(OnboardError::Source(format!(
                "Firecrawl returned HTTP {} for {}: {}",
                status.as_u16(),
                url,
                body.chars().take(300).collect::<String>()
            )));
        }

        serde_json::from_str(&body).map_err(|e| {
            OnboardError::Source(format!("Unexpected Firecrawl response from {}: {}", url, e))
        })
    }

    /// Poll a crawl job until it completes, fails, or runs out of time.
    async fn wait_for_crawl(&self, id: &str, limit: usize) -> Result<Vec<PageData>> {
        let status_url = format!("{}/v1/crawl/{}", self.api_url, id);
        let started = Instant::now();

        loop {
            let status: CrawlStatus = self.get(&status_url).await?;
            debug!(
                "Crawl {} status '{}' ({}/{} pages)",
                id,
                status.status,
                status.completed.unwrap_or(0),
                status.total.unwrap_or(0)
            );

            if status.status == "completed" {
                return self.collect_pages(id, status, limit, started).await;
            }
            if matches!(status.status.as_str(), "failed" | "cancelled") {
                return Err(OnboardError::CrawlFailed {
                    id: id.to_string(),
                    status: status.status,
                });
            }

            if started.elapsed() >= self.max_wait {
                return Err(OnboardError::CrawlTimeout {
                    id: id.to_string(),
                    waited_secs: started.elapsed().as_secs(),
                });
            }

            tokio::time::sleep(self.poll_interval).await;
        }
    }

    /// Gather data from a completed crawl, following `next` links.
    ///
    /// Stops once `limit` usable pages are in hand. The `max_wait` deadline
    /// still applies while paging.
    async fn collect_pages(
        &self,
        id: &str,
        mut status: CrawlStatus,
        limit: usize,
        started: Instant,
    ) -> Result<Vec<PageData>> {
        let mut pages = std::mem::take(&mut status.data);
        let mut next = status.next.take();

        while let Some(url) = next {
            if usable_count(&pages) >= limit {
                break;
            }
            if started.elapsed() >= self.max_wait {
                return Err(OnboardError::CrawlTimeout {
                    id: id.to_string(),
                    waited_secs: started.elapsed().as_secs(),
                });
            }

            let page: CrawlStatus = self.get(&url).await?;
            if page.data.is_empty() {
                break;
            }
            pages.extend(page.data);
            next = page.next;
        }

        Ok(pages)
    }
}

fn usable_count(pages: &[PageData]) -> usize {
    pages.iter().filter(|p| p.has_markdown()).count()
}

#[async_trait]
impl ContentSource for FirecrawlSource {
    #[instrument(skip(self))]
    async fn scrape(&self, url: &str) -> Result<Page> {
        let response: ScrapeResponse = self
            .post("/v1/scrape", json!({ "url": url, "formats": ["markdown"] }))
            .await?;

        if !response.success {
            return Err(OnboardError::Source(format!(
                "Scrape of {} was rejected: {}",
                url,
                response.error.unwrap_or_else(|| "unknown error".to_string())
            )));
        }

        response
            .data
            .and_then(|data| data.into_page(url))
            .ok_or_else(|| OnboardError::Source(format!("No markdown returned for {}", url)))
    }

    #[instrument(skip(self))]
    async fn crawl(&self, url: &str, limit: u32) -> Result<Vec<Page>> {
        let started: CrawlStarted = self
            .post(
                "/v1/crawl",
                json!({
                    "url": url,
                    "limit": limit,
                    "scrapeOptions": { "formats": ["markdown"] }
                }),
            )
            .await?;

        let id = match (started.success, started.id) {
            (true, Some(id)) => id,
            _ => {
                return Err(OnboardError::Source(format!(
                    "Crawl of {} was rejected: {}",
                    url,
                    started.error.unwrap_or_else(|| "unknown error".to_string())
                )))
            }
        };

        info!("Started crawl {} for {} (limit {})", id, url, limit);

        let pages: Vec<Page> = self
            .wait_for_crawl(&id, limit as usize)
            .await?
            .into_iter()
            .filter_map(|data| data.into_page(url))
            .take(limit as usize)
            .collect();

        info!("Crawl {} returned {} pages", id, pages.len());
        Ok(pages)
    }
}

// ============================================================================
// Wire Types
// ============================================================================

#[derive(Debug, Deserialize)]
struct ScrapeResponse {
    #[serde(default)]
    success: bool,
    data: Option<PageData>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CrawlStarted {
    #[serde(default)]
    success: bool,
    id: Option<String>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CrawlStatus {
    status: String,
    total: Option<u32>,
    completed: Option<u32>,
    #[serde(default)]
    data: Vec<PageData>,
    next: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PageData {
    markdown: Option<String>,
    metadata: Option<PageMetadata>,
}

#[derive(Debug, Deserialize)]
struct PageMetadata {
    #[serde(rename = "sourceURL")]
    source_url: Option<String>,
}

impl PageData {
    fn has_markdown(&self) -> bool {
        self.markdown.as_deref().is_some_and(|m| !m.trim().is_empty())
    }

    /// Convert to a [`Page`], dropping entries without markdown.
    fn into_page(self, fallback_url: &str) -> Option<Page> {
        let markdown = self.markdown.filter(|m| !m.trim().is_empty())?;
        let url = self
            .metadata
            .and_then(|m| m.source_url)
            .unwrap_or_else(|| fallback_url.to_string());
        Some(Page { url, markdown })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_data_without_markdown_is_dropped() {
        let data: PageData = serde_json::from_str(r#"{"metadata": {"sourceURL": "https://a.test"}}"#).unwrap();
        assert!(data.into_page("https://fallback.test").is_none());

        let data: PageData = serde_json::from_str(r#"{"markdown": "   "}"#).unwrap();
        assert!(data.into_page("https://fallback.test").is_none());
    }

    #[test]
    fn test_page_url_prefers_source_url() {
        let data: PageData = serde_json::from_str(
            r##"{"markdown": "# Menu", "metadata": {"sourceURL": "https://a.test/menu", "title": "Menu"}}"##,
        )
        .unwrap();
        let page = data.into_page("https://a.test").unwrap();
        assert_eq!(page.url, "https://a.test/menu");
        assert_eq!(page.markdown, "# Menu");

        let data: PageData = serde_json::from_str(r#"{"markdown": "text"}"#).unwrap();
        assert_eq!(data.into_page("https://a.test").unwrap().url, "https://a.test");
    }

    #[test]
    fn test_api_url_trailing_slash() {
        let source = FirecrawlSource::new("http://localhost:3002/", "key", 5).unwrap();
        assert_eq!(source.api_url, "http://localhost:3002");
    }
}
