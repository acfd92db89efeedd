//! Pipeline orchestrator for Onboard.
//!
//! Coordinates the whole process from fetching a website to the merged
//! business records.

use crate::config::{Prompts, Settings};
use crate::error::Result;
use crate::extraction::{Extractor, LlmExtractor};
use crate::record::{CombinedMap, RecordMerger};
use crate::source::{validate_url, ContentSource, FirecrawlSource, Page};
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Fetches pages, extracts records and merges them.
pub struct Analyzer {
    source: Arc<dyn ContentSource>,
    extractor: Arc<dyn Extractor>,
    pages: Vec<Page>,
}

impl Analyzer {
    /// Create an analyzer backed by Firecrawl and the configured LLM.
    pub fn new(settings: &Settings) -> Result<Self> {
        let prompts = Prompts::load(
            settings.prompts.custom_dir.as_deref(),
            Some(&settings.prompts.variables),
        )?;

        let source = Arc::new(FirecrawlSource::from_settings(&settings.firecrawl)?);
        let extractor = Arc::new(LlmExtractor::from_settings(&settings.extraction, &prompts)?);

        info!(
            "Using {} at {} for extraction",
            settings.extraction.model, settings.extraction.api_base
        );

        Ok(Self::with_components(source, extractor))
    }

    /// Create an analyzer with custom components.
    pub fn with_components(source: Arc<dyn ContentSource>, extractor: Arc<dyn Extractor>) -> Self {
        Self {
            source,
            extractor,
            pages: Vec::new(),
        }
    }

    /// Pages collected so far, in fetch order.
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    /// Scrape a single page. Failures are logged and add nothing.
    #[instrument(skip(self))]
    pub async fn scrape_url(&mut self, url: &str) -> usize {
        match self.source.scrape(url).await {
            Ok(page) => {
                info!("Scraped {}", url);
                self.pages.push(page);
                1
            }
            Err(e) => {
                warn!("Failed to scrape {}: {}", url, e);
                0
            }
        }
    }

    /// Crawl a site up to `limit` pages. Failures are logged and add nothing.
    #[instrument(skip(self))]
    pub async fn crawl_site(&mut self, url: &str, limit: u32) -> usize {
        match self.source.crawl(url, limit).await {
            Ok(pages) => {
                info!("Crawled {} ({} pages, limit {})", url, pages.len(), limit);
                let added = pages.len();
                self.pages.extend(pages);
                added
            }
            Err(e) => {
                warn!("Failed to crawl {}: {}", url, e);
                0
            }
        }
    }

    /// Extract every collected page in order and merge the results.
    ///
    /// Pages whose extraction fails or comes back empty are skipped.
    #[instrument(skip(self), fields(pages = self.pages.len()))]
    pub async fn process_all(&self) -> (CombinedMap, usize) {
        let mut merger = RecordMerger::new();
        let mut extracted = 0;

        for (index, page) in self.pages.iter().enumerate() {
            eprintln!("  Extracting page {}/{}: {}", index + 1, self.pages.len(), page.url);
            match self.extractor.extract(&page.markdown).await {
                Ok(Some(record)) => {
                    let name = record.entity_name().to_string();
                    info!("Extracted '{}' from {}", name, page.url);
                    merger.absorb(&name, &record);
                    extracted += 1;
                }
                Ok(None) => {
                    info!("Nothing extracted from {}", page.url);
                }
                Err(e) => {
                    warn!("Extraction failed for {}: {}", page.url, e);
                }
            }
        }

        (merger.into_map(), extracted)
    }

    /// Run the full pipeline for a website.
    #[instrument(skip(self, options))]
    pub async fn analyze(&mut self, url: &str, options: &AnalyzeOptions) -> Result<AnalysisReport> {
        let url = validate_url(url)?.to_string();

        if options.scrape {
            eprintln!("  Scraping {}...", url);
            self.scrape_url(&url).await;
        }
        if options.crawl {
            eprintln!("  Crawling {} (up to {} pages)...", url, options.crawl_limit);
            self.crawl_site(&url, options.crawl_limit).await;
        }
        eprintln!("  Collected {} pages", self.pages.len());

        let (businesses, records_extracted) = self.process_all().await;

        Ok(AnalysisReport {
            url,
            pages_fetched: self.pages.len(),
            records_extracted,
            businesses,
        })
    }
}

/// Which fetch steps to run.
#[derive(Debug, Clone)]
pub struct AnalyzeOptions {
    pub scrape: bool,
    pub crawl: bool,
    pub crawl_limit: u32,
}

impl Default for AnalyzeOptions {
    fn default() -> Self {
        Self {
            scrape: true,
            crawl: true,
            crawl_limit: 3,
        }
    }
}

/// Result of analyzing a website.
#[derive(Debug)]
pub struct AnalysisReport {
    /// Normalized starting URL.
    pub url: String,
    /// Pages collected from the source.
    pub pages_fetched: usize,
    /// Pages that produced a record.
    pub records_extracted: usize,
    /// Merged records by business name.
    pub businesses: CombinedMap,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::OnboardError;
    use crate::record::{CompanyInfo, ExtractedRecord, UNKNOWN_BUSINESS};
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct FakeSource {
        fail_scrape: bool,
        fail_crawl: bool,
        crawl_limits: Mutex<Vec<u32>>,
    }

    impl FakeSource {
        fn new(fail_scrape: bool, fail_crawl: bool) -> Self {
            Self {
                fail_scrape,
                fail_crawl,
                crawl_limits: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl ContentSource for FakeSource {
        async fn scrape(&self, url: &str) -> Result<Page> {
            if self.fail_scrape {
                return Err(OnboardError::Source("boom".to_string()));
            }
            Ok(Page::new(url, "home|Acme|Retail"))
        }

        async fn crawl(&self, url: &str, limit: u32) -> Result<Vec<Page>> {
            self.crawl_limits.lock().unwrap().push(limit);
            if self.fail_crawl {
                return Err(OnboardError::Source("boom".to_string()));
            }
            Ok(vec![
                Page::new(format!("{}about", url), "about|Acme|Tech"),
                Page::new(format!("{}broken", url), "error"),
                Page::new(format!("{}blank", url), "empty"),
                Page::new(format!("{}contact", url), "contact||"),
            ])
        }
    }

    /// Interprets markdown as `label|name|sector`.
    struct FakeExtractor;

    #[async_trait]
    impl Extractor for FakeExtractor {
        async fn extract(&self, content: &str) -> Result<Option<ExtractedRecord>> {
            match content {
                "error" => Err(OnboardError::Extraction("bad json".to_string())),
                "empty" => Ok(None),
                _ => {
                    let parts: Vec<&str> = content.split('|').collect();
                    Ok(Some(ExtractedRecord {
                        business_name: parts[1].to_string(),
                        company_info: CompanyInfo {
                            sector: parts[2].to_string(),
                            ..Default::default()
                        },
                        extra_info: parts[0].to_string(),
                        ..Default::default()
                    }))
                }
            }
        }
    }

    fn analyzer(source: FakeSource) -> Analyzer {
        Analyzer::with_components(Arc::new(source), Arc::new(FakeExtractor))
    }

    #[tokio::test]
    async fn test_analyze_merges_in_fetch_order() {
        let mut analyzer = analyzer(FakeSource::new(false, false));
        let report = analyzer
            .analyze("https://acme.test/", &AnalyzeOptions::default())
            .await
            .unwrap();

        assert_eq!(report.pages_fetched, 5);
        assert_eq!(report.records_extracted, 3);
        assert_eq!(report.businesses.len(), 2);

        let acme = &report.businesses["Acme"];
        assert_eq!(acme.company_info.sector, "Tech");
        assert_eq!(acme.extra_info, "home\nabout");

        let unknown = &report.businesses[UNKNOWN_BUSINESS];
        assert_eq!(unknown.extra_info, "contact");
    }

    #[tokio::test]
    async fn test_failed_fetches_contribute_nothing() {
        let mut analyzer = analyzer(FakeSource::new(true, true));
        let report = analyzer
            .analyze("https://acme.test/", &AnalyzeOptions::default())
            .await
            .unwrap();

        assert_eq!(report.pages_fetched, 0);
        assert!(report.businesses.is_empty());
    }

    #[tokio::test]
    async fn test_scrape_only() {
        let source = Arc::new(FakeSource::new(false, false));
        let mut analyzer = Analyzer::with_components(source.clone(), Arc::new(FakeExtractor));
        let options = AnalyzeOptions {
            crawl: false,
            ..Default::default()
        };

        let report = analyzer.analyze("https://acme.test/", &options).await.unwrap();
        assert_eq!(report.pages_fetched, 1);
        assert!(source.crawl_limits.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_crawl_limit_is_forwarded() {
        let source = Arc::new(FakeSource::new(false, false));
        let mut analyzer = Analyzer::with_components(source.clone(), Arc::new(FakeExtractor));

        assert_eq!(analyzer.crawl_site("https://acme.test/", 7).await, 4);
        assert_eq!(*source.crawl_limits.lock().unwrap(), vec![7]);
        assert_eq!(analyzer.pages().len(), 4);
    }

    #[tokio::test]
    async fn test_invalid_url_is_rejected() {
        let mut analyzer = analyzer(FakeSource::new(false, false));
        let result = analyzer.analyze("not a url", &AnalyzeOptions::default()).await;
        assert!(matches!(result, Err(OnboardError::InvalidInput(_))));
    }
}
