//! Analyze command implementation.

use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::orchestrator::{AnalyzeOptions, Analyzer};
use crate::store::save_results;
use anyhow::{Context, Result};

/// Run the analyze command.
pub async fn run_analyze(
    url: &str,
    limit: Option<u32>,
    no_scrape: bool,
    no_crawl: bool,
    output_dir: Option<String>,
    model: Option<String>,
    mut settings: Settings,
) -> Result<()> {
    if no_scrape && no_crawl {
        anyhow::bail!("Nothing to do: --no-scrape and --no-crawl were both given");
    }

    if let Some(model) = model {
        settings.extraction.model = model;
    }

    preflight::check(Operation::Analyze, &settings)?;

    let options = AnalyzeOptions {
        scrape: !no_scrape,
        crawl: !no_crawl,
        crawl_limit: limit.unwrap_or(settings.firecrawl.crawl_limit),
    };

    Output::info(&format!("Analyzing {} with {}", url, settings.extraction.model));

    let mut analyzer = Analyzer::new(&settings)?;
    let report = analyzer.analyze(url, &options).await?;

    if report.pages_fetched == 0 {
        Output::warning("No content could be fetched. Check the URL and your Firecrawl key.");
    } else if report.records_extracted == 0 {
        Output::warning("No business data could be extracted from the fetched pages.");
    }

    let dir = output_dir
        .map(|d| Settings::expand_path(&d))
        .unwrap_or_else(|| settings.output_dir());

    let spinner = Output::spinner("Saving results...");
    let saved = save_results(&report.businesses, &dir)
        .with_context(|| format!("Failed to save results to {}", dir.display()))?;
    spinner.finish_and_clear();

    Output::success(&format!("Analysis results saved to: {}", saved.display()));

    Output::header("Analysis Summary");
    Output::kv("Pages fetched", &report.pages_fetched.to_string());
    Output::kv("Records extracted", &report.records_extracted.to_string());
    Output::kv("Businesses", &report.businesses.len().to_string());

    for (name, record) in &report.businesses {
        Output::business_summary(name, record);
    }

    Ok(())
}
