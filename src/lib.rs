//! Onboard - Business website analyzer
//!
//! A CLI tool that turns a business website into a structured profile.
//!
//! # Overview
//!
//! Onboard allows you to:
//! - Scrape and crawl a website into markdown (via Firecrawl)
//! - Extract company, contact and location data from each page with an LLM
//! - Merge the partial extractions into one record per business
//! - Save the result as a timestamped JSON file, or merge saved files later
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - `config` - Configuration management and prompt templates
//! - `source` - Content source abstraction (Firecrawl)
//! - `extraction` - LLM-based structured extraction
//! - `record` - Business records and the merge of partial extractions
//! - `store` - Saving and loading merged results
//! - `orchestrator` - Pipeline coordination
//!
//! # Example
//!
//! ```rust,no_run
//! use onboard::config::Settings;
//! use onboard::orchestrator::{AnalyzeOptions, Analyzer};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let mut analyzer = Analyzer::new(&settings)?;
//!
//!     let report = analyzer
//!         .analyze("https://www.example.com", &AnalyzeOptions::default())
//!         .await?;
//!     println!("Found {} businesses", report.businesses.len());
//!
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod extraction;
pub mod openai;
pub mod orchestrator;
pub mod record;
pub mod source;
pub mod store;

pub use error::{OnboardError, Result};
