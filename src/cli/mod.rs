//! CLI module for Onboard.

pub mod commands;
mod output;
pub mod preflight;

pub use output::Output;

use crate::config::Settings;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Onboard - Business website analyzer
///
/// Crawls a business website, extracts company, contact and location data
/// with an LLM, and merges everything into one record per business.
#[derive(Parser, Debug)]
#[command(name = "onboard")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Configuration file in effect: `--config` if given, else the default.
    pub fn config_path(&self) -> PathBuf {
        self.config
            .as_deref()
            .map(Settings::expand_path)
            .unwrap_or_else(Settings::default_config_path)
    }

    /// Log level for the `onboard` target. `-v` flags override `configured`.
    pub fn log_level<'a>(&self, configured: &'a str) -> &'a str {
        match self.verbose {
            0 => configured,
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scrape and crawl a website, extract business data and save the merged result
    Analyze {
        /// Website URL (e.g. https://www.example.com)
        url: String,

        /// Maximum number of pages to crawl (default from config)
        #[arg(short, long)]
        limit: Option<u32>,

        /// Skip the single-page scrape of the URL
        #[arg(long)]
        no_scrape: bool,

        /// Skip crawling the site
        #[arg(long)]
        no_crawl: bool,

        /// Directory for the result file (default from config)
        #[arg(short, long)]
        output_dir: Option<String>,

        /// LLM model to use for extraction
        #[arg(short, long)]
        model: Option<String>,
    },

    /// Merge previously saved result files into one
    Merge {
        /// Result files, merged in the given order
        #[arg(required = true)]
        inputs: Vec<String>,

        /// Output file (stdout if not specified)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Check API keys and configuration
    Doctor,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Open configuration file in editor
    Edit,

    /// Show configuration file path
    Path,
}
