//! Error types for Onboard.

use thiserror::Error;

/// Library-level error type for Onboard operations.
#[derive(Error, Debug)]
pub enum OnboardError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Content source error: {0}")]
    Source(String),

    #[error("Crawl {id} failed with status '{status}'")]
    CrawlFailed { id: String, status: String },

    #[error("Crawl {id} did not complete within {waited_secs} seconds")]
    CrawlTimeout { id: String, waited_secs: u64 },

    #[error("Extraction failed: {0}")]
    Extraction(String),

    #[error("OpenAI API error: {0}")]
    OpenAI(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Result type alias for Onboard operations.
pub type Result<T> = std::result::Result<T, OnboardError>;
