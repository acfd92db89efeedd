//! OpenAI-compatible client configuration.
//!
//! The extraction provider only needs the chat completion endpoint, so any
//! OpenAI-compatible base URL works (Groq by default).

use crate::error::{OnboardError, Result};
use async_openai::{config::OpenAIConfig, Client};
use std::time::Duration;

/// Create a client for `api_base` authenticated with `api_key`.
pub fn create_client_with_timeout(
    api_base: &str,
    api_key: &str,
    timeout: Duration,
) -> Result<Client<OpenAIConfig>> {
    let http_client = reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| OnboardError::Config(format!("Failed to create HTTP client: {}", e)))?;

    let config = OpenAIConfig::new()
        .with_api_base(api_base.trim_end_matches('/'))
        .with_api_key(api_key);

    Ok(Client::with_config(config).with_http_client(http_client))
}
