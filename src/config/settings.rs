//! Configuration settings for Onboard.

use crate::error::{OnboardError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub firecrawl: FirecrawlSettings,
    pub extraction: ExtractionSettings,
    pub prompts: PromptSettings,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Directory where analysis results are written.
    pub output_dir: String,
    /// Log level used when no `-v` flag is given (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            output_dir: "./business_analysis".to_string(),
            log_level: "warn".to_string(),
        }
    }
}

/// Firecrawl scraping service settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FirecrawlSettings {
    /// Base URL of the Firecrawl API.
    pub api_url: String,
    /// API key. Falls back to the `FIRECRAWL_API_KEY` environment variable.
    pub api_key: Option<String>,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    /// Delay between crawl status checks.
    pub poll_interval_secs: u64,
    /// Give up on a crawl after this many seconds.
    pub max_wait_secs: u64,
    /// Default number of pages to crawl.
    pub crawl_limit: u32,
}

impl Default for FirecrawlSettings {
    fn default() -> Self {
        Self {
            api_url: "https://api.firecrawl.dev".to_string(),
            api_key: None,
            timeout_secs: 60,
            poll_interval_secs: 2,
            max_wait_secs: 300,
            crawl_limit: 3,
        }
    }
}

impl FirecrawlSettings {
    pub const API_KEY_ENV: &'static str = "FIRECRAWL_API_KEY";

    /// Resolve the API key from config or environment.
    pub fn resolve_api_key(&self) -> Result<String> {
        resolve_key(self.api_key.as_deref(), Self::API_KEY_ENV)
    }
}

/// LLM extraction settings (any OpenAI-compatible chat completion API).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionSettings {
    /// Base URL of the chat completion API.
    pub api_base: String,
    /// API key. Falls back to the environment variable named by `api_key_env`.
    pub api_key: Option<String>,
    /// Environment variable holding the API key.
    pub api_key_env: String,
    /// Model used for extraction.
    pub model: String,
    pub temperature: f32,
    pub top_p: f32,
    /// Maximum completion tokens per page.
    pub max_tokens: u32,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ExtractionSettings {
    fn default() -> Self {
        Self {
            api_base: "https://api.groq.com/openai/v1".to_string(),
            api_key: None,
            api_key_env: "GROQ_API_KEY".to_string(),
            model: "llama-3.1-70b-versatile".to_string(),
            temperature: 0.0,
            top_p: 1.0,
            max_tokens: 8000,
            timeout_secs: 300,
        }
    }
}

impl ExtractionSettings {
    /// Resolve the API key from config or environment.
    pub fn resolve_api_key(&self) -> Result<String> {
        resolve_key(self.api_key.as_deref(), &self.api_key_env)
    }
}

/// Prompt customization settings.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PromptSettings {
    /// Directory for custom prompts (overrides defaults).
    pub custom_dir: Option<String>,
    /// Custom variables available in all prompts as {{variable_name}}.
    pub variables: std::collections::HashMap<String, String>,
}

fn resolve_key(configured: Option<&str>, env_var: &str) -> Result<String> {
    if let Some(key) = configured.filter(|k| !k.is_empty()) {
        return Ok(key.to_string());
    }
    match std::env::var(env_var) {
        Ok(key) if !key.is_empty() => Ok(key),
        Ok(_) => Err(OnboardError::Config(format!(
            "{} is empty. Set it with: export {}='...'",
            env_var, env_var
        ))),
        Err(_) => Err(OnboardError::Config(format!(
            "{} not set. Set it with: export {}='...' or add it to a .env file",
            env_var, env_var
        ))),
    }
}

impl Settings {
    /// Load settings from the default configuration file.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load settings from a specific path, or default location if None.
    pub fn load_from(path: Option<&PathBuf>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p.clone(),
            None => Self::default_config_path(),
        };

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let settings: Settings = toml::from_str(&content)?;
            Ok(settings)
        } else {
            Ok(Settings::default())
        }
    }

    /// Save settings to a specific path.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| OnboardError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("onboard")
            .join("config.toml")
    }

    /// Expand shell variables in paths (e.g., ~).
    pub fn expand_path(path: &str) -> PathBuf {
        PathBuf::from(shellexpand::tilde(path).to_string())
    }

    /// Get the expanded output directory path.
    pub fn output_dir(&self) -> PathBuf {
        Self::expand_path(&self.general.output_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.firecrawl.crawl_limit, 3);
        assert_eq!(settings.extraction.model, "llama-3.1-70b-versatile");
        assert_eq!(settings.extraction.max_tokens, 8000);
        assert_eq!(settings.extraction.temperature, 0.0);
        assert_eq!(settings.general.log_level, "warn");
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let settings: Settings = toml::from_str(
            r#"
            [extraction]
            model = "llama-3.3-70b-versatile"

            [firecrawl]
            crawl_limit = 10
            "#,
        )
        .unwrap();

        assert_eq!(settings.extraction.model, "llama-3.3-70b-versatile");
        assert_eq!(settings.extraction.api_key_env, "GROQ_API_KEY");
        assert_eq!(settings.firecrawl.crawl_limit, 10);
        assert_eq!(settings.firecrawl.api_url, "https://api.firecrawl.dev");
        assert_eq!(settings.general.output_dir, "./business_analysis");
    }

    #[test]
    fn test_configured_key_wins() {
        let firecrawl = FirecrawlSettings {
            api_key: Some("fc-test".to_string()),
            ..Default::default()
        };
        assert_eq!(firecrawl.resolve_api_key().unwrap(), "fc-test");
    }

    #[test]
    fn test_missing_key_is_config_error() {
        let extraction = ExtractionSettings {
            api_key_env: "ONBOARD_TEST_KEY_THAT_IS_NEVER_SET".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            extraction.resolve_api_key(),
            Err(OnboardError::Config(_))
        ));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut settings = Settings::default();
        settings.general.output_dir = "/tmp/results".to_string();
        settings.save_to(&path).unwrap();

        let loaded = Settings::load_from(Some(&path)).unwrap();
        assert_eq!(loaded.general.output_dir, "/tmp/results");
    }
}
