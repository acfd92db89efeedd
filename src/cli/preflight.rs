//! Pre-flight checks before expensive operations.
//!
//! Validates that required configuration is available before starting
//! operations that would otherwise fail midway.

use crate::config::Settings;
use crate::error::Result;

/// Requirements for different operations.
#[derive(Debug, Clone, Copy)]
pub enum Operation {
    /// Analysis needs both the scraping and the extraction API keys.
    Analyze,
}

/// Run pre-flight checks for the given operation.
///
/// Returns Ok(()) if all checks pass, or an error describing what's missing.
pub fn check(operation: Operation, settings: &Settings) -> Result<()> {
    match operation {
        Operation::Analyze => {
            settings.firecrawl.resolve_api_key()?;
            settings.extraction.resolve_api_key()?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_analyze_with_configured_keys() {
        let mut settings = Settings::default();
        settings.firecrawl.api_key = Some("fc-test".to_string());
        settings.extraction.api_key = Some("gsk-test".to_string());
        assert!(check(Operation::Analyze, &settings).is_ok());
    }

    #[test]
    fn test_check_analyze_missing_key() {
        let mut settings = Settings::default();
        settings.firecrawl.api_key = Some("fc-test".to_string());
        settings.extraction.api_key_env = "ONBOARD_PREFLIGHT_UNSET_KEY".to_string();
        assert!(check(Operation::Analyze, &settings).is_err());
    }
}
