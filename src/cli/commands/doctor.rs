//! Doctor command - verify API keys and configuration.

use crate::cli::Output;
use crate::config::Settings;
use crate::store::RESULT_PREFIX;
use console::style;
use std::path::Path;

/// Check result for a single item.
#[derive(Debug)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Debug, PartialEq)]
pub enum CheckStatus {
    Ok,
    Warning,
    Error,
}

impl CheckResult {
    fn ok(name: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Ok,
            message: message.to_string(),
            hint: None,
        }
    }

    fn warning(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Warning,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn error(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Error,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn print(&self) {
        let icon = match self.status {
            CheckStatus::Ok => style("✓").green(),
            CheckStatus::Warning => style("!").yellow(),
            CheckStatus::Error => style("✗").red(),
        };

        println!("  {} {} - {}", icon, style(&self.name).bold(), self.message);

        if let Some(hint) = &self.hint {
            println!("    {} {}", style("→").dim(), style(hint).dim());
        }
    }
}

/// Run all diagnostic checks.
pub fn run_doctor(settings: &Settings, config_path: &Path) -> anyhow::Result<()> {
    Output::header("Onboard Doctor");
    println!();
    println!("Checking API keys and configuration...\n");

    let mut checks = Vec::new();

    println!("{}", style("API Configuration").bold());
    let key_checks = vec![
        check_api_key(
            "Firecrawl API key",
            settings.firecrawl.api_key.as_deref(),
            crate::config::FirecrawlSettings::API_KEY_ENV,
        ),
        check_api_key(
            "Extraction API key",
            settings.extraction.api_key.as_deref(),
            &settings.extraction.api_key_env,
        ),
    ];
    for check in &key_checks {
        check.print();
    }
    checks.extend(key_checks);
    Output::kv("Extraction model", &settings.extraction.model);
    Output::kv("Extraction endpoint", &settings.extraction.api_base);

    println!();

    println!("{}", style("Directories").bold());
    let dir_check = check_output_dir(settings);
    dir_check.print();
    checks.push(dir_check);

    println!();

    println!("{}", style("Configuration").bold());
    let config_check = check_config_file(config_path);
    config_check.print();
    checks.push(config_check);

    println!();

    let errors = checks.iter().filter(|c| c.status == CheckStatus::Error).count();
    let warnings = checks.iter().filter(|c| c.status == CheckStatus::Warning).count();

    if errors > 0 {
        Output::error(&format!(
            "{} error(s) found. Please fix them before using Onboard.",
            errors
        ));
        std::process::exit(1);
    } else if warnings > 0 {
        Output::warning(&format!("All checks passed with {} warning(s).", warnings));
    } else {
        Output::success("All checks passed! Onboard is ready to use.");
    }

    Ok(())
}

/// Check an API key from config or the environment.
fn check_api_key(name: &str, configured: Option<&str>, env_var: &str) -> CheckResult {
    if let Some(key) = configured.filter(|k| !k.is_empty()) {
        return CheckResult::ok(name, &format!("configured in config file ({})", mask_key(key)));
    }

    let hint = format!("Set with: export {}='...' or add it to .env", env_var);
    match std::env::var(env_var) {
        Ok(key) if key.is_empty() => CheckResult::error(name, &format!("{} is empty", env_var), &hint),
        Ok(key) => CheckResult::ok(name, &format!("{} set ({})", env_var, mask_key(&key))),
        Err(_) => CheckResult::error(name, &format!("{} not set", env_var), &hint),
    }
}

/// Show only the first and last few characters of a key.
fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 12 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", head, tail)
}

/// Check the output directory and count saved analyses.
fn check_output_dir(settings: &Settings) -> CheckResult {
    let output_dir = settings.output_dir();
    if !output_dir.exists() {
        return CheckResult::warning(
            "Output directory",
            &format!("{} (will be created)", output_dir.display()),
            "Directory will be created on first analysis",
        );
    }

    let saved = std::fs::read_dir(&output_dir)
        .map(|entries| {
            entries
                .filter_map(|e| e.ok())
                .filter(|e| e.file_name().to_string_lossy().starts_with(RESULT_PREFIX))
                .count()
        })
        .unwrap_or(0);

    CheckResult::ok(
        "Output directory",
        &format!("{} ({} saved analyses)", output_dir.display(), saved),
    )
}

/// Check if the config file in effect exists.
fn check_config_file(config_path: &Path) -> CheckResult {
    if config_path.exists() {
        CheckResult::ok("Config file", &format!("{}", config_path.display()))
    } else {
        CheckResult::warning(
            "Config file",
            "using defaults",
            "Create with: onboard config edit",
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_result_ok() {
        let result = CheckResult::ok("test", "passed");
        assert_eq!(result.status, CheckStatus::Ok);
        assert!(result.hint.is_none());
    }

    #[test]
    fn test_check_result_error() {
        let result = CheckResult::error("test", "failed", "fix it");
        assert_eq!(result.status, CheckStatus::Error);
        assert_eq!(result.hint, Some("fix it".to_string()));
    }

    #[test]
    fn test_config_file_check_uses_given_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");

        assert_eq!(check_config_file(&path).status, CheckStatus::Warning);

        Settings::default().save_to(&path).unwrap();
        let result = check_config_file(&path);
        assert_eq!(result.status, CheckStatus::Ok);
        assert!(result.message.contains("custom.toml"));
    }

    #[test]
    fn test_mask_key() {
        assert_eq!(mask_key("short"), "*****");
        assert_eq!(mask_key("fc-1234567890abcdef"), "fc-1...cdef");
    }

    #[test]
    fn test_configured_key_is_ok() {
        let result = check_api_key("Key", Some("gsk_abcdefghijklmnop"), "ONBOARD_DOCTOR_UNSET");
        assert_eq!(result.status, CheckStatus::Ok);

        let result = check_api_key("Key", None, "ONBOARD_DOCTOR_UNSET");
        assert_eq!(result.status, CheckStatus::Error);
    }
}
