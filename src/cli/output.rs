//! CLI output formatting utilities.

use crate::record::CombinedRecord;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

/// Output helper for CLI formatting.
pub struct Output;

impl Output {
    /// Print an info message.
    pub fn info(msg: &str) {
        println!("{} {}", style(">>").cyan().bold(), msg);
    }

    /// Print a success message.
    pub fn success(msg: &str) {
        println!("{} {}", style(">>").green().bold(), msg);
    }

    /// Print a warning message.
    pub fn warning(msg: &str) {
        eprintln!("{} {}", style(">>").yellow().bold(), msg);
    }

    /// Print an error message.
    pub fn error(msg: &str) {
        eprintln!("{} {}", style(">>").red().bold(), msg);
    }

    /// Print a header.
    pub fn header(msg: &str) {
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print a key-value pair.
    pub fn kv(key: &str, value: &str) {
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Print the summary block for one business.
    pub fn business_summary(name: &str, record: &CombinedRecord) {
        println!("\n{} {}", style("*").cyan(), style(name).bold());

        let dash = || "-".to_string();
        let or_dash = |s: &str| if s.is_empty() { dash() } else { s.to_string() };

        Output::kv("Sector", &or_dash(&record.company_info.sector));
        Output::kv("Email", &or_dash(&record.contact.email));
        Output::kv("Phone", &or_dash(&record.contact.phone));
        Output::kv(
            "Address",
            &record
                .primary_location()
                .map(|l| l.address.one_line())
                .unwrap_or_else(dash),
        );
        Output::kv("Locations", &record.locations.len().to_string());
        Output::kv("Opening hours entries", &record.hours_count().to_string());
        Output::kv(
            "Extra info lines",
            &record.extra_info.lines().count().to_string(),
        );
    }

    /// Create a spinner.
    pub fn spinner(msg: &str) -> ProgressBar {
        let pb = ProgressBar::new_spinner();
        if let Ok(spinner_style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            pb.set_style(spinner_style);
        }
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb
    }
}
