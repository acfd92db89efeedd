//! Onboard CLI entry point.

use anyhow::Result;
use clap::Parser;
use onboard::cli::{commands, Cli, Commands};
use onboard::config::Settings;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // API keys may live in a local .env file
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let config_path = cli.config_path();

    // Load configuration
    let settings = Settings::load_from(Some(&config_path))?;

    // Initialize logging
    let log_level = cli.log_level(&settings.general.log_level);

    tracing_subscriber::registry()
        .with(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("onboard={}", log_level)),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    // Execute command
    match &cli.command {
        Commands::Analyze {
            url,
            limit,
            no_scrape,
            no_crawl,
            output_dir,
            model,
        } => {
            commands::run_analyze(
                url,
                *limit,
                *no_scrape,
                *no_crawl,
                output_dir.clone(),
                model.clone(),
                settings,
            )
            .await?;
        }

        Commands::Merge { inputs, output } => {
            commands::run_merge(inputs, output.clone())?;
        }

        Commands::Doctor => {
            commands::run_doctor(&settings, &config_path)?;
        }

        Commands::Config { action } => {
            commands::run_config(action, settings, &config_path)?;
        }
    }

    Ok(())
}
