//! Crossover backtester CLI application.

mod cli;
mod logging;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use crossover_config::load_config;
use logging::{setup_logging, LogFormat};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let loaded = load_config(&cli.config);

    // Setup logging; command-line flags win over the config file
    let logging = loaded
        .as_ref()
        .map(|c| c.logging.clone())
        .unwrap_or_default();
    let log_level = match cli.log_level {
        Some(level) => level.as_str().to_string(),
        None => logging.level,
    };
    let format = if cli.json_logs {
        LogFormat::Json
    } else {
        LogFormat::from_setting(&logging.format)
    };
    setup_logging(&log_level, format);

    // Execute command
    match cli.command {
        Commands::Backtest(args) => {
            let config = loaded.with_context(|| format!("Failed to load {:?}", cli.config))?;
            cli::commands::backtest::run(args, config).await
        }
        Commands::Compare(args) => {
            let config = loaded.with_context(|| format!("Failed to load {:?}", cli.config))?;
            cli::commands::compare::run(args, config).await
        }
        Commands::ValidateConfig => cli::commands::validate::run(&cli.config, loaded),
        Commands::InitConfig(args) => cli::commands::init_config::run(args),
    }
}
