//! Validate configuration command.

use anyhow::Result;
use crossover_config::{AppConfig, ConfigError};
use std::path::Path;

pub fn run(config_path: &Path, loaded: Result<AppConfig, ConfigError>) -> Result<()> {
    println!("Validating configuration: {:?}", config_path);
    if !config_path.exists() {
        println!("File not found; using defaults and environment overrides.");
    }

    let config = match loaded {
        Ok(config) => config,
        Err(e) => {
            println!("Configuration error: {}", e);
            return Err(e.into());
        }
    };

    if let Err(e) = config.validate() {
        println!("Configuration error: {}", e);
        return Err(e.into());
    }

    let b = &config.backtest;
    let fmt_date = |d: Option<chrono::NaiveDate>| {
        d.map(|d| d.to_string()).unwrap_or_else(|| "unbounded".to_string())
    };

    println!("Configuration is valid!");
    println!();
    println!("App: {}", config.app.name);
    println!("Log level: {}", config.logging.level);
    println!("Symbol: {}", b.symbol);
    println!("Compare symbols: {}", b.compare_symbols.join(", "));
    println!("Period: {} to {}", fmt_date(b.from_date), fmt_date(b.to_date));
    println!("Budget: ${}", b.budget);
    println!("Windows: {} / {}", b.short_window, b.long_window);
    println!("Data path: {}", config.data.path);

    Ok(())
}
