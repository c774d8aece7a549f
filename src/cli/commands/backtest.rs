//! Backtest command implementation.

use anyhow::{Context, Result};
use crossover_backtest::BacktestEngine;
use crossover_config::AppConfig;
use crossover_core::traits::DataSource;
use crossover_data::CsvDataSource;
use std::path::PathBuf;
use tracing::info;

use crate::cli::{BacktestArgs, OutputFormat};

pub async fn run(args: BacktestArgs, config: AppConfig) -> Result<()> {
    let settings = args.run.apply(&config.backtest);
    let symbol = args.symbol.clone().unwrap_or_else(|| settings.symbol.clone());

    // Validate before touching any data
    let engine = BacktestEngine::new(settings.to_backtest_config(&symbol))
        .context("Invalid backtest configuration")?;

    let data_path = args
        .run
        .data
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.data.path));
    let source = CsvDataSource::new(&data_path).with_context(|| {
        format!(
            "Data path '{}' does not exist. Provide a CSV file or directory containing CSV files (e.g. --data ./data)",
            data_path.display()
        )
    })?;

    info!(
        symbol = %symbol,
        from = ?settings.from_date,
        to = ?settings.to_date,
        source = source.name(),
        "Loading data"
    );
    let raw = source
        .get_historical_bars(&symbol, settings.from_date, settings.to_date)
        .await
        .with_context(|| format!("Failed to load data for {}", symbol))?;

    let report = engine
        .run(raw)
        .with_context(|| format!("Backtest failed for {}", symbol))?;

    // Output results
    match args.output {
        OutputFormat::Json => println!("{}", report.to_json()?),
        OutputFormat::Csv => print!("{}", report.ledger_to_csv()?),
        OutputFormat::Text => {
            println!("{}", report.trade_history());
            println!("{}", report.summary());
        }
    }

    // Save if requested
    if let Some(save_path) = &args.save {
        std::fs::write(save_path, report.to_json()?)
            .with_context(|| format!("Failed to write {:?}", save_path))?;
        info!("Results saved to {:?}", save_path);
    }
    if let Some(equity_path) = &args.equity_csv {
        std::fs::write(equity_path, report.equity_to_csv()?)
            .with_context(|| format!("Failed to write {:?}", equity_path))?;
        info!("Equity curve saved to {:?}", equity_path);
    }

    Ok(())
}
