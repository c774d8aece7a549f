//! Compare command: many symbols and periods, run concurrently.

use anyhow::{Context, Result};
use crossover_backtest::{BacktestEngine, BacktestReport, ComparisonReport};
use crossover_config::AppConfig;
use crossover_core::traits::DataSource;
use crossover_data::CsvDataSource;
use std::path::PathBuf;
use tokio::task::JoinSet;
use tracing::info;

use crate::cli::CompareArgs;

pub async fn run(args: CompareArgs, config: AppConfig) -> Result<()> {
    let settings = args.run.apply(&config.backtest);
    let symbols = if args.symbols.is_empty() {
        settings.compare_symbols.clone()
    } else {
        args.symbols.clone()
    };
    if symbols.is_empty() {
        anyhow::bail!("No symbols to compare. Pass --symbols or set backtest.compare_symbols");
    }

    // One entry per symbol × period; no periods means the configured range
    let periods: Vec<Option<crate::cli::Period>> = if args.periods.is_empty() {
        vec![None]
    } else {
        args.periods.iter().cloned().map(Some).collect()
    };

    let data_path = args
        .run
        .data
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.data.path));
    let source = CsvDataSource::new(&data_path)
        .with_context(|| format!("Data path '{}' does not exist", data_path.display()))?;

    let mut tasks = JoinSet::new();
    let mut index = 0usize;
    for symbol in &symbols {
        for period in &periods {
            let mut backtest_config = settings.to_backtest_config(symbol);
            let label = match period {
                Some(p) => {
                    backtest_config.from_date = Some(p.from);
                    backtest_config.to_date = Some(p.to);
                    format!("{} {}", symbol, p.label())
                }
                None => symbol.clone(),
            };

            // Each run owns its engine, series and simulation state
            let engine = BacktestEngine::new(backtest_config)
                .context("Invalid backtest configuration")?;
            let source = source.clone();
            let position = index;
            index += 1;

            tasks.spawn(async move {
                let result = run_one(engine, source).await;
                (position, label, result)
            });
        }
    }

    info!(runs = index, "Running comparison");

    let mut results = Vec::with_capacity(index);
    while let Some(joined) = tasks.join_next().await {
        results.push(joined?);
    }
    results.sort_by_key(|(position, _, _)| *position);

    let mut comparison = ComparisonReport::new();
    for (_, label, result) in results {
        match result {
            Ok(report) => comparison.push_report(label, &report),
            Err(e) => comparison.push_failure(label, format!("{:#}", e)),
        }
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&comparison)?);
    } else {
        println!("{}", comparison.summary());
    }

    Ok(())
}

async fn run_one(engine: BacktestEngine, source: CsvDataSource) -> Result<BacktestReport> {
    let config = engine.config().clone();
    let raw = source
        .get_historical_bars(&config.symbol, config.from_date, config.to_date)
        .await?;

    // The engine is synchronous; keep it off the async worker threads
    let report = tokio::task::spawn_blocking(move || engine.run(raw)).await??;
    Ok(report)
}
