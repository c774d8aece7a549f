//! CLI definitions.

pub mod commands;

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use crossover_config::BacktestSettings;
use rust_decimal::Decimal;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "crossover")]
#[command(author, version, about = "Golden cross / death cross backtester")]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: PathBuf,

    /// Log level (defaults to the config file's logging.level)
    #[arg(short, long)]
    pub log_level: Option<LogLevel>,

    /// Enable JSON log format
    #[arg(long)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Backtest one symbol
    Backtest(BacktestArgs),
    /// Backtest several symbols and/or periods and rank the results
    Compare(CompareArgs),
    /// Validate configuration
    ValidateConfig,
    /// Write a configuration file with default values
    InitConfig(InitConfigArgs),
}

/// Overrides shared by every command that runs the engine.
#[derive(clap::Args)]
pub struct RunArgs {
    /// Start date (YYYY-MM-DD), inclusive
    #[arg(long)]
    pub from: Option<NaiveDate>,

    /// End date (YYYY-MM-DD), inclusive
    #[arg(long)]
    pub to: Option<NaiveDate>,

    /// Initial cash
    #[arg(long)]
    pub budget: Option<Decimal>,

    /// Short moving average window
    #[arg(long)]
    pub short_window: Option<usize>,

    /// Long moving average window
    #[arg(long)]
    pub long_window: Option<usize>,

    /// Data file or directory (CSV)
    #[arg(long)]
    pub data: Option<PathBuf>,
}

impl RunArgs {
    /// Apply command-line overrides to the configured settings.
    pub fn apply(&self, settings: &BacktestSettings) -> BacktestSettings {
        BacktestSettings {
            from_date: self.from.or(settings.from_date),
            to_date: self.to.or(settings.to_date),
            budget: self.budget.unwrap_or(settings.budget),
            short_window: self.short_window.unwrap_or(settings.short_window),
            long_window: self.long_window.unwrap_or(settings.long_window),
            ..settings.clone()
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Csv,
}

#[derive(clap::Args)]
pub struct BacktestArgs {
    /// Symbol to backtest (defaults to backtest.symbol)
    #[arg(short, long)]
    pub symbol: Option<String>,

    #[command(flatten)]
    pub run: RunArgs,

    /// Output format
    #[arg(long, default_value = "text")]
    pub output: OutputFormat,

    /// Save the full report as JSON
    #[arg(long)]
    pub save: Option<PathBuf>,

    /// Save the equity curve as CSV
    #[arg(long)]
    pub equity_csv: Option<PathBuf>,
}

/// A named date range, written `FROM:TO`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Period {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl Period {
    pub fn label(&self) -> String {
        format!("{}..{}", self.from, self.to)
    }
}

fn parse_period(s: &str) -> Result<Period, String> {
    let (from, to) = s
        .split_once(':')
        .ok_or_else(|| format!("expected FROM:TO, got '{}'", s))?;
    let from = from
        .trim()
        .parse::<NaiveDate>()
        .map_err(|e| format!("invalid start date '{}': {}", from, e))?;
    let to = to
        .trim()
        .parse::<NaiveDate>()
        .map_err(|e| format!("invalid end date '{}': {}", to, e))?;
    Ok(Period { from, to })
}

#[derive(clap::Args)]
pub struct CompareArgs {
    /// Symbols to compare, comma-separated (defaults to backtest.compare_symbols)
    #[arg(short = 'S', long, value_delimiter = ',')]
    pub symbols: Vec<String>,

    /// Date ranges to compare, comma-separated FROM:TO pairs
    #[arg(short, long, value_delimiter = ',', value_parser = parse_period)]
    pub periods: Vec<Period>,

    #[command(flatten)]
    pub run: RunArgs,

    /// Print the comparison as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(clap::Args)]
pub struct InitConfigArgs {
    /// Where to write the file
    #[arg(default_value = "config/default.toml")]
    pub path: PathBuf,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}
