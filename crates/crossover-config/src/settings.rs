//! Configuration structures.

use chrono::NaiveDate;
use crossover_backtest::BacktestConfig;
use crossover_core::error::EngineResult;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub app: AppSettings,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub backtest: BacktestSettings,
    #[serde(default)]
    pub data: DataSettings,
}

impl AppConfig {
    /// Check the backtest section against the engine's constraints.
    pub fn validate(&self) -> EngineResult<()> {
        self.backtest.to_backtest_config(&self.backtest.symbol).validate()
    }

    /// Render as TOML.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

/// General app settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub name: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            name: "crossover".to_string(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// `pretty`, `compact` or `json`
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

/// Backtest settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BacktestSettings {
    pub symbol: String,
    /// Symbols used by `compare` when none are given on the command line
    pub compare_symbols: Vec<String>,
    pub from_date: Option<NaiveDate>,
    pub to_date: Option<NaiveDate>,
    pub budget: Decimal,
    pub short_window: usize,
    pub long_window: usize,
}

impl Default for BacktestSettings {
    fn default() -> Self {
        let defaults = BacktestConfig::default();
        Self {
            symbol: defaults.symbol,
            compare_symbols: ["AAPL", "MSFT", "GOOGL", "TSLA", "AMZN"]
                .into_iter()
                .map(String::from)
                .collect(),
            from_date: defaults.from_date,
            to_date: defaults.to_date,
            budget: dec!(5000),
            short_window: defaults.short_window,
            long_window: defaults.long_window,
        }
    }
}

impl BacktestSettings {
    /// Engine configuration for one symbol.
    pub fn to_backtest_config(&self, symbol: &str) -> BacktestConfig {
        BacktestConfig {
            symbol: symbol.to_string(),
            from_date: self.from_date,
            to_date: self.to_date,
            budget: self.budget,
            short_window: self.short_window,
            long_window: self.long_window,
        }
    }
}

/// Data source settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DataSettings {
    /// CSV file, or directory of `{symbol}.csv` files
    pub path: String,
}

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            path: "data".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.backtest.budget, dec!(5000));
    }

    #[test]
    fn test_invalid_windows() {
        let mut config = AppConfig::default();
        config.backtest.short_window = 200;
        config.backtest.long_window = 50;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_negative_budget() {
        let mut config = AppConfig::default();
        config.backtest.budget = dec!(-1);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_to_backtest_config() {
        let settings = BacktestSettings {
            from_date: NaiveDate::from_ymd_opt(2018, 1, 1),
            ..Default::default()
        };
        let config = settings.to_backtest_config("TSLA");

        assert_eq!(config.symbol, "TSLA");
        assert_eq!(config.from_date, settings.from_date);
        assert_eq!(config.long_window, 200);
    }
}
