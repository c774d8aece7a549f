//! Backtesting engine.

use chrono::NaiveDate;
use crossover_core::error::{EngineError, EngineResult};
use crossover_core::types::{CleaningReport, PriceSeries, RawBar};
use crossover_signals::{SignalConfig, SignalDetector};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::report::BacktestReport;
use crate::simulator::TradeSimulator;
use crate::statistics::PerformanceEvaluator;

/// Backtest configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BacktestConfig {
    /// Symbol passed through to the data source
    pub symbol: String,
    /// First day of the test window
    pub from_date: Option<NaiveDate>,
    /// Last day of the test window
    pub to_date: Option<NaiveDate>,
    /// Initial cash
    pub budget: Decimal,
    /// Short moving average period
    pub short_window: usize,
    /// Long moving average period
    pub long_window: usize,
}

impl Default for BacktestConfig {
    fn default() -> Self {
        Self {
            symbol: "AAPL".to_string(),
            from_date: None,
            to_date: None,
            budget: dec!(5000),
            short_window: 50,
            long_window: 200,
        }
    }
}

impl BacktestConfig {
    /// Moving average windows as a detector config.
    pub fn signal_config(&self) -> SignalConfig {
        SignalConfig::new(self.short_window, self.long_window)
    }

    /// Check every constraint before any computation runs.
    pub fn validate(&self) -> EngineResult<()> {
        if self.budget <= Decimal::ZERO {
            return Err(EngineError::InvalidConfiguration(format!(
                "Budget must be positive, got {}",
                self.budget
            )));
        }
        if let (Some(from), Some(to)) = (self.from_date, self.to_date) {
            if from > to {
                return Err(EngineError::InvalidConfiguration(format!(
                    "Start date {} is after end date {}",
                    from, to
                )));
            }
        }
        self.signal_config().validate()
    }
}

/// Runs the clean → detect → simulate → evaluate pipeline.
pub struct BacktestEngine {
    config: BacktestConfig,
    detector: SignalDetector,
}

impl BacktestEngine {
    /// Create a new backtest engine. Fails on an invalid configuration.
    pub fn new(config: BacktestConfig) -> EngineResult<Self> {
        config.validate()?;
        let detector = SignalDetector::new(config.signal_config())?;
        Ok(Self { config, detector })
    }

    /// Engine configuration.
    pub fn config(&self) -> &BacktestConfig {
        &self.config
    }

    /// Run a backtest over raw records from a data source.
    pub fn run(&self, raw: Vec<RawBar>) -> EngineResult<BacktestReport> {
        let (series, cleaning) = PriceSeries::clean(self.config.symbol.clone(), raw)?;
        self.run_series(&series, cleaning)
    }

    /// Run a backtest over an already cleaned series.
    pub fn run_series(
        &self,
        series: &PriceSeries,
        cleaning: CleaningReport,
    ) -> EngineResult<BacktestReport> {
        info!(
            symbol = series.symbol(),
            bars = series.len(),
            budget = %self.config.budget,
            short_window = self.config.short_window,
            long_window = self.config.long_window,
            "Starting backtest"
        );

        let frame = self.detector.detect(series);
        let outcome = TradeSimulator::run(self.config.budget, &frame)?;
        let summary = PerformanceEvaluator::evaluate(
            self.config.budget,
            &outcome.ledger,
            series,
            &outcome.equity_curve,
        );

        info!(
            symbol = series.symbol(),
            trades = summary.trade_count,
            final_value = %summary.final_value,
            return_pct = %summary.return_pct.round_dp(2),
            buy_hold_pct = %summary.buy_hold_pct.round_dp(2),
            "Backtest complete"
        );

        Ok(BacktestReport {
            config: BacktestConfig {
                symbol: series.symbol().to_string(),
                ..self.config.clone()
            },
            first_date: series.first().date,
            last_date: series.last().date,
            cleaning,
            signals: frame.summary(),
            ledger: outcome.ledger,
            equity_curve: outcome.equity_curve,
            skipped_entries: outcome.skipped_entries,
            summary,
        })
    }
}
