//! Dual moving average crossover detector.
//!
//! Flags a golden cross when the short MA crosses above the long MA,
//! and a death cross when the short MA crosses below the long MA.

use chrono::NaiveDate;
use crossover_core::error::{EngineError, EngineResult};
use crossover_core::traits::Indicator;
use crossover_core::types::{CrossSignal, MovingAverageState, PriceSeries};
use crossover_indicators::Sma;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Moving average windows for the detector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalConfig {
    /// Short moving average period
    pub short_window: usize,
    /// Long moving average period
    pub long_window: usize,
}

impl Default for SignalConfig {
    fn default() -> Self {
        Self {
            short_window: 50,
            long_window: 200,
        }
    }
}

impl SignalConfig {
    /// Create a config with the given windows.
    pub fn new(short_window: usize, long_window: usize) -> Self {
        Self {
            short_window,
            long_window,
        }
    }

    /// Check the window constraints.
    pub fn validate(&self) -> EngineResult<()> {
        if self.short_window == 0 {
            return Err(EngineError::InvalidConfiguration(
                "Short window must be greater than 0".into(),
            ));
        }
        if self.short_window >= self.long_window {
            return Err(EngineError::InvalidConfiguration(format!(
                "Short window ({}) must be less than long window ({})",
                self.short_window, self.long_window
            )));
        }
        Ok(())
    }
}

/// Indicator values and classification for one bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalPoint {
    pub date: NaiveDate,
    pub close: Decimal,
    pub averages: MovingAverageState,
    pub signal: CrossSignal,
}

/// Counts reported after detection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalSummary {
    /// Bars with a defined short MA
    pub short_defined: usize,
    /// Bars with a defined long MA
    pub long_defined: usize,
    /// Golden crosses detected
    pub golden_crosses: usize,
    /// Death crosses detected
    pub death_crosses: usize,
}

/// Per-bar signal annotations, aligned one to one with the price series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalFrame {
    config: SignalConfig,
    points: Vec<SignalPoint>,
}

impl SignalFrame {
    /// Windows the frame was computed with.
    pub fn config(&self) -> SignalConfig {
        self.config
    }

    /// All points, oldest first.
    pub fn points(&self) -> &[SignalPoint] {
        &self.points
    }

    /// Number of points.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the frame is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Get an iterator over the points.
    pub fn iter(&self) -> impl Iterator<Item = &SignalPoint> {
        self.points.iter()
    }

    /// Summarize indicator coverage and crossings.
    pub fn summary(&self) -> SignalSummary {
        self.points
            .iter()
            .fold(SignalSummary::default(), |mut acc, point| {
                acc.short_defined += usize::from(point.averages.short.is_some());
                acc.long_defined += usize::from(point.averages.long.is_some());
                match point.signal {
                    CrossSignal::GoldenCross => acc.golden_crosses += 1,
                    CrossSignal::DeathCross => acc.death_crosses += 1,
                    CrossSignal::Hold | CrossSignal::NotEvaluable => {}
                }
                acc
            })
    }
}

/// Golden cross / death cross detector.
#[derive(Debug, Clone)]
pub struct SignalDetector {
    config: SignalConfig,
    short: Sma,
    long: Sma,
}

impl SignalDetector {
    /// Create a detector, validating its windows.
    pub fn new(config: SignalConfig) -> EngineResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            short: Sma::new(config.short_window)?,
            long: Sma::new(config.long_window)?,
        })
    }

    /// Detector configuration.
    pub fn config(&self) -> SignalConfig {
        self.config
    }

    /// Annotate every bar of the series. Pure and deterministic.
    pub fn detect(&self, series: &PriceSeries) -> SignalFrame {
        let closes = series.closes();
        let short = self.short.aligned(&closes);
        let long = self.long.aligned(&closes);

        let mut points = Vec::with_capacity(series.len());
        let mut previous = MovingAverageState::default();

        for ((bar, short), long) in series.iter().zip(short).zip(long) {
            let averages = MovingAverageState::new(short, long);
            let signal = CrossSignal::classify(&averages, &previous);
            points.push(SignalPoint {
                date: bar.date,
                close: bar.close,
                averages,
                signal,
            });
            previous = averages;
        }

        let frame = SignalFrame {
            config: self.config,
            points,
        };

        let summary = frame.summary();
        debug!(
            symbol = series.symbol(),
            short_window = self.config.short_window,
            long_window = self.config.long_window,
            short_defined = summary.short_defined,
            long_defined = summary.long_defined,
            golden_crosses = summary.golden_crosses,
            death_crosses = summary.death_crosses,
            "Detected crossover signals"
        );

        frame
    }
}
