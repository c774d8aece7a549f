//! Moving average state and crossover signals.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Short and long moving averages at one bar.
///
/// Either side is `None` while its lookback window is not yet filled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovingAverageState {
    /// Short-window average
    pub short: Option<Decimal>,
    /// Long-window average
    pub long: Option<Decimal>,
}

impl MovingAverageState {
    /// Create a new state.
    pub fn new(short: Option<Decimal>, long: Option<Decimal>) -> Self {
        Self { short, long }
    }

    /// Both averages, if both are defined.
    pub fn both(&self) -> Option<(Decimal, Decimal)> {
        Some((self.short?, self.long?))
    }
}

/// Crossover classification of a single bar.
///
/// A bar is only evaluable when both averages are defined for it and for the
/// bar before it. Golden and death crosses cannot both hold on one bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CrossSignal {
    /// Not enough history to compare this bar with the previous one
    NotEvaluable,
    /// Evaluable, no crossing
    Hold,
    /// Short average crossed above the long average
    GoldenCross,
    /// Short average crossed below the long average
    DeathCross,
}

impl CrossSignal {
    /// Classify a bar from the current and previous average states.
    pub fn classify(current: &MovingAverageState, previous: &MovingAverageState) -> Self {
        match (current.both(), previous.both()) {
            (Some((short, long)), Some((prev_short, prev_long))) => {
                if short > long && prev_short <= prev_long {
                    CrossSignal::GoldenCross
                } else if short < long && prev_short >= prev_long {
                    CrossSignal::DeathCross
                } else {
                    CrossSignal::Hold
                }
            }
            _ => CrossSignal::NotEvaluable,
        }
    }

    /// Check if the bar can be evaluated.
    #[inline]
    pub fn is_evaluable(&self) -> bool {
        !matches!(self, CrossSignal::NotEvaluable)
    }

    /// Golden cross flag, `None` when not evaluable.
    pub fn golden_cross(&self) -> Option<bool> {
        self.is_evaluable()
            .then_some(matches!(self, CrossSignal::GoldenCross))
    }

    /// Death cross flag, `None` when not evaluable.
    pub fn death_cross(&self) -> Option<bool> {
        self.is_evaluable()
            .then_some(matches!(self, CrossSignal::DeathCross))
    }
}

impl fmt::Display for CrossSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CrossSignal::NotEvaluable => "not evaluable",
            CrossSignal::Hold => "hold",
            CrossSignal::GoldenCross => "golden cross",
            CrossSignal::DeathCross => "death cross",
        };
        write!(f, "{}", s)
    }
}
