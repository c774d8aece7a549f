//! Crossover signal detection.
//!
//! Computes a short and a long simple moving average over a price series
//! and classifies every bar as a golden cross, death cross, plain hold, or
//! not yet evaluable.

mod detector;

pub use detector::{SignalConfig, SignalDetector, SignalFrame, SignalPoint, SignalSummary};
