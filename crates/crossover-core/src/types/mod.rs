//! Core data types for the backtester.

mod bar;
mod series;
mod signal;
mod trade;

pub use bar::{Bar, RawBar};
pub use series::{CleaningReport, PriceSeries};
pub use signal::{CrossSignal, MovingAverageState};
pub use trade::{RoundTrip, Trade, TradeAction, TradeLedger};
