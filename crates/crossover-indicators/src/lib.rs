//! Technical indicators over decimal closing prices.
//!
//! Prices are kept as `Decimal` end to end so that averages over a flat
//! series are exactly equal and never produce spurious crossings.

pub mod moving_average;

pub use moving_average::Sma;
