//! Core types and traits for the crossover backtester.
//!
//! This crate provides the foundational building blocks including:
//! - Price data types (RawBar, Bar, PriceSeries)
//! - Moving average state and crossover signals
//! - Trade records and the trade ledger
//! - Core traits for indicators and data sources

pub mod types;
pub mod traits;
pub mod error;

pub use error::{EngineError, EngineResult};
pub use types::*;
pub use traits::*;
