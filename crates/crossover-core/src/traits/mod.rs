//! Core traits for the backtester.

mod data_source;
mod indicator;

pub use data_source::DataSource;
pub use indicator::Indicator;
