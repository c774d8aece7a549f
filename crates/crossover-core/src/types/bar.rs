//! Daily price bars.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Uncleaned record as supplied by a data source.
///
/// The close may be missing (a gap in the feed) and the same date may appear
/// more than once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawBar {
    /// Trading day
    pub date: NaiveDate,
    /// Closing price, if the feed had one
    pub close: Option<Decimal>,
}

impl RawBar {
    /// Create a record with a known close.
    pub fn new(date: NaiveDate, close: Decimal) -> Self {
        Self {
            date,
            close: Some(close),
        }
    }

    /// Create a record whose close is missing.
    pub fn missing(date: NaiveDate) -> Self {
        Self { date, close: None }
    }
}

/// Cleaned daily bar. The close is always strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bar {
    /// Trading day
    pub date: NaiveDate,
    /// Closing price
    pub close: Decimal,
}

impl Bar {
    /// Create a new bar.
    pub fn new(date: NaiveDate, close: Decimal) -> Self {
        Self { date, close }
    }
}
