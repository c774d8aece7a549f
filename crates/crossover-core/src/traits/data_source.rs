//! Data source trait definitions.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::error::DataError;
use crate::types::RawBar;

/// Trait for historical daily price sources.
///
/// Implementations own retry and timeout behaviour against their backing
/// store; the engine only sees the records they return.
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Fetch daily records for a symbol.
    ///
    /// # Arguments
    /// * `symbol` - The symbol to fetch
    /// * `from` - First day to include, unbounded when `None`
    /// * `to` - Last day to include, unbounded when `None`
    ///
    /// # Returns
    /// Raw records ordered from oldest to newest. Records may still contain
    /// duplicates or missing closes.
    async fn get_historical_bars(
        &self,
        symbol: &str,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<Vec<RawBar>, DataError>;

    /// Get the data source name.
    fn name(&self) -> &str;
}
