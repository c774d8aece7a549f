//! Data sources for historical daily prices.

mod csv_source;

pub use csv_source::CsvDataSource;

use chrono::NaiveDate;
use crossover_core::error::DataError;
use crossover_core::traits::DataSource;
use crossover_core::types::RawBar;
use std::path::Path;

/// Load raw records for a symbol from a CSV file or directory.
pub async fn load_csv(
    path: impl AsRef<Path>,
    symbol: &str,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> Result<Vec<RawBar>, DataError> {
    let source = CsvDataSource::new(path)?;
    source.get_historical_bars(symbol, from, to).await
}
