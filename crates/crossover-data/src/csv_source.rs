//! CSV data source.

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use crossover_core::error::DataError;
use crossover_core::traits::DataSource;
use crossover_core::types::RawBar;
use csv::ReaderBuilder;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

/// CSV record format. Only the date and close columns are read.
#[derive(Debug, Deserialize)]
struct CsvRecord {
    #[serde(alias = "Date", alias = "date", alias = "timestamp", alias = "Timestamp")]
    date: String,
    #[serde(alias = "Close", alias = "close", default)]
    close: Option<String>,
}

/// CSV data source for historical data.
///
/// The path may be a single file, used for any symbol, or a directory holding
/// one `{symbol}.csv` / `{symbol}_daily.csv` file per symbol.
#[derive(Debug, Clone)]
pub struct CsvDataSource {
    path: PathBuf,
}

impl CsvDataSource {
    /// Create a new CSV data source.
    pub fn new(path: impl AsRef<Path>) -> Result<Self, DataError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(DataError::NoDataAvailable);
        }
        Ok(Self {
            path: path.to_path_buf(),
        })
    }

    /// Locate the file holding a symbol's data.
    fn resolve(&self, symbol: &str) -> Result<PathBuf, DataError> {
        if self.path.is_file() {
            return Ok(self.path.clone());
        }

        let lower = symbol.to_lowercase();
        let candidates = [
            self.path.join(format!("{}.csv", symbol)),
            self.path.join(format!("{}.csv", lower)),
            self.path.join(format!("{}_daily.csv", symbol)),
            self.path.join(format!("{}_daily.csv", lower)),
        ];
        candidates
            .into_iter()
            .find(|p| p.is_file())
            .ok_or_else(|| DataError::SymbolNotFound(symbol.to_string()))
    }

    /// Parse CSV content into raw records, oldest first.
    fn parse(content: &str) -> Result<Vec<RawBar>, DataError> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(content.as_bytes());

        let mut bars = Vec::new();

        for result in reader.deserialize() {
            let record: CsvRecord = result.map_err(|e| DataError::ParseError(e.to_string()))?;

            bars.push(RawBar {
                date: parse_date(&record.date)?,
                close: parse_close(record.close.as_deref())?,
            });
        }

        // Sort by date; stable so duplicates keep file order
        bars.sort_by_key(|b| b.date);

        Ok(bars)
    }
}

#[async_trait]
impl DataSource for CsvDataSource {
    async fn get_historical_bars(
        &self,
        symbol: &str,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<Vec<RawBar>, DataError> {
        let path = self.resolve(symbol)?;
        let content = tokio::fs::read_to_string(&path).await?;

        let mut bars = Self::parse(&content)?;
        bars.retain(|b| from.map_or(true, |f| b.date >= f) && to.map_or(true, |t| b.date <= t));

        debug!(
            symbol,
            path = %path.display(),
            records = bars.len(),
            "Loaded CSV data"
        );

        Ok(bars)
    }

    fn name(&self) -> &str {
        "csv"
    }
}

/// Parse the date formats seen in exported price files.
fn parse_date(date_str: &str) -> Result<NaiveDate, DataError> {
    let formats = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d-%m-%Y"];
    for format in formats {
        if let Ok(d) = NaiveDate::parse_from_str(date_str, format) {
            return Ok(d);
        }
    }

    // Timestamps with a time of day, with or without a UTC offset
    if let Ok(dt) = NaiveDateTime::parse_from_str(date_str, "%Y-%m-%d %H:%M:%S") {
        return Ok(dt.date());
    }
    if let Ok(dt) = chrono::DateTime::parse_from_str(date_str, "%Y-%m-%d %H:%M:%S%:z") {
        return Ok(dt.date_naive());
    }

    Err(DataError::ParseError(format!(
        "Could not parse date: {}",
        date_str
    )))
}

/// Parse a close cell; blank and placeholder cells are missing values.
fn parse_close(cell: Option<&str>) -> Result<Option<Decimal>, DataError> {
    let Some(cell) = cell.map(str::trim) else {
        return Ok(None);
    };
    if cell.is_empty()
        || cell == "-"
        || cell.eq_ignore_ascii_case("nan")
        || cell.eq_ignore_ascii_case("null")
    {
        return Ok(None);
    }
    Decimal::from_str(cell)
        .or_else(|_| Decimal::from_scientific(cell))
        .map(Some)
        .map_err(|e| DataError::ParseError(format!("Invalid close '{}': {}", cell, e)))
}
