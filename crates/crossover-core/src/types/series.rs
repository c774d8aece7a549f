//! Cleaned, chronologically ordered price series.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{Bar, RawBar};
use crate::error::{DataError, EngineError, EngineResult};

/// Counts collected while cleaning raw records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleaningReport {
    /// Records received from the data source
    pub raw_rows: usize,
    /// Rows dropped because their date was already present
    pub duplicates_removed: usize,
    /// Missing closes filled from the previous bar
    pub forward_filled: usize,
    /// Leading rows with no prior close to fill from
    pub leading_gaps_dropped: usize,
    /// Bars in the resulting series
    pub final_rows: usize,
}

/// Ordered sequence of daily bars with strictly increasing, unique dates.
///
/// A series is built once and is read-only afterwards; it is never empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceSeries {
    symbol: String,
    bars: Vec<Bar>,
}

impl PriceSeries {
    /// Build a series from bars that are already clean.
    ///
    /// Fails with [`EngineError::EmptySeries`] when `bars` is empty and with a
    /// data error when dates are not strictly increasing or a close is not
    /// positive.
    pub fn new(symbol: impl Into<String>, bars: Vec<Bar>) -> EngineResult<Self> {
        if bars.is_empty() {
            return Err(EngineError::EmptySeries);
        }
        for pair in bars.windows(2) {
            if pair[1].date <= pair[0].date {
                return Err(DataError::OutOfOrder(pair[1].date).into());
            }
        }
        if let Some(bad) = bars.iter().find(|b| b.close <= Decimal::ZERO) {
            return Err(DataError::ParseError(format!(
                "non-positive close {} on {}",
                bad.close, bad.date
            ))
            .into());
        }
        Ok(Self {
            symbol: symbol.into(),
            bars,
        })
    }

    /// Clean raw records into a series.
    ///
    /// Records are sorted by date, repeated dates collapse to one row (the
    /// first row with a usable close wins), missing or non-positive closes
    /// are forward-filled, and leading rows with nothing to fill from are
    /// dropped.
    pub fn clean(
        symbol: impl Into<String>,
        mut raw: Vec<RawBar>,
    ) -> EngineResult<(Self, CleaningReport)> {
        let symbol = symbol.into();
        let mut report = CleaningReport {
            raw_rows: raw.len(),
            ..Default::default()
        };

        // Stable sort keeps feed order within a date
        raw.sort_by_key(|r| r.date);

        let mut deduped: Vec<RawBar> = Vec::with_capacity(raw.len());
        for record in raw {
            let close = record.close.filter(|c| *c > Decimal::ZERO);
            match deduped.last_mut() {
                Some(last) if last.date == record.date => {
                    report.duplicates_removed += 1;
                    if last.close.is_none() {
                        last.close = close;
                    }
                }
                _ => deduped.push(RawBar {
                    date: record.date,
                    close,
                }),
            }
        }

        let mut bars = Vec::with_capacity(deduped.len());
        let mut last_close: Option<Decimal> = None;
        for record in deduped {
            match (record.close, last_close) {
                (Some(close), _) => {
                    last_close = Some(close);
                    bars.push(Bar::new(record.date, close));
                }
                (None, Some(prev)) => {
                    report.forward_filled += 1;
                    bars.push(Bar::new(record.date, prev));
                }
                (None, None) => report.leading_gaps_dropped += 1,
            }
        }
        report.final_rows = bars.len();

        debug!(
            symbol = %symbol,
            raw_rows = report.raw_rows,
            duplicates_removed = report.duplicates_removed,
            forward_filled = report.forward_filled,
            leading_gaps_dropped = report.leading_gaps_dropped,
            final_rows = report.final_rows,
            "Cleaned price data"
        );

        if bars.is_empty() {
            return Err(EngineError::EmptySeries);
        }

        Ok((Self { symbol, bars }, report))
    }

    /// Symbol the series belongs to.
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Number of bars.
    #[inline]
    pub fn len(&self) -> usize {
        self.bars.len()
    }

    /// Always false for a constructed series.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// All bars, oldest first.
    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    /// First (oldest) bar.
    pub fn first(&self) -> &Bar {
        &self.bars[0]
    }

    /// Last (newest) bar.
    pub fn last(&self) -> &Bar {
        &self.bars[self.bars.len() - 1]
    }

    /// Extract close prices as a vector.
    pub fn closes(&self) -> Vec<Decimal> {
        self.bars.iter().map(|b| b.close).collect()
    }

    /// Get an iterator over the bars.
    pub fn iter(&self) -> impl Iterator<Item = &Bar> {
        self.bars.iter()
    }
}
