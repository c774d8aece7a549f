//! Multi-run comparison (several symbols or several periods).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use tracing::warn;

use crate::{BacktestReport, PerformanceSummary};

/// One successful run in a comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonEntry {
    /// Label shown in the table (symbol, period name, ...)
    pub label: String,
    pub symbol: String,
    pub summary: PerformanceSummary,
}

/// Side-by-side results of independent backtests.
///
/// A run that failed does not abort the comparison; it is listed with its
/// error instead.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComparisonReport {
    entries: Vec<ComparisonEntry>,
    failures: Vec<(String, String)>,
}

impl ComparisonReport {
    /// Create an empty comparison.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a finished run.
    pub fn push_report(&mut self, label: impl Into<String>, report: &BacktestReport) {
        self.entries.push(ComparisonEntry {
            label: label.into(),
            symbol: report.config.symbol.clone(),
            summary: report.summary.clone(),
        });
    }

    /// Record a run that failed.
    pub fn push_failure(&mut self, label: impl Into<String>, error: impl Display) {
        let label = label.into();
        warn!(label = %label, error = %error, "Backtest failed");
        self.failures.push((label, error.to_string()));
    }

    /// Failed runs as (label, error) pairs.
    pub fn failures(&self) -> &[(String, String)] {
        &self.failures
    }

    /// Successful runs, best return first. Ties keep insertion order.
    pub fn ranked(&self) -> Vec<&ComparisonEntry> {
        let mut ranked: Vec<&ComparisonEntry> = self.entries.iter().collect();
        ranked.sort_by(|a, b| b.summary.return_pct.cmp(&a.summary.return_pct));
        ranked
    }

    /// Run with the highest return percentage.
    pub fn best(&self) -> Option<&ComparisonEntry> {
        self.ranked().into_iter().next()
    }

    /// Check if no run succeeded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render the comparison table.
    pub fn summary(&self) -> String {
        let mut s = String::new();

        s.push_str("═══════════════════════════════════════════════════════════════════════════\n");
        s.push_str("                        PERFORMANCE COMPARISON\n");
        s.push_str("═══════════════════════════════════════════════════════════════════════════\n");
        s.push_str(&format!(
            "{:<32} {:>12} {:>9} {:>9} {:>7}\n",
            "Run", "Return", "Return %", "B&H %", "Trades"
        ));
        s.push_str("───────────────────────────────────────────────────────────────────────────\n");

        for entry in self.ranked() {
            let p = &entry.summary;
            s.push_str(&format!(
                "{:<32} {:>12.2} {:>8.2}% {:>8.2}% {:>7}\n",
                entry.label, p.total_return, p.return_pct, p.buy_hold_pct, p.trade_count
            ));
        }

        for (label, error) in &self.failures {
            s.push_str(&format!("{:<32} failed: {}\n", label, error));
        }

        if let Some(best) = self.best() {
            s.push('\n');
            s.push_str(&format!(
                "Best performer: {} with {:.2}% return\n",
                best.label,
                best.summary.return_pct.round_dp(2)
            ));
            s.push_str(&format!("Combined return: ${:.2}\n", self.combined_return()));
        }

        s
    }

    /// Sum of total returns across successful runs.
    pub fn combined_return(&self) -> Decimal {
        self.entries.iter().map(|e| e.summary.total_return).sum()
    }
}
