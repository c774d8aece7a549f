//! Backtest report generation.

use chrono::NaiveDate;
use crossover_core::types::{CleaningReport, TradeLedger};
use crossover_signals::SignalSummary;
use serde::{Deserialize, Serialize};

use crate::simulator::EquityPoint;
use crate::{BacktestConfig, PerformanceSummary};

const RULE: &str = "═══════════════════════════════════════════════════════════\n";
const THIN_RULE: &str = "───────────────────────────────────────────────────────────\n";

/// Complete backtest report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacktestReport {
    /// Configuration used
    pub config: BacktestConfig,
    /// First bar of the cleaned series
    pub first_date: NaiveDate,
    /// Last bar of the cleaned series
    pub last_date: NaiveDate,
    /// Data cleaning counts
    pub cleaning: CleaningReport,
    /// Indicator coverage and crossings
    pub signals: SignalSummary,
    /// All trades
    pub ledger: TradeLedger,
    /// Equity after every bar
    pub equity_curve: Vec<EquityPoint>,
    /// Golden crosses that could not afford a share
    pub skipped_entries: usize,
    /// Performance figures
    pub summary: PerformanceSummary,
}

impl BacktestReport {
    /// Generate a text summary.
    pub fn summary(&self) -> String {
        let p = &self.summary;
        let mut s = String::new();

        s.push_str(RULE);
        s.push_str("                     BACKTEST REPORT                        \n");
        s.push_str(RULE);
        s.push('\n');

        s.push_str(&format!("  Symbol:              {}\n", self.config.symbol));
        s.push_str(&format!(
            "  Period:              {} to {}\n",
            self.first_date, self.last_date
        ));
        s.push_str(&format!(
            "  Windows:             {} / {}\n",
            self.config.short_window, self.config.long_window
        ));
        s.push('\n');

        s.push_str("DATA\n");
        s.push_str(THIN_RULE);
        s.push_str(&format!(
            "  Duplicates Removed:  {}\n",
            self.cleaning.duplicates_removed
        ));
        s.push_str(&format!(
            "  Forward Filled:      {}\n",
            self.cleaning.forward_filled
        ));
        s.push_str(&format!(
            "  Leading Gaps:        {}\n",
            self.cleaning.leading_gaps_dropped
        ));
        s.push_str(&format!(
            "  Final Rows:          {}\n",
            self.cleaning.final_rows
        ));
        s.push_str(&format!(
            "  Golden Crosses:      {}\n",
            self.signals.golden_crosses
        ));
        s.push_str(&format!(
            "  Death Crosses:       {}\n",
            self.signals.death_crosses
        ));
        s.push('\n');

        s.push_str("PERFORMANCE\n");
        s.push_str(THIN_RULE);
        if !p.has_trades() {
            s.push_str("  No trades executed.\n");
        }
        s.push_str(&format!("  Initial Budget:      ${:.2}\n", p.initial_budget));
        s.push_str(&format!("  Final Value:         ${:.2}\n", p.final_value));
        s.push_str(&format!("  Total Return:        ${:.2}\n", p.total_return));
        s.push_str(&format!("  Return Percentage:   {:.2}%\n", p.return_pct));
        s.push_str(&format!("  Number of Trades:    {}\n", p.trade_count));
        s.push_str(&format!("  Max Drawdown:        {:.2}%\n", p.max_drawdown_pct));
        if p.has_trades() {
            let verdict = if p.is_profitable() { "PROFIT" } else { "LOSS" };
            s.push_str(&format!("  Result:              {}\n", verdict));
        }
        s.push('\n');

        s.push_str("BUY & HOLD COMPARISON\n");
        s.push_str(THIN_RULE);
        s.push_str(&format!("  Buy & Hold Value:    ${:.2}\n", p.buy_hold_value));
        s.push_str(&format!(
            "  Buy & Hold Return:   ${:.2} ({:.2}%)\n",
            p.buy_hold_return, p.buy_hold_pct
        ));
        s.push_str(&format!("  Strategy vs B&H:     ${:.2}\n", p.strategy_edge));
        s.push('\n');

        s.push_str("ROUND TRIPS\n");
        s.push_str(THIN_RULE);
        s.push_str(&format!("  Completed:           {}\n", p.round_trips));
        s.push_str(&format!("  Winning:             {}\n", p.winning_trips));
        s.push_str(&format!("  Losing:              {}\n", p.losing_trips));
        s.push_str(&format!("  Win Rate:            {:.2}%\n", p.win_rate_pct));
        s.push('\n');

        s.push_str(RULE);

        s
    }

    /// Generate the trade history table.
    pub fn trade_history(&self) -> String {
        if self.ledger.is_empty() {
            return "No trades to display.\n".to_string();
        }

        let mut s = String::new();
        s.push_str(&format!(
            "{:<12} {:<12} {:>8} {:>10} {:>14} {:>14}\n",
            "Date", "Action", "Shares", "Price", "Total", "Cash After"
        ));
        s.push_str(THIN_RULE);
        for trade in &self.ledger {
            s.push_str(&format!(
                "{:<12} {:<12} {:>8} {:>10.2} {:>14.2} {:>14.2}\n",
                trade.date.to_string(),
                trade.action.to_string(),
                trade.shares,
                trade.price,
                trade.notional,
                trade.cash_after
            ));
        }
        s
    }

    /// Export to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Export the trade ledger to CSV.
    pub fn ledger_to_csv(&self) -> Result<String, csv::Error> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        for trade in &self.ledger {
            writer.serialize(trade)?;
        }
        let bytes = writer.into_inner().map_err(|e| e.into_error())?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Export the equity curve to CSV.
    pub fn equity_to_csv(&self) -> Result<String, csv::Error> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        for point in &self.equity_curve {
            writer.serialize(point)?;
        }
        let bytes = writer.into_inner().map_err(|e| e.into_error())?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}
