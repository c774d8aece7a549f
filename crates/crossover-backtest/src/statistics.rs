//! Performance evaluation.

use crossover_core::types::{PriceSeries, TradeLedger};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::simulator::EquityPoint;

/// Strategy performance against a buy-and-hold benchmark.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerformanceSummary {
    /// Starting cash
    pub initial_budget: Decimal,
    /// Cash after the ledger is replayed
    pub final_value: Decimal,
    /// final_value - initial_budget
    pub total_return: Decimal,
    /// Total return as a percentage of the budget
    pub return_pct: Decimal,
    /// Number of trades in the ledger
    pub trade_count: usize,
    /// Value of the budget invested at the first close and held to the last
    pub buy_hold_value: Decimal,
    /// Benchmark profit or loss
    pub buy_hold_return: Decimal,
    /// Benchmark return percentage
    pub buy_hold_pct: Decimal,
    /// total_return - buy_hold_return
    pub strategy_edge: Decimal,
    /// Completed entry/exit pairs
    pub round_trips: usize,
    /// Round trips closed at a profit
    pub winning_trips: usize,
    /// Round trips closed at a loss
    pub losing_trips: usize,
    /// Winning trips as a percentage of all round trips
    pub win_rate_pct: Decimal,
    /// Largest peak-to-trough decline of the equity curve
    pub max_drawdown_pct: Decimal,
}

impl PerformanceSummary {
    /// Summary of a run that never traded. Cash is untouched and every
    /// return figure is zero.
    pub fn degenerate(initial_budget: Decimal) -> Self {
        Self {
            initial_budget,
            final_value: initial_budget,
            total_return: Decimal::ZERO,
            return_pct: Decimal::ZERO,
            trade_count: 0,
            buy_hold_value: Decimal::ZERO,
            buy_hold_return: Decimal::ZERO,
            buy_hold_pct: Decimal::ZERO,
            strategy_edge: Decimal::ZERO,
            round_trips: 0,
            winning_trips: 0,
            losing_trips: 0,
            win_rate_pct: Decimal::ZERO,
            max_drawdown_pct: Decimal::ZERO,
        }
    }

    /// Check if any trade was executed.
    pub fn has_trades(&self) -> bool {
        self.trade_count > 0
    }

    /// Check if the strategy made money.
    pub fn is_profitable(&self) -> bool {
        self.total_return > Decimal::ZERO
    }
}

/// Computes a [`PerformanceSummary`] from a finished simulation.
pub struct PerformanceEvaluator;

impl PerformanceEvaluator {
    /// Evaluate a ledger over the series it was produced from.
    pub fn evaluate(
        initial_budget: Decimal,
        ledger: &TradeLedger,
        series: &PriceSeries,
        equity_curve: &[EquityPoint],
    ) -> PerformanceSummary {
        let Some(last_trade) = ledger.last() else {
            return PerformanceSummary::degenerate(initial_budget);
        };

        // The ledger always closes flat, so the last balance is all cash
        let final_value = last_trade.cash_after;
        let total_return = final_value - initial_budget;

        let buy_hold_shares = initial_budget / series.first().close;
        let buy_hold_value = buy_hold_shares * series.last().close;
        let buy_hold_return = buy_hold_value - initial_budget;

        let trips = ledger.round_trips();
        let winning_trips = trips.iter().filter(|t| t.pnl() > Decimal::ZERO).count();
        let losing_trips = trips.iter().filter(|t| t.pnl() < Decimal::ZERO).count();
        let win_rate_pct = if trips.is_empty() {
            Decimal::ZERO
        } else {
            Decimal::from(winning_trips as u64) * dec!(100) / Decimal::from(trips.len() as u64)
        };

        PerformanceSummary {
            initial_budget,
            final_value,
            total_return,
            return_pct: percent_of(total_return, initial_budget),
            trade_count: ledger.len(),
            buy_hold_value,
            buy_hold_return,
            buy_hold_pct: percent_of(buy_hold_return, initial_budget),
            strategy_edge: total_return - buy_hold_return,
            round_trips: trips.len(),
            winning_trips,
            losing_trips,
            win_rate_pct,
            max_drawdown_pct: max_drawdown_pct(equity_curve),
        }
    }
}

fn percent_of(value: Decimal, base: Decimal) -> Decimal {
    if base.is_zero() {
        Decimal::ZERO
    } else {
        value / base * dec!(100)
    }
}

fn max_drawdown_pct(curve: &[EquityPoint]) -> Decimal {
    let mut peak = Decimal::ZERO;
    let mut max_drawdown = Decimal::ZERO;

    for point in curve {
        if point.equity > peak {
            peak = point.equity;
        }
        if peak > Decimal::ZERO {
            let drawdown = (peak - point.equity) / peak * dec!(100);
            if drawdown > max_drawdown {
                max_drawdown = drawdown;
            }
        }
    }

    max_drawdown
}
