//! Trade records and the trade ledger.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Trade direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TradeAction {
    /// Entry on a golden cross
    Buy,
    /// Exit on a death cross
    Sell,
    /// Liquidation of an open position at the last bar
    ForcedSell,
}

impl TradeAction {
    /// Check if this action closes a position.
    #[inline]
    pub fn is_exit(&self) -> bool {
        matches!(self, TradeAction::Sell | TradeAction::ForcedSell)
    }
}

impl fmt::Display for TradeAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TradeAction::Buy => "BUY",
            TradeAction::Sell => "SELL",
            TradeAction::ForcedSell => "FORCED_SELL",
        };
        write!(f, "{}", s)
    }
}

/// A simulated fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trade {
    pub date: NaiveDate,
    pub action: TradeAction,
    pub shares: u64,
    pub price: Decimal,
    /// shares × price
    pub notional: Decimal,
    /// Cash balance once the trade settled
    pub cash_after: Decimal,
}

impl Trade {
    /// Create a trade, computing its notional.
    pub fn new(
        date: NaiveDate,
        action: TradeAction,
        shares: u64,
        price: Decimal,
        cash_after: Decimal,
    ) -> Self {
        Self {
            date,
            action,
            shares,
            price,
            notional: Decimal::from(shares) * price,
            cash_after,
        }
    }
}

/// An entry paired with the trade that closed it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundTrip<'a> {
    pub entry: &'a Trade,
    pub exit: &'a Trade,
}

impl RoundTrip<'_> {
    /// Realized profit or loss.
    pub fn pnl(&self) -> Decimal {
        self.exit.notional - self.entry.notional
    }
}

/// Append-only, chronologically ordered list of trades.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TradeLedger {
    trades: Vec<Trade>,
}

impl TradeLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a trade.
    pub fn record(&mut self, trade: Trade) {
        debug_assert!(
            self.trades.last().map_or(true, |t| t.date <= trade.date),
            "trades must be recorded in chronological order"
        );
        self.trades.push(trade);
    }

    /// Number of trades.
    #[inline]
    pub fn len(&self) -> usize {
        self.trades.len()
    }

    /// Check if no trade was recorded.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.trades.is_empty()
    }

    /// All trades, oldest first.
    pub fn trades(&self) -> &[Trade] {
        &self.trades
    }

    /// Most recent trade.
    pub fn last(&self) -> Option<&Trade> {
        self.trades.last()
    }

    /// Get an iterator over the trades.
    pub fn iter(&self) -> impl Iterator<Item = &Trade> {
        self.trades.iter()
    }

    /// Pair every BUY with the exit that follows it.
    pub fn round_trips(&self) -> Vec<RoundTrip<'_>> {
        let mut trips = Vec::new();
        let mut open: Option<&Trade> = None;
        for trade in &self.trades {
            match trade.action {
                TradeAction::Buy => open = Some(trade),
                TradeAction::Sell | TradeAction::ForcedSell => {
                    if let Some(entry) = open.take() {
                        trips.push(RoundTrip { entry, exit: trade });
                    }
                }
            }
        }
        trips
    }
}

impl<'a> IntoIterator for &'a TradeLedger {
    type Item = &'a Trade;
    type IntoIter = std::slice::Iter<'a, Trade>;

    fn into_iter(self) -> Self::IntoIter {
        self.trades.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    #[test]
    fn test_trade_notional() {
        let trade = Trade::new(day(1), TradeAction::Buy, 66, dec!(75.6), dec!(10.4));
        assert_eq!(trade.notional, dec!(4989.6));
    }

    #[test]
    fn test_action_serialization() {
        let json = serde_json::to_string(&TradeAction::ForcedSell).unwrap();
        assert_eq!(json, "\"FORCED_SELL\"");
        assert_eq!(TradeAction::Buy.to_string(), "BUY");
        assert!(TradeAction::ForcedSell.is_exit());
        assert!(!TradeAction::Buy.is_exit());
    }

    #[test]
    fn test_round_trips() {
        let mut ledger = TradeLedger::new();
        ledger.record(Trade::new(day(1), TradeAction::Buy, 10, dec!(10), dec!(0)));
        ledger.record(Trade::new(day(2), TradeAction::Sell, 10, dec!(12), dec!(120)));
        ledger.record(Trade::new(day(3), TradeAction::Buy, 12, dec!(10), dec!(0)));
        ledger.record(Trade::new(day(4), TradeAction::ForcedSell, 12, dec!(9), dec!(108)));

        let trips = ledger.round_trips();
        assert_eq!(trips.len(), 2);
        assert_eq!(trips[0].pnl(), dec!(20));
        assert_eq!(trips[1].pnl(), dec!(-12));
    }
}
