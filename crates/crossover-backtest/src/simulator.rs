//! Trade simulation state machine.
//!
//! The simulator walks a [`SignalFrame`] bar by bar with two states:
//! `Flat` (all cash) and `Long` (holding shares). A golden cross opens a
//! position with as many whole shares as the cash buys, a death cross closes
//! it, and any position still open after the last bar is force-sold at the
//! last close.

use chrono::NaiveDate;
use crossover_core::error::{EngineError, EngineResult};
use crossover_core::types::{CrossSignal, Trade, TradeAction, TradeLedger};
use crossover_signals::{SignalFrame, SignalPoint};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Position held by the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Position {
    Flat,
    Long { shares: u64 },
}

/// Mutable state of one simulation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationState {
    cash: Decimal,
    position: Position,
}

impl SimulationState {
    fn new(budget: Decimal) -> Self {
        Self {
            cash: budget,
            position: Position::Flat,
        }
    }

    /// Uninvested cash. Never negative.
    pub fn cash(&self) -> Decimal {
        self.cash
    }

    /// Current position.
    pub fn position(&self) -> Position {
        self.position
    }

    /// Shares held, zero when flat.
    pub fn shares_held(&self) -> u64 {
        match self.position {
            Position::Flat => 0,
            Position::Long { shares } => shares,
        }
    }

    /// Check if a position is open.
    pub fn is_long(&self) -> bool {
        matches!(self.position, Position::Long { .. })
    }

    /// Mark-to-market value at the given price.
    pub fn equity(&self, price: Decimal) -> Decimal {
        self.cash + Decimal::from(self.shares_held()) * price
    }
}

/// Account value after a bar was processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquityPoint {
    pub date: NaiveDate,
    pub equity: Decimal,
}

/// Result of a completed simulation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationOutcome {
    /// Trades in chronological order
    pub ledger: TradeLedger,
    /// Equity after every bar
    pub equity_curve: Vec<EquityPoint>,
    /// Cash once every position was closed
    pub final_cash: Decimal,
    /// Golden crosses that could not buy a single share
    pub skipped_entries: usize,
}

/// Two-state trade simulator.
#[derive(Debug, Clone)]
pub struct TradeSimulator {
    state: SimulationState,
    ledger: TradeLedger,
    equity_curve: Vec<EquityPoint>,
    skipped_entries: usize,
    last_point: Option<SignalPoint>,
}

impl TradeSimulator {
    /// Create a flat simulator holding `budget` in cash.
    pub fn new(budget: Decimal) -> Self {
        Self {
            state: SimulationState::new(budget),
            ledger: TradeLedger::new(),
            equity_curve: Vec::new(),
            skipped_entries: 0,
            last_point: None,
        }
    }

    /// Run a full simulation over a frame.
    ///
    /// Fails with [`EngineError::EmptySeries`] before any trade when the
    /// frame has no bars.
    pub fn run(budget: Decimal, frame: &SignalFrame) -> EngineResult<SimulationOutcome> {
        if frame.is_empty() {
            return Err(EngineError::EmptySeries);
        }

        let mut simulator = Self::new(budget);
        for point in frame.iter() {
            simulator.step(point)?;
        }
        simulator.finish()
    }

    /// Current state.
    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    /// Trades recorded so far.
    pub fn ledger(&self) -> &TradeLedger {
        &self.ledger
    }

    /// Process one bar. Returns the trade it produced, if any.
    ///
    /// Fails with [`EngineError::PositionTooLarge`] when the cash buys more
    /// whole shares than a `u64` can count.
    pub fn step(&mut self, point: &SignalPoint) -> EngineResult<Option<Trade>> {
        debug_assert!(
            self.last_point.map_or(true, |p| p.date < point.date),
            "bars must be processed in chronological order"
        );

        let trade = match (point.signal, self.state.position) {
            (CrossSignal::GoldenCross, Position::Flat) if self.state.cash > Decimal::ZERO => {
                self.enter(point)?
            }
            (CrossSignal::DeathCross, Position::Long { shares }) => {
                Some(self.exit(point.date, point.close, shares, TradeAction::Sell))
            }
            _ => None,
        };

        self.equity_curve.push(EquityPoint {
            date: point.date,
            equity: self.state.equity(point.close),
        });
        self.last_point = Some(*point);

        Ok(trade)
    }

    /// Close any open position at the last processed bar and return the
    /// outcome.
    pub fn finish(mut self) -> EngineResult<SimulationOutcome> {
        let last = self.last_point.ok_or(EngineError::EmptySeries)?;

        if let Position::Long { shares } = self.state.position {
            self.exit(last.date, last.close, shares, TradeAction::ForcedSell);
        }

        debug!(
            trades = self.ledger.len(),
            final_cash = %self.state.cash,
            skipped_entries = self.skipped_entries,
            "Simulation finished"
        );

        Ok(SimulationOutcome {
            final_cash: self.state.cash,
            ledger: self.ledger,
            equity_curve: self.equity_curve,
            skipped_entries: self.skipped_entries,
        })
    }

    fn enter(&mut self, point: &SignalPoint) -> EngineResult<Option<Trade>> {
        let shares = (self.state.cash / point.close)
            .floor()
            .to_u64()
            .ok_or(EngineError::PositionTooLarge {
                cash: self.state.cash,
                price: point.close,
            })?;

        if shares == 0 {
            self.skipped_entries += 1;
            warn!(
                date = %point.date,
                price = %point.close,
                cash = %self.state.cash,
                "Golden cross ignored: price exceeds available cash"
            );
            return Ok(None);
        }

        let cost = Decimal::from(shares) * point.close;
        self.state.cash -= cost;
        self.state.position = Position::Long { shares };

        let trade = Trade::new(
            point.date,
            TradeAction::Buy,
            shares,
            point.close,
            self.state.cash,
        );
        info!(
            date = %trade.date,
            shares,
            price = %trade.price,
            notional = %trade.notional,
            cash_after = %trade.cash_after,
            "BUY"
        );
        self.ledger.record(trade);
        Ok(Some(trade))
    }

    fn exit(
        &mut self,
        date: NaiveDate,
        price: Decimal,
        shares: u64,
        action: TradeAction,
    ) -> Trade {
        self.state.cash += Decimal::from(shares) * price;
        self.state.position = Position::Flat;

        let trade = Trade::new(date, action, shares, price, self.state.cash);
        info!(
            date = %trade.date,
            action = %action,
            shares,
            price = %trade.price,
            notional = %trade.notional,
            cash_after = %trade.cash_after,
            "{}",
            action
        );
        self.ledger.record(trade);
        trade
    }
}
