//! Property tests for engine invariants.
//!
//! Uses proptest to verify, over random price paths and windows:
//! 1. Determinism — identical inputs give identical ledgers and summaries
//! 2. Cash never goes negative
//! 3. Trades alternate BUY / exit, the ledger always ends flat
//! 4. Golden and death crosses never coincide

use chrono::{Days, NaiveDate};
use crossover_backtest::{BacktestConfig, BacktestEngine, TradeSimulator};
use crossover_core::types::{CrossSignal, PriceSeries, RawBar, TradeAction};
use crossover_signals::{SignalConfig, SignalDetector};
use proptest::prelude::*;
use rust_decimal::Decimal;

// ── Strategies (proptest) ────────────────────────────────────────────

/// Random walk in cents, floored at one dollar.
fn arb_prices() -> impl Strategy<Value = Vec<Decimal>> {
    (
        1_000i64..50_000,
        prop::collection::vec(-300i64..=300, 40..300),
    )
        .prop_map(|(start, steps)| {
            let mut cents = start;
            steps
                .into_iter()
                .map(|step| {
                    cents = (cents + step).max(100);
                    Decimal::new(cents, 2)
                })
                .collect()
        })
}

fn arb_windows() -> impl Strategy<Value = (usize, usize)> {
    (1usize..10).prop_flat_map(|short| (Just(short), short + 1..40))
}

fn arb_budget() -> impl Strategy<Value = Decimal> {
    (1i64..1_000_000).prop_map(|cents| Decimal::new(cents, 2))
}

fn raw_bars(prices: &[Decimal]) -> Vec<RawBar> {
    let start = NaiveDate::from_ymd_opt(2015, 1, 1).unwrap();
    prices
        .iter()
        .enumerate()
        .map(|(i, p)| RawBar::new(start + Days::new(i as u64), *p))
        .collect()
}

fn engine(budget: Decimal, (short, long): (usize, usize)) -> BacktestEngine {
    BacktestEngine::new(BacktestConfig {
        symbol: "PROP".to_string(),
        budget,
        short_window: short,
        long_window: long,
        ..Default::default()
    })
    .unwrap()
}

proptest! {
    /// Running twice on the same input produces the same report.
    #[test]
    fn runs_are_deterministic(
        prices in arb_prices(),
        windows in arb_windows(),
        budget in arb_budget(),
    ) {
        let engine = engine(budget, windows);
        let first = engine.run(raw_bars(&prices)).unwrap();
        let second = engine.run(raw_bars(&prices)).unwrap();

        prop_assert_eq!(first.ledger, second.ledger);
        prop_assert_eq!(first.summary, second.summary);
    }

    /// Every recorded cash balance is non-negative.
    #[test]
    fn cash_never_negative(
        prices in arb_prices(),
        windows in arb_windows(),
        budget in arb_budget(),
    ) {
        let report = engine(budget, windows).run(raw_bars(&prices)).unwrap();

        for trade in &report.ledger {
            prop_assert!(trade.cash_after >= Decimal::ZERO);
        }
        prop_assert!(report.summary.final_value >= Decimal::ZERO);
    }

    /// BUY and exits alternate; only the last trade may be a FORCED_SELL.
    #[test]
    fn trades_alternate_and_close_flat(
        prices in arb_prices(),
        windows in arb_windows(),
        budget in arb_budget(),
    ) {
        let report = engine(budget, windows).run(raw_bars(&prices)).unwrap();
        let trades = report.ledger.trades();

        for (i, trade) in trades.iter().enumerate() {
            prop_assert!(trade.shares > 0);
            if i % 2 == 0 {
                prop_assert_eq!(trade.action, TradeAction::Buy);
            } else {
                prop_assert!(trade.action.is_exit());
                prop_assert_eq!(trade.shares, trades[i - 1].shares);
            }
            if trade.action == TradeAction::ForcedSell {
                prop_assert_eq!(i, trades.len() - 1);
            }
        }

        if let Some(last) = trades.last() {
            prop_assert!(last.action.is_exit());
            prop_assert_eq!(report.summary.final_value, last.cash_after);
        } else {
            prop_assert_eq!(report.summary.final_value, budget);
        }
    }

    /// Stepping manually keeps shares > 0 exactly while long.
    #[test]
    fn position_matches_shares(
        prices in arb_prices(),
        windows in arb_windows(),
        budget in arb_budget(),
    ) {
        let (series, _) = PriceSeries::clean("PROP", raw_bars(&prices)).unwrap();
        let detector = SignalDetector::new(SignalConfig::new(windows.0, windows.1)).unwrap();
        let frame = detector.detect(&series);

        let mut simulator = TradeSimulator::new(budget);
        for point in frame.iter() {
            if let Some(trade) = simulator.step(point).unwrap() {
                let expect_long = trade.action == TradeAction::Buy;
                prop_assert_eq!(simulator.state().is_long(), expect_long);
            }
            prop_assert_eq!(
                simulator.state().shares_held() > 0,
                simulator.state().is_long()
            );
            prop_assert!(simulator.state().cash() >= Decimal::ZERO);
        }

        let outcome = simulator.finish().unwrap();
        prop_assert_eq!(outcome.equity_curve.len(), series.len());
    }

    /// No bar is both a golden and a death cross, and warm-up bars are never
    /// evaluable.
    #[test]
    fn crossings_are_exclusive(
        prices in arb_prices(),
        windows in arb_windows(),
    ) {
        let (series, _) = PriceSeries::clean("PROP", raw_bars(&prices)).unwrap();
        let detector = SignalDetector::new(SignalConfig::new(windows.0, windows.1)).unwrap();
        let frame = detector.detect(&series);

        for (i, point) in frame.iter().enumerate() {
            prop_assert!(!(point.signal.golden_cross() == Some(true)
                && point.signal.death_cross() == Some(true)));
            if i < windows.1 {
                prop_assert_eq!(point.signal, CrossSignal::NotEvaluable);
            } else {
                prop_assert!(point.signal.is_evaluable());
            }
        }
    }
}
