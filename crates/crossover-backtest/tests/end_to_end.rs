//! End-to-end run over the bundled demo data.

use chrono::NaiveDate;
use crossover_backtest::{BacktestConfig, BacktestEngine, ComparisonReport};
use crossover_core::traits::DataSource;
use crossover_core::types::TradeAction;
use crossover_data::{load_csv, CsvDataSource};
use rust_decimal_macros::dec;

const DEMO: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../../data/demo.csv");

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[tokio::test]
async fn test_demo_series_round_trips() {
    let raw = load_csv(DEMO, "DEMO", None, None).await.unwrap();
    let engine = BacktestEngine::new(BacktestConfig {
        symbol: "DEMO".to_string(),
        ..Default::default()
    })
    .unwrap();

    let report = engine.run(raw).unwrap();
    let trades = report.ledger.trades();

    assert_eq!(report.cleaning.duplicates_removed, 1);
    assert_eq!(report.cleaning.final_rows, 650);

    let actions: Vec<TradeAction> = trades.iter().map(|t| t.action).collect();
    assert_eq!(
        actions,
        vec![
            TradeAction::Buy,
            TradeAction::Sell,
            TradeAction::Buy,
            TradeAction::ForcedSell
        ]
    );

    assert_eq!(trades[0].date, date(2020, 9, 21));
    assert_eq!(trades[0].price, dec!(75.6));
    assert_eq!(trades[1].date, date(2021, 3, 3));
    assert_eq!(trades[1].cash_after, dec!(5184.8));
    assert_eq!(trades[2].shares, 64);
    assert_eq!(trades[2].cash_after, dec!(13.6));
    assert_eq!(trades[3].date, date(2021, 10, 11));
    assert_eq!(trades[3].price, dec!(109.6));

    let summary = &report.summary;
    assert_eq!(summary.final_value, dec!(7028));
    assert_eq!(summary.return_pct, dec!(40.56));
    assert_eq!(summary.buy_hold_return, dec!(480));
    assert_eq!(summary.strategy_edge, dec!(1548));
    assert_eq!(summary.winning_trips, 2);
    assert_eq!(summary.win_rate_pct, dec!(100));
}

#[tokio::test]
async fn test_date_range_and_comparison() {
    let source = CsvDataSource::new(DEMO).unwrap();
    let mut comparison = ComparisonReport::new();

    // Too short for a 200-day average: valid run with no trades
    let short = BacktestConfig {
        symbol: "DEMO".to_string(),
        from_date: Some(date(2020, 1, 1)),
        to_date: Some(date(2020, 6, 30)),
        ..Default::default()
    };
    // Nothing in range: the engine refuses to run
    let empty = BacktestConfig {
        symbol: "DEMO".to_string(),
        from_date: Some(date(2030, 1, 1)),
        to_date: Some(date(2030, 12, 31)),
        ..Default::default()
    };
    let full = BacktestConfig {
        symbol: "DEMO".to_string(),
        ..Default::default()
    };

    for (label, config) in [("short", short), ("empty", empty), ("full", full)] {
        let raw = source
            .get_historical_bars(&config.symbol, config.from_date, config.to_date)
            .await
            .unwrap();
        match BacktestEngine::new(config).unwrap().run(raw) {
            Ok(report) => comparison.push_report(label, &report),
            Err(e) => comparison.push_failure(label, e),
        }
    }

    assert_eq!(comparison.failures().len(), 1);
    assert_eq!(comparison.failures()[0].0, "empty");

    let ranked = comparison.ranked();
    assert_eq!(ranked[0].label, "full");
    assert_eq!(ranked[1].label, "short");
    assert_eq!(ranked[1].summary.trade_count, 0);
    assert_eq!(comparison.best().unwrap().label, "full");
}
