//! Benchmarks for crossover detection.

use chrono::{Days, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use crossover_core::types::{Bar, PriceSeries};
use crossover_signals::{SignalConfig, SignalDetector};
use rust_decimal::Decimal;

fn generate_series(size: usize) -> PriceSeries {
    let start = NaiveDate::from_ymd_opt(2000, 1, 3).unwrap();
    let bars = (0..size)
        .map(|i| {
            let cents = 10_000 + ((i % 500) as i64 - 250).abs() * 7;
            Bar::new(start + Days::new(i as u64), Decimal::new(cents, 2))
        })
        .collect();
    PriceSeries::new("BENCH", bars).unwrap()
}

fn benchmark_detect(c: &mut Criterion) {
    let mut group = c.benchmark_group("detect");
    let detector = SignalDetector::new(SignalConfig::default()).unwrap();

    for size in [1000, 10000].iter() {
        let series = generate_series(*size);
        group.bench_with_input(BenchmarkId::new("50_200", size), &series, |b, series| {
            b.iter(|| detector.detect(black_box(series)))
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_detect);
criterion_main!(benches);
