//! Backtesting engine.

mod comparison;
mod engine;
mod report;
mod simulator;
mod statistics;

pub use comparison::{ComparisonEntry, ComparisonReport};
pub use engine::{BacktestConfig, BacktestEngine};
pub use report::BacktestReport;
pub use simulator::{EquityPoint, Position, SimulationOutcome, SimulationState, TradeSimulator};
pub use statistics::{PerformanceEvaluator, PerformanceSummary};
