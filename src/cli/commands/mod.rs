//! CLI command implementations.

pub mod backtest;
pub mod compare;
pub mod init_config;
pub mod validate;
