//! Configuration management.

mod settings;

pub use settings::{AppConfig, AppSettings, BacktestSettings, DataSettings, LoggingConfig};

pub use config::ConfigError;

use config::{Config, Environment, File, FileFormat};
use std::path::Path;

/// Load configuration from an optional TOML file and the environment.
///
/// Environment variables use the `CROSSOVER` prefix with `__` between
/// section and key, e.g. `CROSSOVER__BACKTEST__BUDGET=10000`.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let config = Config::builder()
        .add_source(File::from(path).format(FileFormat::Toml).required(false))
        .add_source(
            Environment::with_prefix("CROSSOVER")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    config.try_deserialize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::fs;

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("crossover.toml");
        fs::write(
            &path,
            r#"
[backtest]
symbol = "MSFT"
from_date = "2020-01-01"
to_date = "2023-12-31"
budget = 10000
short_window = 20
long_window = 100
"#,
        )
        .unwrap();

        let config = load_config(&path).unwrap();

        assert_eq!(config.backtest.symbol, "MSFT");
        assert_eq!(config.backtest.budget, dec!(10000));
        assert_eq!(config.backtest.short_window, 20);
        assert_eq!(
            config.backtest.from_date,
            chrono::NaiveDate::from_ymd_opt(2020, 1, 1)
        );
        // Sections missing from the file keep their defaults
        assert_eq!(config.logging.level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_sections_fill_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("partial.toml");
        fs::write(
            &path,
            r#"
[app]

[logging]
level = "debug"

[data]
"#,
        )
        .unwrap();

        let config = load_config(&path).unwrap();

        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, "pretty");
        assert_eq!(config.app.name, "crossover");
        assert_eq!(config.data.path, "data");
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(&dir.path().join("absent.toml")).unwrap();

        assert_eq!(config.backtest.budget, dec!(5000));
        assert_eq!(config.backtest.short_window, 50);
        assert_eq!(config.backtest.long_window, 200);
    }

    #[test]
    fn test_default_config_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("default.toml");
        fs::write(&path, AppConfig::default().to_toml().unwrap()).unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.backtest, BacktestSettings::default());
    }
}
