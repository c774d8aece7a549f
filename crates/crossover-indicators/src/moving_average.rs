//! Moving average indicators.

use crossover_core::error::IndicatorError;
use crossover_core::traits::Indicator;
use rust_decimal::Decimal;

/// Simple Moving Average (SMA).
///
/// Calculates the arithmetic mean of the last N values.
#[derive(Debug, Clone)]
pub struct Sma {
    period: usize,
    divisor: Decimal,
}

impl Sma {
    /// Create a new SMA with the specified period.
    pub fn new(period: usize) -> Result<Self, IndicatorError> {
        if period == 0 {
            return Err(IndicatorError::InvalidParameter(
                "Period must be greater than 0".into(),
            ));
        }
        Ok(Self {
            period,
            divisor: Decimal::from(period as u64),
        })
    }

    /// Mean of `data[index + 1 - period..=index]`.
    ///
    /// Returns `None` when fewer than `period` values end at `index`.
    pub fn value_at(&self, data: &[Decimal], index: usize) -> Option<Decimal> {
        if index >= data.len() || index + 1 < self.period {
            return None;
        }
        let window = &data[index + 1 - self.period..=index];
        Some(window.iter().sum::<Decimal>() / self.divisor)
    }
}

impl Indicator for Sma {
    type Output = Decimal;

    fn calculate(&self, data: &[Decimal]) -> Vec<Decimal> {
        if data.len() < self.period {
            return vec![];
        }

        let mut result = Vec::with_capacity(data.len() - self.period + 1);

        // Initial sum
        let mut sum: Decimal = data[..self.period].iter().sum();
        result.push(sum / self.divisor);

        // Sliding window; decimal add/sub is exact so the sum never drifts
        for i in self.period..data.len() {
            sum = sum - data[i - self.period] + data[i];
            result.push(sum / self.divisor);
        }

        result
    }

    fn period(&self) -> usize {
        self.period
    }

    fn name(&self) -> &str {
        "SMA"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_sma() {
        let sma = Sma::new(3).unwrap();
        let data = vec![dec!(1), dec!(2), dec!(3), dec!(4), dec!(5)];
        let result = sma.calculate(&data);

        assert_eq!(result, vec![dec!(2), dec!(3), dec!(4)]);
    }

    #[test]
    fn test_sma_insufficient_data() {
        let sma = Sma::new(5).unwrap();
        let data = vec![dec!(1), dec!(2), dec!(3)];

        assert!(sma.calculate(&data).is_empty());
        assert_eq!(sma.aligned(&data), vec![None, None, None]);
    }

    #[test]
    fn test_sma_zero_period() {
        assert!(matches!(
            Sma::new(0),
            Err(IndicatorError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_value_at_matches_batch() {
        let sma = Sma::new(4).unwrap();
        let data: Vec<Decimal> = (1..=12).map(|i| Decimal::from(i * i)).collect();
        let aligned = sma.aligned(&data);

        for (i, expected) in aligned.iter().enumerate() {
            assert_eq!(sma.value_at(&data, i), *expected, "index {}", i);
        }
        assert_eq!(sma.value_at(&data, 2), None);
        assert_eq!(sma.value_at(&data, 3), Some(dec!(7.5))); // (1+4+9+16)/4
        assert_eq!(sma.value_at(&data, 99), None);
    }

    #[test]
    fn test_flat_series_is_exact() {
        let sma = Sma::new(7).unwrap();
        let data = vec![dec!(100.13); 50];

        assert!(sma.calculate(&data).iter().all(|v| *v == dec!(100.13)));
    }
}
