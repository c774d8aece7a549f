//! Indicator trait definitions.

use rust_decimal::Decimal;

/// Trait for technical indicators.
///
/// Indicators process price data and produce derived values
/// useful for trading decisions.
pub trait Indicator: Send + Sync {
    /// The output type of the indicator.
    type Output;

    /// Calculate indicator values for the given data.
    ///
    /// # Arguments
    /// * `data` - Input data (typically closing prices)
    ///
    /// # Returns
    /// One value per full window, i.e. `data.len() - period() + 1` values,
    /// or none when there is not enough data.
    fn calculate(&self, data: &[Decimal]) -> Vec<Self::Output>;

    /// Get the minimum data points required.
    fn period(&self) -> usize;

    /// Get the name of the indicator.
    fn name(&self) -> &str;

    /// Calculate values aligned with the input, `None` during warm-up.
    fn aligned(&self, data: &[Decimal]) -> Vec<Option<Self::Output>> {
        let warmup = self.period().saturating_sub(1).min(data.len());
        let mut out: Vec<Option<Self::Output>> = Vec::with_capacity(data.len());
        out.extend((0..warmup).map(|_| None));
        out.extend(self.calculate(data).into_iter().map(Some));
        out.resize_with(data.len(), || None);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    struct TestIndicator {
        period: usize,
    }

    impl Indicator for TestIndicator {
        type Output = Decimal;

        fn calculate(&self, data: &[Decimal]) -> Vec<Decimal> {
            if data.len() < self.period {
                return vec![];
            }
            // Simple sum indicator for testing
            data.windows(self.period)
                .map(|w| w.iter().sum())
                .collect()
        }

        fn period(&self) -> usize {
            self.period
        }

        fn name(&self) -> &str {
            "test"
        }
    }

    #[test]
    fn test_aligned_pads_warmup() {
        let indicator = TestIndicator { period: 3 };
        let data = vec![dec!(1), dec!(2), dec!(3), dec!(4)];
        let result = indicator.aligned(&data);

        assert_eq!(result, vec![None, None, Some(dec!(6)), Some(dec!(9))]);
    }

    #[test]
    fn test_aligned_short_input() {
        let indicator = TestIndicator { period: 5 };
        let result = indicator.aligned(&[dec!(1), dec!(2)]);
        assert_eq!(result, vec![None, None]);
    }
}
