//! Simple Moving Average (SMA).
//!
//! Rolling mean of close prices over a lookback window.
//! Lookback: period - 1 (first value at index period-1).

use super::{Indicator, IndicatorSeries};
use crate::domain::Bar;

#[derive(Debug, Clone)]
pub struct Sma {
    period: usize,
    name: String,
}

impl Sma {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "SMA period must be >= 1");
        Self {
            period,
            name: format!("sma_{period}"),
        }
    }
}

impl Indicator for Sma {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period.saturating_sub(1)
    }

    fn compute(&self, bars: &[Bar]) -> IndicatorSeries {
        simple_moving_average(bars, self.period)
    }
}

/// Mean close over `[i - period + 1, i]` for every `i >= period - 1`.
///
/// Empty input yields empty output; a zero period yields all `None`.
pub fn simple_moving_average(bars: &[Bar], period: usize) -> IndicatorSeries {
    let n = bars.len();
    let mut result = vec![None; n];

    if period == 0 || n < period {
        return result;
    }

    let divisor = period as f64;
    let mut sum: f64 = bars[..period].iter().map(|bar| bar.close).sum();
    result[period - 1] = Some(sum / divisor);

    // Roll the window forward
    for i in period..n {
        sum += bars[i].close - bars[i - period].close;
        result[i] = Some(sum / divisor);
    }

    result
}
