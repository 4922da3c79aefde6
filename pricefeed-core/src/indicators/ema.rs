//! Exponential Moving Average (EMA).
//!
//! Recursive: EMA[t] = alpha * close[t] + (1 - alpha) * EMA[t-1]
//! Seed: EMA[period-1] = SMA of first `period` close values.
//! Lookback: period - 1.

use super::{Indicator, IndicatorSeries};
use crate::domain::Bar;

#[derive(Debug, Clone)]
pub struct Ema {
    period: usize,
    name: String,
}

impl Ema {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "EMA period must be >= 1");
        Self {
            period,
            name: format!("ema_{period}"),
        }
    }
}

impl Indicator for Ema {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period.saturating_sub(1)
    }

    fn compute(&self, bars: &[Bar]) -> IndicatorSeries {
        exponential_moving_average(bars, self.period)
    }
}

/// EMA of close prices, aligned with `bars`.
pub fn exponential_moving_average(bars: &[Bar], period: usize) -> IndicatorSeries {
    let closes: Vec<f64> = bars.iter().map(|bar| bar.close).collect();
    ema_of(&closes, period)
}

/// EMA over an arbitrary value series; shared with MACD's signal line.
pub(crate) fn ema_of(values: &[f64], period: usize) -> IndicatorSeries {
    let n = values.len();
    let mut result = vec![None; n];

    if period == 0 || n < period {
        return result;
    }

    let alpha = 2.0 / (period as f64 + 1.0);
    let seed = values[..period].iter().sum::<f64>() / period as f64;
    result[period - 1] = Some(seed);

    let mut prev = seed;
    for i in period..n {
        prev = alpha * values[i] + (1.0 - alpha) * prev;
        result[i] = Some(prev);
    }

    result
}
