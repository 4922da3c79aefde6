//! Relative Strength Index (RSI).
//!
//! Windowed form: for every bar `i >= period`, gains and losses are summed
//! over the `period` close-to-close changes ending at `i`, then
//! RSI = 100 - 100 / (1 + avg_gain / avg_loss).
//! Lookback: period.
//! Edge case: avg_loss == 0 → RSI = 100, including a flat window.

use super::{Indicator, IndicatorSeries};
use crate::domain::Bar;

pub const DEFAULT_RSI_PERIOD: usize = 14;

#[derive(Debug, Clone)]
pub struct Rsi {
    period: usize,
    name: String,
}

impl Rsi {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "RSI period must be >= 1");
        Self {
            period,
            name: format!("rsi_{period}"),
        }
    }
}

impl Default for Rsi {
    fn default() -> Self {
        Self::new(DEFAULT_RSI_PERIOD)
    }
}

impl Indicator for Rsi {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period
    }

    fn compute(&self, bars: &[Bar]) -> IndicatorSeries {
        relative_strength_index(bars, self.period)
    }
}

/// RSI aligned 1:1 with `bars`; `None` for every index below `period`.
///
/// Each window is summed from scratch so that a window without losses hits
/// the `avg_loss == 0` branch exactly.
pub fn relative_strength_index(bars: &[Bar], period: usize) -> IndicatorSeries {
    let n = bars.len();
    let mut result = vec![None; n];

    if period == 0 || n <= period {
        return result;
    }

    // changes[j] = close[j] - close[j-1]; index 0 has no prior close
    let changes: Vec<f64> = std::iter::once(0.0)
        .chain(bars.windows(2).map(|pair| pair[1].close - pair[0].close))
        .collect();

    for i in period..n {
        // i >= period, so the window starts at index 1 or later
        let mut gains = 0.0;
        let mut losses = 0.0;
        for &change in &changes[(i + 1 - period)..=i] {
            if change > 0.0 {
                gains += change;
            } else {
                losses -= change;
            }
        }
        let avg_gain = gains / period as f64;
        let avg_loss = losses / period as f64;
        result[i] = Some(compute_rsi(avg_gain, avg_loss));
    }

    result
}

fn compute_rsi(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        100.0
    } else {
        100.0 - 100.0 / (1.0 + avg_gain / avg_loss)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, make_bars};

    #[test]
    fn rsi_all_gains() {
        let bars = make_bars(&[100.0, 101.0, 102.0, 103.0, 104.0, 105.0]);
        let result = Rsi::new(3).compute(&bars);
        // All positive changes → RSI = 100 exactly
        for value in &result[3..] {
            assert_eq!(*value, Some(100.0));
        }
    }

    #[test]
    fn rsi_non_decreasing_with_flats_is_100() {
        let bars = make_bars(&[100.0, 100.0, 101.0, 101.0, 101.0, 102.0, 102.0]);
        let result = relative_strength_index(&bars, 3);
        for value in &result[3..] {
            assert_eq!(*value, Some(100.0));
        }
    }

    #[test]
    fn rsi_all_losses() {
        let bars = make_bars(&[105.0, 104.0, 103.0, 102.0, 101.0, 100.0]);
        let result = Rsi::new(3).compute(&bars);
        // All negative changes → RSI = 0
        assert_approx(result[3].unwrap(), 0.0, 1e-9);
    }

    #[test]
    fn rsi_mixed() {
        // Closes: 44, 44.34, 44.09, 43.61, 44.33
        // Window ending at index 3: +0.34, -0.25, -0.48
        // gains = 0.34, losses = 0.73
        // RSI[3] = 100 - 100/(1 + 0.34/0.73) = 31.7757...
        let bars = make_bars(&[44.0, 44.34, 44.09, 43.61, 44.33]);
        let result = Rsi::new(3).compute(&bars);

        assert!(result[..3].iter().all(Option::is_none));
        let rsi3 = result[3].unwrap();
        assert!(rsi3 > 0.0 && rsi3 < 100.0);
        assert_approx(rsi3, 100.0 - 100.0 / (1.0 + 0.34 / 0.73), 1e-6);

        // Window ending at index 4: -0.25, -0.48, +0.72
        let rsi4 = result[4].unwrap();
        assert_approx(rsi4, 100.0 - 100.0 / (1.0 + 0.72 / 0.73), 1e-6);
    }

    #[test]
    fn rsi_bounds() {
        let bars = make_bars(&[100.0, 105.0, 98.0, 110.0, 95.0, 115.0, 90.0, 120.0]);
        let result = Rsi::new(3).compute(&bars);
        for (i, value) in result.iter().enumerate() {
            if let Some(v) = value {
                assert!((0.0..=100.0).contains(v), "RSI out of bounds at bar {i}: {v}");
            }
        }
    }

    #[test]
    fn rsi_needs_period_plus_one_bars() {
        let bars = make_bars(&[100.0, 101.0, 102.0]);
        assert!(relative_strength_index(&bars, 3).iter().all(Option::is_none));
        assert!(relative_strength_index(&[], 14).is_empty());
    }

    #[test]
    fn rsi_lookback() {
        assert_eq!(Rsi::default().lookback(), 14);
        assert_eq!(Rsi::default().name(), "rsi_14");
    }
}
