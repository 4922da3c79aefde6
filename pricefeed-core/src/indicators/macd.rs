//! Moving Average Convergence/Divergence (MACD).
//!
//! macd = EMA(fast) - EMA(slow) of close.
//! signal = EMA(signal) of the macd line, seeded once `signal` macd values exist.
//! histogram = macd - signal.
//! A point is emitted only when all three components exist.
//! Lookback: (slow - 1) + (signal - 1).

use serde::{Deserialize, Serialize};

use super::ema::{ema_of, exponential_moving_average};
use crate::domain::Bar;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacdPoint {
    pub macd: f64,
    pub signal: f64,
    pub histogram: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Macd {
    fast: usize,
    slow: usize,
    signal: usize,
}

impl Macd {
    pub fn new(fast: usize, slow: usize, signal: usize) -> Self {
        assert!(fast >= 1, "MACD fast period must be >= 1");
        assert!(slow >= fast, "MACD slow period must be >= fast period");
        assert!(signal >= 1, "MACD signal period must be >= 1");
        Self { fast, slow, signal }
    }

    pub fn lookback(&self) -> usize {
        (self.slow - 1) + (self.signal - 1)
    }

    pub fn compute(&self, bars: &[Bar]) -> Vec<Option<MacdPoint>> {
        macd(bars, self.fast, self.slow, self.signal)
    }
}

impl Default for Macd {
    fn default() -> Self {
        Self::new(12, 26, 9)
    }
}

/// MACD series aligned with `bars`. Zero periods yield all `None`.
pub fn macd(bars: &[Bar], fast: usize, slow: usize, signal: usize) -> Vec<Option<MacdPoint>> {
    let n = bars.len();
    if fast == 0 || slow == 0 || signal == 0 {
        return vec![None; n];
    }

    let fast_ema = exponential_moving_average(bars, fast);
    let slow_ema = exponential_moving_average(bars, slow);

    // The macd line exists from the later of the two warm-ups onward
    let start = fast.max(slow) - 1;
    let line: Vec<f64> = fast_ema
        .iter()
        .zip(&slow_ema)
        .filter_map(|(f, s)| Some((*f)? - (*s)?))
        .collect();
    let signal_line = ema_of(&line, signal);

    let mut result = vec![None; n];
    for (k, (value, sig)) in line.iter().zip(signal_line).enumerate() {
        if let Some(sig) = sig {
            result[start + k] = Some(MacdPoint {
                macd: *value,
                signal: sig,
                histogram: value - sig,
            });
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, make_bars, DEFAULT_EPSILON};

    #[test]
    fn constant_series_has_zero_macd() {
        let bars = make_bars(&[100.0; 60]);
        let result = Macd::default().compute(&bars);
        let lookback = Macd::default().lookback();
        assert_eq!(lookback, 33);
        assert!(result[..lookback].iter().all(Option::is_none));
        for point in result[lookback..].iter() {
            let point = point.unwrap();
            assert_approx(point.macd, 0.0, DEFAULT_EPSILON);
            assert_approx(point.signal, 0.0, DEFAULT_EPSILON);
            assert_approx(point.histogram, 0.0, DEFAULT_EPSILON);
        }
    }

    #[test]
    fn rising_series_has_positive_macd() {
        let closes: Vec<f64> = (0..80).map(|i| 100.0 + i as f64).collect();
        let bars = make_bars(&closes);
        let last = macd(&bars, 12, 26, 9).last().copied().flatten().unwrap();
        assert!(last.macd > 0.0);
        assert_approx(last.histogram, last.macd - last.signal, DEFAULT_EPSILON);
    }

    #[test]
    fn small_periods_by_hand() {
        // fast=1 (EMA = close), slow=2 (alpha = 2/3), signal=1
        let bars = make_bars(&[10.0, 12.0, 11.0]);
        let result = macd(&bars, 1, 2, 1);
        assert!(result[0].is_none());
        // slow seed at 1: mean(10,12) = 11 → macd = 12 - 11 = 1
        assert_approx(result[1].unwrap().macd, 1.0, DEFAULT_EPSILON);
        // slow[2] = 2/3 * 11 + 1/3 * 11 = 11 → macd = 0
        assert_approx(result[2].unwrap().macd, 0.0, DEFAULT_EPSILON);
        assert_approx(result[2].unwrap().histogram, 0.0, DEFAULT_EPSILON);
    }

    #[test]
    fn short_history_is_all_none() {
        let bars = make_bars(&[1.0; 20]);
        assert!(macd(&bars, 12, 26, 9).iter().all(Option::is_none));
        assert!(macd(&[], 12, 26, 9).is_empty());
    }
}
