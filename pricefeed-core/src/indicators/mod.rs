//! Technical indicators over a bar history.
//!
//! Indicators are pure functions: bar history in, index-aligned series out.
//! Every output has the same length as its input, with `None` for each index
//! before the lookback window fills. Nothing is updated incrementally; a
//! caller recomputes from scratch whenever its history changes.

pub mod ema;
pub mod macd;
pub mod overlays;
pub mod rsi;
pub mod sma;

pub use ema::{exponential_moving_average, Ema};
pub use macd::{macd, Macd, MacdPoint};
pub use overlays::{OverlayPoint, Overlays, TechnicalIndicators};
pub use rsi::{relative_strength_index, Rsi, DEFAULT_RSI_PERIOD};
pub use sma::{simple_moving_average, Sma};

use crate::domain::Bar;

/// Index-aligned indicator output; `None` during warm-up.
pub type IndicatorSeries = Vec<Option<f64>>;

/// Trait for single-series indicators.
///
/// `compute` returns a series of the same length as `bars` whose first
/// `lookback()` entries are `None`.
///
/// # Look-ahead contamination guard
/// No value at bar t may depend on bars after t. Every indicator must pass
/// the truncated-vs-full series test.
pub trait Indicator: Send + Sync {
    /// Human-readable name (e.g., "sma_20", "rsi_14").
    fn name(&self) -> &str;

    /// Number of bars needed before the indicator produces a value.
    fn lookback(&self) -> usize;

    fn compute(&self, bars: &[Bar]) -> IndicatorSeries;
}

/// Value at the final index, if the series has warmed up there.
pub fn latest(series: &[Option<f64>]) -> Option<f64> {
    series.last().copied().flatten()
}

/// Create synthetic bars from close prices for testing.
///
/// open = prev_close (or close for the first bar),
/// high = max(open,close) + 1.0, low = min(open,close) - 1.0, volume = 1000,
/// timestamps one minute apart.
#[cfg(test)]
pub fn make_bars(closes: &[f64]) -> Vec<Bar> {
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let open = if i == 0 { close } else { closes[i - 1] };
            Bar {
                timestamp: i as i64 * 60_000,
                open,
                high: open.max(close) + 1.0,
                low: open.min(close) - 1.0,
                close,
                volume: 1_000.0,
            }
        })
        .collect()
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for indicator tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;
