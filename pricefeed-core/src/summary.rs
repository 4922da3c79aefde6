//! Headline market figures for a dashboard header.

use serde::{Deserialize, Serialize};

use crate::domain::Bar;
use crate::precision::round_price;

/// Last price, change against the previous close, and the range over the
/// trailing window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarketSummary {
    pub last_price: f64,
    pub change: f64,
    pub change_percent: f64,
    pub window_high: f64,
    pub window_low: f64,
    pub volume: f64,
}

impl MarketSummary {
    /// `None` for an empty history. With a single bar the change is zero.
    pub fn from_history(bars: &[Bar], window: usize) -> Option<Self> {
        let last = bars.last()?;
        let previous_close = bars
            .len()
            .checked_sub(2)
            .map(|i| bars[i].close)
            .unwrap_or(last.close);

        let change = last.close - previous_close;
        let change_percent = if previous_close != 0.0 {
            change / previous_close * 100.0
        } else {
            0.0
        };

        let tail = &bars[bars.len().saturating_sub(window.max(1))..];
        let window_high = tail.iter().map(|bar| bar.high).fold(f64::MIN, f64::max);
        let window_low = tail.iter().map(|bar| bar.low).fold(f64::MAX, f64::min);

        Some(Self {
            last_price: last.close,
            change: round_price(change),
            change_percent: round_price(change_percent),
            window_high,
            window_low,
            volume: last.volume,
        })
    }

    pub fn is_up(&self) -> bool {
        self.change >= 0.0
    }
}
