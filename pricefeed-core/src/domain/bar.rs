//! Bar: one fixed-width time bucket of price activity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::precision::round_price;

/// OHLCV bar keyed by its interval boundary in epoch milliseconds.
///
/// Inside the generator the fields carry full precision. Every bar handed to
/// a caller has been passed through [`Bar::rounded`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub timestamp: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Bar {
    /// A fresh bar with all four prices at `price` and no volume.
    pub fn flat(timestamp: i64, price: f64) -> Self {
        Self {
            timestamp,
            open: price,
            high: price,
            low: price,
            close: price,
            volume: 0.0,
        }
    }

    /// Extend the bar with a new trade print.
    pub fn absorb(&mut self, price: f64, volume: f64) {
        self.close = price;
        self.high = self.high.max(price);
        self.low = self.low.min(price);
        self.volume += volume;
    }

    /// Copy with prices and volume rounded to 2 decimal places.
    pub fn rounded(&self) -> Self {
        Self {
            timestamp: self.timestamp,
            open: round_price(self.open),
            high: round_price(self.high),
            low: round_price(self.low),
            close: round_price(self.close),
            volume: round_price(self.volume),
        }
    }

    /// Boundary timestamp as a UTC datetime, if representable.
    pub fn datetime(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.timestamp)
    }

    /// Returns true if any OHLCV field is NaN or infinite.
    pub fn is_void(&self) -> bool {
        !(self.open.is_finite()
            && self.high.is_finite()
            && self.low.is_finite()
            && self.close.is_finite()
            && self.volume.is_finite())
    }

    /// Basic OHLCV sanity check: high >= low, high >= open, high >= close, etc.
    pub fn is_sane(&self) -> bool {
        if self.is_void() {
            return false;
        }
        self.high >= self.low
            && self.high >= self.open
            && self.high >= self.close
            && self.low <= self.open
            && self.low <= self.close
            && self.open > 0.0
            && self.close > 0.0
            && self.volume >= 0.0
    }
}
