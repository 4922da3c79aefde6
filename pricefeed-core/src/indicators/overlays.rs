//! Chart overlays: the indicator bundle a dashboard draws over the candles.

use serde::{Deserialize, Serialize};

use super::{
    latest, macd, relative_strength_index, simple_moving_average, IndicatorSeries, MacdPoint,
};
use crate::config::OverlayConfig;
use crate::domain::Bar;

/// Full index-aligned overlay series for a bar history.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Overlays {
    pub sma_fast: IndicatorSeries,
    pub sma_slow: IndicatorSeries,
    pub rsi: IndicatorSeries,
    pub macd: Vec<Option<MacdPoint>>,
}

/// One chart row: a bar's close next to its overlay values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OverlayPoint {
    pub timestamp: i64,
    pub close: f64,
    pub sma_fast: Option<f64>,
    pub sma_slow: Option<f64>,
    pub rsi: Option<f64>,
}

impl Overlays {
    pub fn compute(bars: &[Bar], config: &OverlayConfig) -> Self {
        Self {
            sma_fast: simple_moving_average(bars, config.sma_fast),
            sma_slow: simple_moving_average(bars, config.sma_slow),
            rsi: relative_strength_index(bars, config.rsi_period),
            macd: macd(bars, config.macd_fast, config.macd_slow, config.macd_signal),
        }
    }

    pub fn len(&self) -> usize {
        self.sma_fast.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sma_fast.is_empty()
    }

    /// Zip the overlays back onto the bars they were computed from.
    pub fn points(&self, bars: &[Bar]) -> Vec<OverlayPoint> {
        bars.iter()
            .enumerate()
            .map(|(i, bar)| OverlayPoint {
                timestamp: bar.timestamp,
                close: bar.close,
                sma_fast: self.sma_fast.get(i).copied().flatten(),
                sma_slow: self.sma_slow.get(i).copied().flatten(),
                rsi: self.rsi.get(i).copied().flatten(),
            })
            .collect()
    }
}

/// Latest value of each overlay at the end of the history.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TechnicalIndicators {
    pub sma_fast: Option<f64>,
    pub sma_slow: Option<f64>,
    pub rsi: Option<f64>,
    pub macd: Option<MacdPoint>,
}

impl TechnicalIndicators {
    pub fn latest(bars: &[Bar], config: &OverlayConfig) -> Self {
        Self::from(&Overlays::compute(bars, config))
    }
}

impl From<&Overlays> for TechnicalIndicators {
    fn from(overlays: &Overlays) -> Self {
        Self {
            sma_fast: latest(&overlays.sma_fast),
            sma_slow: latest(&overlays.sma_slow),
            rsi: latest(&overlays.rsi),
            macd: overlays.macd.last().copied().flatten(),
        }
    }
}
