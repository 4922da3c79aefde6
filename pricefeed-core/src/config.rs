//! Serializable feed and session configuration.
//!
//! Every table uses `#[serde(default)]`, so a TOML file only needs the keys
//! it wants to override:
//!
//! ```toml
//! [feed]
//! initial_price = 30000.0
//! tick_volatility = 0.002
//!
//! [session]
//! trade_probability = 0.5
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;
use crate::precision::round_price;

/// Top-level config document: `[feed]` and `[session]` tables.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PriceFeedConfig {
    pub feed: FeedConfig,
    pub session: SessionConfig,
}

impl PriceFeedConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.feed.validate()?;
        self.session.validate()
    }
}

/// Generator constants.
///
/// History volatility applies once per backfilled bar, tick volatility once
/// per live micro-step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    /// Mark price before any history is generated.
    pub initial_price: f64,
    /// Hard floor applied after every price update.
    pub price_floor: f64,
    /// Bar width in milliseconds.
    pub bar_interval_ms: i64,

    /// Per-bar step scale for the historical backfill.
    pub history_volatility: f64,
    /// Upper wick scale for backfilled bars (fraction of price).
    pub history_high_wick: f64,
    /// Lower wick scale for backfilled bars (fraction of price).
    pub history_low_wick: f64,
    /// Backfilled bar volume is `base + uniform(0, 1) * range`.
    pub history_volume_base: f64,
    pub history_volume_range: f64,

    /// Per-tick step scale for live updates.
    pub tick_volatility: f64,
    /// Volume added per tick is `base + uniform(0, 1) * range`.
    pub tick_volume_base: f64,
    pub tick_volume_range: f64,

    /// Levels per side of the order book.
    pub book_depth: usize,
    /// Distance from mark to the best level, as a fraction of price.
    pub book_spread: f64,
    /// Spacing between successive levels, as a fraction of the spread.
    pub book_level_step: f64,
    pub book_quantity_min: f64,
    pub book_quantity_max: f64,

    pub trade_quantity_min: f64,
    pub trade_quantity_max: f64,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            initial_price: 50_000.0,
            price_floor: 1_000.0,
            bar_interval_ms: 60_000,
            history_volatility: 0.02,
            history_high_wick: 0.05,
            history_low_wick: 0.01,
            history_volume_base: 100.0,
            history_volume_range: 1_000.0,
            tick_volatility: 0.001,
            tick_volume_base: 1.0,
            tick_volume_range: 10.0,
            book_depth: 10,
            book_spread: 0.001,
            book_level_step: 0.1,
            book_quantity_min: 0.1,
            book_quantity_max: 5.1,
            trade_quantity_min: 0.1,
            trade_quantity_max: 2.1,
        }
    }
}

impl FeedConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("initial_price", self.initial_price)?;
        positive("price_floor", self.price_floor)?;
        if self.initial_price < self.price_floor {
            return Err(ConfigError::BelowFloor {
                initial: self.initial_price,
                floor: self.price_floor,
            });
        }
        if self.bar_interval_ms <= 0 {
            return Err(ConfigError::Zero {
                field: "bar_interval_ms",
            });
        }
        non_negative("history_volatility", self.history_volatility)?;
        non_negative("history_high_wick", self.history_high_wick)?;
        non_negative("history_low_wick", self.history_low_wick)?;
        non_negative("history_volume_base", self.history_volume_base)?;
        non_negative("history_volume_range", self.history_volume_range)?;
        non_negative("tick_volatility", self.tick_volatility)?;
        non_negative("tick_volume_base", self.tick_volume_base)?;
        non_negative("tick_volume_range", self.tick_volume_range)?;
        if self.book_depth == 0 {
            return Err(ConfigError::Zero {
                field: "book_depth",
            });
        }
        positive("book_spread", self.book_spread)?;
        non_negative("book_level_step", self.book_level_step)?;
        self.validate_book_reach()?;
        range(
            "book_quantity",
            self.book_quantity_min,
            self.book_quantity_max,
        )?;
        range(
            "trade_quantity",
            self.trade_quantity_min,
            self.trade_quantity_max,
        )
    }

    /// The mark never drops below `price_floor`, so a best level at least a
    /// cent from the mark there keeps bid and ask apart at any price.
    /// The deepest bid sits at `price * (1 - reach)` and must round to a cent.
    fn validate_book_reach(&self) -> Result<(), ConfigError> {
        if self.price_floor * self.book_spread < 0.01 {
            return Err(ConfigError::SpreadTooNarrow {
                spread: self.book_spread,
                floor: self.price_floor,
            });
        }
        let deepest = self.book_depth.saturating_sub(1) as f64;
        let reach = self.book_spread * (1.0 + deepest * self.book_level_step);
        if reach >= 1.0 || round_price(self.price_floor * (1.0 - reach)) < 0.01 {
            return Err(ConfigError::BookTooDeep { reach });
        }
        Ok(())
    }
}

/// Driver constants for [`crate::session::FeedSession`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Bars backfilled by `start()`.
    pub history_len: usize,
    /// Retained bar history; the oldest bar is dropped beyond this.
    pub max_bars: usize,
    /// Retained trade tape length.
    pub max_trades: usize,
    /// Cadence of `tick()` in milliseconds.
    pub tick_interval_ms: u64,
    /// Chance that a tick prints a trade.
    pub trade_probability: f64,
    /// Bars covered by the summary high/low.
    pub summary_window: usize,
    pub overlays: OverlayConfig,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            history_len: 100,
            max_bars: 200,
            max_trades: 50,
            tick_interval_ms: 1_000,
            trade_probability: 0.3,
            summary_window: 24,
            overlays: OverlayConfig::default(),
        }
    }
}

impl SessionConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.history_len == 0 {
            return Err(ConfigError::Zero {
                field: "history_len",
            });
        }
        if self.max_bars == 0 {
            return Err(ConfigError::Zero { field: "max_bars" });
        }
        if self.max_trades == 0 {
            return Err(ConfigError::Zero {
                field: "max_trades",
            });
        }
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::Zero {
                field: "tick_interval_ms",
            });
        }
        if !(0.0..=1.0).contains(&self.trade_probability) {
            return Err(ConfigError::Probability(self.trade_probability));
        }
        if self.summary_window == 0 {
            return Err(ConfigError::Zero {
                field: "summary_window",
            });
        }
        self.overlays.validate()
    }
}

/// Indicator periods for the chart overlays.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    pub sma_fast: usize,
    pub sma_slow: usize,
    pub rsi_period: usize,
    pub macd_fast: usize,
    pub macd_slow: usize,
    pub macd_signal: usize,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            sma_fast: 20,
            sma_slow: 50,
            rsi_period: 14,
            macd_fast: 12,
            macd_slow: 26,
            macd_signal: 9,
        }
    }
}

impl OverlayConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("sma_fast", self.sma_fast),
            ("sma_slow", self.sma_slow),
            ("rsi_period", self.rsi_period),
            ("macd_fast", self.macd_fast),
            ("macd_slow", self.macd_slow),
            ("macd_signal", self.macd_signal),
        ] {
            if value == 0 {
                return Err(ConfigError::Zero { field });
            }
        }
        range("macd_period", self.macd_fast as f64, self.macd_slow as f64)
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { field, value })
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { field, value })
    }
}

fn range(field: &'static str, min: f64, max: f64) -> Result<(), ConfigError> {
    non_negative(field, min)?;
    non_negative(field, max)?;
    if min > max {
        return Err(ConfigError::InvertedRange { field, min, max });
    }
    Ok(())
}
