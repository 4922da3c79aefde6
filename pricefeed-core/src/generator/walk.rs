//! Random-walk steps.
//!
//! Two step sizes drive the series: a coarse per-bar step for the historical
//! backfill and a fine per-tick step for live updates. Both apply the price
//! floor after every move.

use rand::Rng;
use tracing::trace;

use crate::config::FeedConfig;
use crate::domain::Bar;

/// `uniform(-0.5, 0.5) * price * volatility`, added to `price` and floored.
pub fn step<R: Rng + ?Sized>(rng: &mut R, price: f64, volatility: f64, floor: f64) -> f64 {
    let change = (rng.gen::<f64>() - 0.5) * price * volatility;
    (price + change).max(floor)
}

/// One backfilled bar opening at `open`.
///
/// Wicks scale with the opening price. The low wick is clamped to the floor,
/// which never violates `low <= min(open, close)` because both are already
/// at or above it.
pub fn history_bar<R: Rng + ?Sized>(
    rng: &mut R,
    config: &FeedConfig,
    timestamp: i64,
    open: f64,
) -> Bar {
    let close = step(rng, open, config.history_volatility, config.price_floor);
    let high = open.max(close) + rng.gen::<f64>() * open * config.history_high_wick;
    let low = (open.min(close) - rng.gen::<f64>() * open * config.history_low_wick)
        .max(config.price_floor);
    let volume = rng.gen::<f64>() * config.history_volume_range + config.history_volume_base;

    Bar {
        timestamp,
        open,
        high,
        low,
        close,
        volume,
    }
}

/// One live micro-step: the new mark price and the volume it prints.
pub fn tick<R: Rng + ?Sized>(rng: &mut R, config: &FeedConfig, price: f64) -> (f64, f64) {
    let next = step(rng, price, config.tick_volatility, config.price_floor);
    let volume = rng.gen::<f64>() * config.tick_volume_range + config.tick_volume_base;
    trace!(from = price, to = next, volume, "tick");
    (next, volume)
}
