//! Order book ladder around the mark price.

use rand::Rng;

use crate::config::FeedConfig;
use crate::domain::{BookLevel, OrderBook};
use crate::precision::{round_price, round_quantity};

/// Build a full-depth snapshot from `price`.
///
/// With spread base `s = price * book_spread`, level `i` sits at
/// `price -/+ (s + i * s * book_level_step)`. The bid and ask at the same
/// depth share one sampled quantity.
pub fn build<R: Rng + ?Sized>(rng: &mut R, config: &FeedConfig, price: f64) -> OrderBook {
    let spread = price * config.book_spread;
    let mut bids = Vec::with_capacity(config.book_depth);
    let mut asks = Vec::with_capacity(config.book_depth);

    for i in 0..config.book_depth {
        let offset = spread + i as f64 * spread * config.book_level_step;
        let quantity = round_quantity(
            config.book_quantity_min
                + rng.gen::<f64>() * (config.book_quantity_max - config.book_quantity_min),
        );
        bids.push(level(price - offset, quantity));
        asks.push(level(price + offset, quantity));
    }

    OrderBook { bids, asks }
}

fn level(raw_price: f64, quantity: f64) -> BookLevel {
    let price = round_price(raw_price);
    BookLevel {
        price,
        quantity,
        total: round_price(price * quantity),
    }
}
