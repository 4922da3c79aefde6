//! Trade tape sampling.

use rand::Rng;

use crate::config::FeedConfig;
use crate::domain::{Side, Trade, TradeId};
use crate::precision::{round_price, round_quantity};

/// Sample one trade at the mark price with a random side and size.
pub fn sample<R: Rng + ?Sized>(rng: &mut R, config: &FeedConfig, price: f64, now: i64) -> Trade {
    let quantity = config.trade_quantity_min
        + rng.gen::<f64>() * (config.trade_quantity_max - config.trade_quantity_min);
    let side = if rng.gen_bool(0.5) {
        Side::Buy
    } else {
        Side::Sell
    };

    Trade {
        id: TradeId::random(rng),
        price: round_price(price),
        quantity: round_quantity(quantity),
        side,
        timestamp: now,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn trade_prints_at_mark() {
        let mut rng = StdRng::seed_from_u64(1);
        let trade = sample(&mut rng, &FeedConfig::default(), 50_000.126, 1_234);
        assert_eq!(trade.price, 50_000.13);
        assert_eq!(trade.timestamp, 1_234);
        assert!((0.1..=2.1).contains(&trade.quantity));
    }

    #[test]
    fn both_sides_appear() {
        let mut rng = StdRng::seed_from_u64(2);
        let config = FeedConfig::default();
        let buys = (0..1_000)
            .filter(|_| sample(&mut rng, &config, 50_000.0, 0).side == Side::Buy)
            .count();
        // Fair coin: 1000 flips land well inside [400, 600]
        assert!((400..=600).contains(&buys), "buys = {buys}");
    }
}
