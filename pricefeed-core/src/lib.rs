//! PriceFeed Core: synthetic market data and chart indicators.
//!
//! This crate contains the simulation engine behind a live trading dashboard:
//! - Domain types (bars, order book levels, trades)
//! - A seeded price-walk generator for history backfill and live bar updates
//! - Order book and trade tape sampling around the mark price
//! - Pure indicator functions (SMA, RSI, EMA, MACD) and chart overlays
//! - A session driver that keeps bounded history and trade buffers

pub mod clock;
pub mod config;
pub mod domain;
pub mod error;
pub mod generator;
pub mod indicators;
pub mod precision;
pub mod rng;
pub mod session;
pub mod summary;

pub use config::{FeedConfig, OverlayConfig, PriceFeedConfig, SessionConfig};
pub use error::ConfigError;
pub use generator::PriceFeed;
pub use session::{BarEvent, FeedSession, TickUpdate};

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: a feed and everything it emits can move to a
    /// worker thread.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        // Domain types
        require_send::<domain::Bar>();
        require_sync::<domain::Bar>();
        require_send::<domain::OrderBook>();
        require_sync::<domain::OrderBook>();
        require_send::<domain::Trade>();
        require_sync::<domain::Trade>();
        require_send::<domain::TradeId>();
        require_sync::<domain::TradeId>();

        // Indicator output
        require_send::<indicators::Overlays>();
        require_sync::<indicators::Overlays>();
        require_send::<indicators::TechnicalIndicators>();
        require_sync::<indicators::TechnicalIndicators>();

        // Engine state
        require_send::<PriceFeed>();
        require_send::<FeedSession<clock::ManualClock>>();
        require_send::<FeedSession<clock::SystemClock>>();
        require_send::<TickUpdate>();
        require_sync::<TickUpdate>();
        require_send::<rng::SeedBank>();
        require_sync::<rng::SeedBank>();
    }
}
