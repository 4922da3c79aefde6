//! Price series generator.
//!
//! [`PriceFeed`] owns the evolving simulation state: the mark price, the bar
//! currently in progress, and the boundary timestamp of the last opened bar.
//! Every output (backfilled history, live bar updates, order book snapshots
//! and trades) is derived from that one mark price.
//!
//! Time is never read from the wall clock here. Callers pass `now` in epoch
//! milliseconds and must keep it non-decreasing across calls.

pub mod book;
pub mod tape;
pub mod walk;

use rand::rngs::StdRng;
use rand::Rng;
use tracing::{debug, info};

use crate::config::FeedConfig;
use crate::domain::{Bar, OrderBook, Trade};
use crate::precision::round_price;
use crate::rng::{SeedBank, BOOK_STREAM, TAPE_STREAM, WALK_STREAM};

/// Caller-owned generator state.
///
/// Randomness is injected as three independent streams: the price walk, the
/// order book quantities and the trade tape. Only the walk stream moves the
/// mark price, so sampling books or trades never changes the path.
#[derive(Debug, Clone)]
pub struct PriceFeed<R = StdRng> {
    config: FeedConfig,
    current_price: f64,
    open_bar: Option<Bar>,
    last_boundary: Option<i64>,
    walk_rng: R,
    book_rng: R,
    tape_rng: R,
}

impl PriceFeed<StdRng> {
    /// Seeded feed with per-stream RNGs derived from `seed`.
    pub fn from_seed(config: FeedConfig, seed: u64) -> Self {
        let bank = SeedBank::new(seed);
        Self::with_rngs(
            config,
            bank.rng_for(WALK_STREAM),
            bank.rng_for(BOOK_STREAM),
            bank.rng_for(TAPE_STREAM),
        )
    }
}

impl<R: Rng> PriceFeed<R> {
    /// `config` is assumed already validated (see [`FeedConfig::validate`]).
    pub fn with_rngs(config: FeedConfig, walk_rng: R, book_rng: R, tape_rng: R) -> Self {
        Self {
            current_price: config.initial_price,
            config,
            open_bar: None,
            last_boundary: None,
            walk_rng,
            book_rng,
            tape_rng,
        }
    }

    pub fn config(&self) -> &FeedConfig {
        &self.config
    }

    pub fn current_price(&self) -> f64 {
        self.current_price
    }

    /// Rounded copy of the bar in progress, if any.
    pub fn open_bar(&self) -> Option<Bar> {
        self.open_bar.map(|bar| bar.rounded())
    }

    /// Timestamp at which the most recent bar boundary was observed.
    pub fn last_boundary(&self) -> Option<i64> {
        self.last_boundary
    }

    /// Fabricate `count` closed bars ending one interval before `now`.
    ///
    /// Timestamps run `now - count * interval, ..., now - interval`; each bar
    /// opens at the previous close. The walk continues from the current mark
    /// price (the configured initial price on a fresh feed), and afterwards
    /// the mark sits at the last close with `now` as the pending boundary.
    /// Any bar in progress is discarded, so calling this again restarts the
    /// series cleanly.
    pub fn seed_history(&mut self, count: usize, now: i64) -> Vec<Bar> {
        let interval = self.config.bar_interval_ms;
        let span = interval.saturating_mul(count as i64);
        let mut timestamp = now.saturating_sub(span);
        let mut price = self.current_price;
        let mut bars = Vec::with_capacity(count);

        for _ in 0..count {
            let bar = walk::history_bar(&mut self.walk_rng, &self.config, timestamp, price);
            price = bar.close;
            bars.push(bar.rounded());
            timestamp = timestamp.saturating_add(interval);
        }

        self.current_price = price;
        self.last_boundary = Some(timestamp);
        self.open_bar = None;

        info!(
            count,
            last_close = round_price(price),
            boundary = timestamp,
            "seeded price history"
        );
        bars
    }

    /// Advance the live series by one tick at time `now`.
    ///
    /// When no bar is open, or `now` is at least one interval past the last
    /// boundary, the bar in progress closes and a new one opens flat at the
    /// mark price, stamped with the previous boundary. Then the mark takes one
    /// micro-step and the open bar absorbs it. Returns a rounded copy of the
    /// open bar; a caller holding history replaces its last bar when the
    /// timestamp matches and appends otherwise.
    pub fn next_bar(&mut self, now: i64) -> Bar {
        let interval = self.config.bar_interval_ms;
        let crossed = self
            .last_boundary
            .map_or(true, |last| now.saturating_sub(last) >= interval);

        let mut bar = match self.open_bar.take() {
            Some(bar) if !crossed => bar,
            previous => {
                if let Some(closed) = previous {
                    let closed = closed.rounded();
                    debug!(
                        timestamp = closed.timestamp,
                        open = closed.open,
                        high = closed.high,
                        low = closed.low,
                        close = closed.close,
                        volume = closed.volume,
                        "bar closed"
                    );
                }
                let timestamp = self.last_boundary.unwrap_or(now);
                self.last_boundary = Some(now);
                Bar::flat(timestamp, self.current_price)
            }
        };

        let (price, volume) = walk::tick(&mut self.walk_rng, &self.config, self.current_price);
        self.current_price = price;
        bar.absorb(price, volume);
        self.open_bar = Some(bar);

        bar.rounded()
    }

    /// Order book around the current mark. Does not move the mark.
    pub fn order_book_snapshot(&mut self) -> OrderBook {
        book::build(&mut self.book_rng, &self.config, self.current_price)
    }

    /// One trade at the current mark, stamped `now`. Does not move the mark.
    pub fn sample_trade(&mut self, now: i64) -> Trade {
        tape::sample(&mut self.tape_rng, &self.config, self.current_price, now)
    }
}
