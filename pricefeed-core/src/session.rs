//! Session driver: the consumer loop around a [`PriceFeed`].
//!
//! A session owns the retained history, the latest order book and the trade
//! tape. Each `tick()` asks the generator for the open bar and decides
//! whether it replaces the last history bar (same timestamp) or starts a new
//! one, then trims history and tape to their configured lengths.

use rand::rngs::StdRng;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};

use crate::clock::Clock;
use crate::config::{PriceFeedConfig, SessionConfig};
use crate::domain::{Bar, OrderBook, Trade};
use crate::error::ConfigError;
use crate::generator::PriceFeed;
use crate::indicators::{Overlays, TechnicalIndicators};
use crate::rng::{SeedBank, SESSION_STREAM};
use crate::summary::MarketSummary;

/// How a tick's bar landed in the history buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BarEvent {
    /// The open bar was updated in place.
    Replaced,
    /// A new bar was appended.
    Appended,
}

/// Everything that changed during one tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickUpdate {
    pub timestamp: i64,
    pub bar: Bar,
    pub bar_event: BarEvent,
    pub order_book: OrderBook,
    pub trade: Option<Trade>,
}

pub struct FeedSession<C, R = StdRng> {
    feed: PriceFeed<R>,
    clock: C,
    config: SessionConfig,
    rng: R,
    history: Vec<Bar>,
    order_book: OrderBook,
    trades: Vec<Trade>,
    live: bool,
}

impl<C: Clock> FeedSession<C, StdRng> {
    /// Seeded session: feed streams and the session's trade dice all derive
    /// from `seed`. `config` must already be validated; see
    /// [`FeedSession::try_from_seed`].
    pub fn from_seed(config: &PriceFeedConfig, clock: C, seed: u64) -> Self {
        let feed = PriceFeed::from_seed(config.feed.clone(), seed);
        let rng = SeedBank::new(seed).rng_for(SESSION_STREAM);
        Self::new(feed, clock, config.session.clone(), rng)
    }

    /// [`FeedSession::from_seed`] after running [`PriceFeedConfig::validate`].
    pub fn try_from_seed(
        config: &PriceFeedConfig,
        clock: C,
        seed: u64,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_seed(config, clock, seed))
    }
}

impl<C: Clock, R: Rng> FeedSession<C, R> {
    /// `config` is assumed already validated (see [`SessionConfig::validate`]).
    /// `tick()` panics if `trade_probability` lies outside `[0, 1]`.
    pub fn new(feed: PriceFeed<R>, clock: C, config: SessionConfig, rng: R) -> Self {
        Self {
            feed,
            clock,
            config,
            rng,
            history: Vec::new(),
            order_book: OrderBook::default(),
            trades: Vec::new(),
            live: true,
        }
    }

    /// Backfill `history_len` bars ending now and take a first order book.
    pub fn start(&mut self) -> &[Bar] {
        let now = self.clock.now_ms();
        self.history = self.feed.seed_history(self.config.history_len, now);
        trim_front(&mut self.history, self.config.max_bars);
        self.order_book = self.feed.order_book_snapshot();
        info!(
            bars = self.history.len(),
            tick_interval_ms = self.config.tick_interval_ms,
            "session started"
        );
        &self.history
    }

    /// One update at the clock's current time. A paused session returns
    /// `None` and leaves the generator untouched.
    pub fn tick(&mut self) -> Option<TickUpdate> {
        if !self.live {
            return None;
        }

        let now = self.clock.now_ms();
        let bar = self.feed.next_bar(now);
        let bar_event = self.apply_bar(bar);

        self.order_book = self.feed.order_book_snapshot();

        let trade = if self.rng.gen_bool(self.config.trade_probability) {
            let trade = self.feed.sample_trade(now);
            self.trades.push(trade.clone());
            trim_front(&mut self.trades, self.config.max_trades);
            Some(trade)
        } else {
            None
        };

        debug!(
            now,
            close = bar.close,
            event = ?bar_event,
            traded = trade.is_some(),
            "tick"
        );

        Some(TickUpdate {
            timestamp: now,
            bar,
            bar_event,
            order_book: self.order_book.clone(),
            trade,
        })
    }

    fn apply_bar(&mut self, bar: Bar) -> BarEvent {
        match self.history.last_mut() {
            Some(last) if last.timestamp == bar.timestamp => {
                *last = bar;
                BarEvent::Replaced
            }
            _ => {
                self.history.push(bar);
                trim_front(&mut self.history, self.config.max_bars);
                BarEvent::Appended
            }
        }
    }

    pub fn pause(&mut self) {
        if self.live {
            info!("session paused");
        }
        self.live = false;
    }

    pub fn resume(&mut self) {
        if !self.live {
            info!("session resumed");
        }
        self.live = true;
    }

    pub fn is_live(&self) -> bool {
        self.live
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.config.tick_interval_ms)
    }

    pub fn history(&self) -> &[Bar] {
        &self.history
    }

    pub fn order_book(&self) -> &OrderBook {
        &self.order_book
    }

    pub fn trades(&self) -> &[Trade] {
        &self.trades
    }

    pub fn feed(&self) -> &PriceFeed<R> {
        &self.feed
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Overlays recomputed over the retained history.
    pub fn overlays(&self) -> Overlays {
        Overlays::compute(&self.history, &self.config.overlays)
    }

    pub fn indicators(&self) -> TechnicalIndicators {
        TechnicalIndicators::latest(&self.history, &self.config.overlays)
    }

    pub fn summary(&self) -> Option<MarketSummary> {
        MarketSummary::from_history(&self.history, self.config.summary_window)
    }
}

/// Drop the oldest entries so at most `max` remain.
fn trim_front<T>(items: &mut Vec<T>, max: usize) {
    if items.len() > max {
        let excess = items.len() - max;
        items.drain(..excess);
    }
}
