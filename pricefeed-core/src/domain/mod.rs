//! Domain types for PriceFeed

pub mod bar;
pub mod book;
pub mod ids;
pub mod trade;

pub use bar::Bar;
pub use book::{BookLevel, OrderBook};
pub use ids::TradeId;
pub use trade::{Side, Trade};
