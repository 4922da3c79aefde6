//! Trade: a single print on the tape.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::TradeId;

/// Aggressor side of a trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Buy,
    Sell,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Buy => write!(f, "buy"),
            Side::Sell => write!(f, "sell"),
        }
    }
}

/// Ephemeral trade event. Consecutive trades carry no relationship.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    pub id: TradeId,
    pub price: f64,
    pub quantity: f64,
    pub side: Side,
    pub timestamp: i64,
}

impl Trade {
    /// Notional value of the print.
    pub fn notional(&self) -> f64 {
        self.price * self.quantity
    }
}
