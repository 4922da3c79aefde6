use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque trade identifier: 64 random bits rendered as 16 hex digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TradeId(pub String);

impl TradeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Draw a fresh id from `rng`.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self(format!("{:016x}", rng.gen::<u64>()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TradeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
