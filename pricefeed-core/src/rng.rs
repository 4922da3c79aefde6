//! Deterministic seed derivation.
//!
//! A master seed is expanded into one sub-seed per named random stream. Each
//! consumer of randomness (price walk, order book quantities, trade tape,
//! session dice) draws from its own stream, so sampling an extra order book
//! or trade never shifts the price path produced by a given master seed.

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Stream driving the price random walk and bar volumes.
pub const WALK_STREAM: &str = "walk";
/// Stream driving order book level quantities.
pub const BOOK_STREAM: &str = "book";
/// Stream driving trade size, side and id.
pub const TAPE_STREAM: &str = "tape";
/// Stream deciding whether a session tick prints a trade.
pub const SESSION_STREAM: &str = "session";

/// Expands a master seed into per-stream sub-seeds.
///
/// Derivation is hash-based, not order-dependent: asking for the `book`
/// stream before or after the `walk` stream yields the same seeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedBank {
    master_seed: u64,
}

impl SeedBank {
    pub fn new(master_seed: u64) -> Self {
        Self { master_seed }
    }

    pub fn master_seed(&self) -> u64 {
        self.master_seed
    }

    /// Derive a deterministic sub-seed for a named stream.
    pub fn sub_seed(&self, stream: &str) -> u64 {
        let mut hasher = blake3::Hasher::new();
        hasher.update(&self.master_seed.to_le_bytes());
        hasher.update(stream.as_bytes());
        let hash = hasher.finalize();
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(&hash.as_bytes()[..8]);
        u64::from_le_bytes(bytes)
    }

    /// Create a seeded StdRng for a named stream.
    pub fn rng_for(&self, stream: &str) -> StdRng {
        StdRng::seed_from_u64(self.sub_seed(stream))
    }
}
