//! Error types.
//!
//! The numeric engine itself is total; only configuration crosses a
//! boundary where input can be malformed.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to render TOML: {0}")]
    Render(#[from] toml::ser::Error),

    #[error("{field} must be a finite number greater than zero (got {value})")]
    NotPositive { field: &'static str, value: f64 },

    #[error("{field} must be a finite, non-negative number (got {value})")]
    Negative { field: &'static str, value: f64 },

    #[error("{field} must be at least 1")]
    Zero { field: &'static str },

    #[error("{field}: minimum {min} exceeds maximum {max}")]
    InvertedRange {
        field: &'static str,
        min: f64,
        max: f64,
    },

    #[error("trade_probability must lie in [0, 1] (got {0})")]
    Probability(f64),

    #[error(
        "book_spread {spread} is too narrow: at price_floor {floor} the best levels \
         would sit less than a cent from the mark"
    )]
    SpreadTooNarrow { spread: f64, floor: f64 },

    #[error(
        "order book reaches {reach} of the mark at its deepest level; bids would not stay \
         above zero (book_spread * (1 + (book_depth - 1) * book_level_step) must stay below 1)"
    )]
    BookTooDeep { reach: f64 },

    #[error("initial_price {initial} is below price_floor {floor}")]
    BelowFloor { initial: f64, floor: f64 },
}
