//! Decimal rounding for externally visible values.
//!
//! Prices, totals and volumes are published at 2 decimal places, quantities
//! at 4. Internal state is kept at full precision and only rounded when a
//! snapshot leaves the engine.

pub const PRICE_DECIMALS: u32 = 2;
pub const QUANTITY_DECIMALS: u32 = 4;

/// Round half away from zero to `decimals` places.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

pub fn round_price(value: f64) -> f64 {
    round_to(value, PRICE_DECIMALS)
}

pub fn round_quantity(value: f64) -> f64 {
    round_to(value, QUANTITY_DECIMALS)
}
