//! Look-ahead contamination tests for every indicator.
//!
//! No indicator value at bar t may depend on price data from bar t+1 or later.
//!
//! Method: compute on a truncated series (bars 0..100) and the full series
//! (bars 0..200). Bars 0..100 must be identical between both runs. Any
//! difference means the indicator is leaking future data into past values.

use pricefeed_core::domain::Bar;
use pricefeed_core::indicators::{macd, Ema, Indicator, MacdPoint, Rsi, Sma};
use pricefeed_core::{FeedConfig, PriceFeed};

/// `n` bars from the seeded generator.
fn make_test_bars(n: usize) -> Vec<Bar> {
    let mut feed = PriceFeed::from_seed(FeedConfig::default(), 0x1ead);
    feed.seed_history(n, 1_700_000_000_000)
}

fn assert_same_prefix(name: &str, truncated: &[Option<f64>], full: &[Option<f64>]) {
    for (i, (t, f)) in truncated.iter().zip(full).enumerate() {
        match (t, f) {
            (None, None) => {}
            (Some(t), Some(f)) => assert!(
                (t - f).abs() < 1e-10,
                "{name}: look-ahead contamination at bar {i}: truncated={t}, full={f}, diff={}",
                (t - f).abs()
            ),
            _ => panic!("{name}: warm-up mismatch at bar {i} (truncated={t:?}, full={f:?})"),
        }
    }
}

/// Assert that the indicator produces identical values for bars 0..truncated_len
/// whether computed on a truncated or full series.
fn assert_no_lookahead(indicator: &dyn Indicator, full_bars: &[Bar], truncated_len: usize) {
    let truncated = &full_bars[..truncated_len];
    let full_result = indicator.compute(full_bars);
    let truncated_result = indicator.compute(truncated);

    assert_eq!(
        truncated_result.len(),
        truncated_len,
        "{}: truncated result length mismatch",
        indicator.name()
    );
    assert_eq!(
        full_result.len(),
        full_bars.len(),
        "{}: full result length mismatch",
        indicator.name()
    );

    assert_same_prefix(indicator.name(), &truncated_result, &full_result);

    let warmup = truncated_result.iter().take_while(|v| v.is_none()).count();
    assert_eq!(
        warmup,
        indicator.lookback(),
        "{}: warm-up length differs from lookback",
        indicator.name()
    );
}

fn histogram(series: &[Option<MacdPoint>]) -> Vec<Option<f64>> {
    series.iter().map(|p| p.map(|p| p.histogram)).collect()
}

#[test]
fn lookahead_sma() {
    let bars = make_test_bars(200);
    assert_no_lookahead(&Sma::new(20), &bars, 100);
    assert_no_lookahead(&Sma::new(50), &bars, 100);
}

#[test]
fn lookahead_ema() {
    let bars = make_test_bars(200);
    assert_no_lookahead(&Ema::new(12), &bars, 100);
    assert_no_lookahead(&Ema::new(26), &bars, 100);
}

#[test]
fn lookahead_rsi() {
    let bars = make_test_bars(200);
    assert_no_lookahead(&Rsi::new(14), &bars, 100);
    assert_no_lookahead(&Rsi::new(7), &bars, 100);
}

#[test]
fn lookahead_macd() {
    let bars = make_test_bars(200);
    let full = macd(&bars, 12, 26, 9);
    let truncated = macd(&bars[..100], 12, 26, 9);
    assert_eq!(truncated.len(), 100);

    assert_same_prefix("macd_12_26_9", &histogram(&truncated), &histogram(&full[..100]));
    assert_eq!(truncated.iter().take_while(|p| p.is_none()).count(), 25 + 8);
}
