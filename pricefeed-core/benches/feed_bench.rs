//! Criterion benchmarks for PriceFeed hot paths.
//!
//! Benchmarks:
//! 1. History backfill (seed_history at dashboard and large sizes)
//! 2. Live tick loop (next_bar, order book, trade sampling)
//! 3. Indicator pass (single indicators and the full overlay bundle)
//! 4. Session tick with per-tick overlay recompute

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use pricefeed_core::clock::ManualClock;
use pricefeed_core::domain::Bar;
use pricefeed_core::indicators::{Ema, Indicator, Overlays, Rsi, Sma};
use pricefeed_core::{FeedConfig, FeedSession, OverlayConfig, PriceFeed, PriceFeedConfig};

const NOW: i64 = 1_700_000_000_000;

// ── Helpers ──────────────────────────────────────────────────────────

fn make_bars(n: usize) -> Vec<Bar> {
    PriceFeed::from_seed(FeedConfig::default(), 42).seed_history(n, NOW)
}

// ── 1. History Backfill ──────────────────────────────────────────────

fn bench_seed_history(c: &mut Criterion) {
    let mut group = c.benchmark_group("seed_history");

    for &count in &[100, 1_000, 10_000] {
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            b.iter(|| {
                let mut feed = PriceFeed::from_seed(FeedConfig::default(), 7);
                black_box(feed.seed_history(black_box(count), NOW))
            });
        });
    }

    group.finish();
}

// ── 2. Live Tick Loop ────────────────────────────────────────────────

fn bench_tick_loop(c: &mut Criterion) {
    let mut group = c.benchmark_group("tick_loop");

    group.bench_function("next_bar_600", |b| {
        b.iter(|| {
            let mut feed = PriceFeed::from_seed(FeedConfig::default(), 7);
            feed.seed_history(100, NOW);
            for s in 1..=600 {
                black_box(feed.next_bar(NOW + s * 1_000));
            }
        });
    });

    group.bench_function("next_bar_book_trade_600", |b| {
        b.iter(|| {
            let mut feed = PriceFeed::from_seed(FeedConfig::default(), 7);
            feed.seed_history(100, NOW);
            for s in 1..=600 {
                let now = NOW + s * 1_000;
                black_box(feed.next_bar(now));
                black_box(feed.order_book_snapshot());
                black_box(feed.sample_trade(now));
            }
        });
    });

    group.finish();
}

// ── 3. Indicator Pass ────────────────────────────────────────────────

fn bench_indicators(c: &mut Criterion) {
    let mut group = c.benchmark_group("indicator_pass");
    let overlay_config = OverlayConfig::default();

    for &bar_count in &[200, 2_000] {
        let bars = make_bars(bar_count);

        let singles: Vec<Box<dyn Indicator>> = vec![
            Box::new(Sma::new(20)),
            Box::new(Sma::new(50)),
            Box::new(Ema::new(26)),
            Box::new(Rsi::new(14)),
        ];
        for indicator in &singles {
            group.bench_with_input(
                BenchmarkId::new(indicator.name().to_string(), bar_count),
                &bar_count,
                |b, _| {
                    b.iter(|| indicator.compute(black_box(&bars)));
                },
            );
        }

        group.bench_with_input(
            BenchmarkId::new("overlays", bar_count),
            &bar_count,
            |b, _| {
                b.iter(|| Overlays::compute(black_box(&bars), black_box(&overlay_config)));
            },
        );
    }

    group.finish();
}

// ── 4. Session Tick ──────────────────────────────────────────────────

fn bench_session(c: &mut Criterion) {
    let mut group = c.benchmark_group("session");
    let config = PriceFeedConfig::default();

    // A dashboard redraws overlays after every tick
    group.bench_function("tick_and_overlays_60", |b| {
        b.iter(|| {
            let clock = ManualClock::new(NOW);
            let mut session = FeedSession::from_seed(&config, clock.clone(), 7);
            session.start();
            for _ in 0..60 {
                clock.advance(1_000);
                black_box(session.tick());
                black_box(session.overlays());
            }
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_seed_history,
    bench_tick_loop,
    bench_indicators,
    bench_session,
);
criterion_main!(benches);
