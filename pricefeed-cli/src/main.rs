//! PriceFeed CLI: synthetic market data on stdout.
//!
//! Commands:
//! - `history`: seed a bar history and print one bar per line
//! - `stream`: run a session and print each tick update as a JSON line
//! - `indicators`: seed history and print overlays, latest values and summary
//! - `config`: print the default configuration as TOML
//!
//! Data goes to stdout as JSON; logs go to stderr (`RUST_LOG`, default `info`).

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::thread;
use tracing::info;
use tracing_subscriber::EnvFilter;

use pricefeed_core::clock::{Clock, ManualClock, SystemClock};
use pricefeed_core::indicators::{OverlayPoint, Overlays, TechnicalIndicators};
use pricefeed_core::summary::MarketSummary;
use pricefeed_core::{FeedSession, PriceFeed, PriceFeedConfig};

#[derive(Parser)]
#[command(
    name = "pricefeed",
    about = "PriceFeed: synthetic OHLCV, order book and trade generator"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Seed a bar history ending now and print it as JSON lines.
    History {
        /// Number of bars to seed.
        #[arg(long, default_value_t = 100)]
        count: usize,

        /// RNG seed. Defaults to the current time.
        #[arg(long)]
        seed: Option<u64>,

        /// Path to a TOML config file.
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Run a live session and print each tick update as a JSON line.
    Stream {
        /// Number of ticks to emit.
        #[arg(long, default_value_t = 60)]
        ticks: usize,

        /// RNG seed. Defaults to the current time.
        #[arg(long)]
        seed: Option<u64>,

        /// Sleep one tick interval between updates instead of simulating time.
        #[arg(long, default_value_t = false)]
        realtime: bool,

        /// Path to a TOML config file.
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Seed history and print overlays, latest indicator values and summary.
    Indicators {
        /// Number of bars to seed. Defaults to the configured history length.
        #[arg(long)]
        count: Option<usize>,

        /// RNG seed. Defaults to the current time.
        #[arg(long)]
        seed: Option<u64>,

        /// Path to a TOML config file.
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Print the default configuration as TOML.
    Config,
}

#[derive(Serialize)]
struct IndicatorReport {
    points: Vec<OverlayPoint>,
    latest: TechnicalIndicators,
    summary: Option<MarketSummary>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::History {
            count,
            seed,
            config,
        } => run_history(count, seed, config.as_deref()),
        Commands::Stream {
            ticks,
            seed,
            realtime,
            config,
        } => run_stream(ticks, seed, realtime, config.as_deref()),
        Commands::Indicators {
            count,
            seed,
            config,
        } => run_indicators(count, seed, config.as_deref()),
        Commands::Config => run_config(),
    }
}

fn load_config(path: Option<&Path>) -> Result<PriceFeedConfig> {
    match path {
        Some(path) => PriceFeedConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display())),
        None => Ok(PriceFeedConfig::default()),
    }
}

fn resolve_seed(seed: Option<u64>) -> u64 {
    let seed = seed.unwrap_or_else(|| SystemClock.now_ms().unsigned_abs());
    info!(seed, "using seed");
    seed
}

fn run_history(count: usize, seed: Option<u64>, config_path: Option<&Path>) -> Result<()> {
    if count == 0 {
        bail!("--count must be at least 1");
    }
    let config = load_config(config_path)?;
    let seed = resolve_seed(seed);

    let mut feed = PriceFeed::from_seed(config.feed, seed);
    let bars = feed.seed_history(count, SystemClock.now_ms());

    let mut out = BufWriter::new(io::stdout().lock());
    for bar in &bars {
        serde_json::to_writer(&mut out, bar)?;
        writeln!(out)?;
    }
    out.flush()?;
    Ok(())
}

fn run_stream(
    ticks: usize,
    seed: Option<u64>,
    realtime: bool,
    config_path: Option<&Path>,
) -> Result<()> {
    let config = load_config(config_path)?;
    let seed = resolve_seed(seed);

    if realtime {
        let mut session = FeedSession::try_from_seed(&config, SystemClock, seed)?;
        session.start();
        let interval = session.tick_interval();
        stream_ticks(ticks, &mut session, |_| thread::sleep(interval))
    } else {
        let clock = ManualClock::new(SystemClock.now_ms());
        let step = i64::try_from(config.session.tick_interval_ms)
            .context("tick_interval_ms does not fit in epoch milliseconds")?;
        let mut session = FeedSession::try_from_seed(&config, clock.clone(), seed)?;
        session.start();
        stream_ticks(ticks, &mut session, |_| clock.advance(step))
    }
}

/// Emit `ticks` updates, calling `wait` before each one.
fn stream_ticks<C: Clock>(
    ticks: usize,
    session: &mut FeedSession<C>,
    mut wait: impl FnMut(usize),
) -> Result<()> {
    let mut out = io::stdout().lock();
    for i in 0..ticks {
        wait(i);
        if let Some(update) = session.tick() {
            serde_json::to_writer(&mut out, &update)?;
            writeln!(out)?;
            out.flush()?;
        }
    }

    info!(
        bars = session.history().len(),
        trades = session.trades().len(),
        "stream finished"
    );
    Ok(())
}

fn run_indicators(
    count: Option<usize>,
    seed: Option<u64>,
    config_path: Option<&Path>,
) -> Result<()> {
    let mut config = load_config(config_path)?;
    if let Some(count) = count {
        if count == 0 {
            bail!("--count must be at least 1");
        }
        config.session.history_len = count;
        config.session.max_bars = config.session.max_bars.max(count);
    }
    let seed = resolve_seed(seed);

    let mut session = FeedSession::try_from_seed(&config, SystemClock, seed)?;
    session.start();

    let overlays: Overlays = session.overlays();
    let report = IndicatorReport {
        points: overlays.points(session.history()),
        latest: TechnicalIndicators::from(&overlays),
        summary: session.summary(),
    };

    let mut out = io::stdout().lock();
    serde_json::to_writer_pretty(&mut out, &report)?;
    writeln!(out)?;
    Ok(())
}

fn run_config() -> Result<()> {
    let toml = PriceFeedConfig::default().to_toml_string()?;
    print!("{toml}");
    Ok(())
}
