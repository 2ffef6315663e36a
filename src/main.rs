//! perpdash - headless futures chart dashboard
//!
//! Polls one pair, prints indicator readings and signals, and logs a
//! countdown to the next candle close every second.
//!
//! # Usage
//! ```sh
//! PAIR=ETH/USDT TIMEFRAME=15m cargo run -- --once
//! cargo run -- --source csv --csv-dir data --timeframe 1h --json --once
//! RUST_LOG=perpdash=debug cargo run
//! ```
//!
//! Logging is always at least INFO. A bare `RUST_LOG=debug` is overridden by
//! that floor, so cache, engine and detector debug logs need a target
//! directive such as `perpdash=debug`.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::Parser;
use perpdash::application::countdown::CountdownCalculator;
use perpdash::application::market_data::CachedMarketDataService;
use perpdash::application::pipeline::{DashboardPipeline, DashboardSnapshot};
use perpdash::config::{Config, DataSource};
use perpdash::domain::market::timeframe::Timeframe;
use perpdash::domain::ports::MarketDataService;
use perpdash::infrastructure::{CsvMarketDataService, MockMarketDataService};
use perpdash::interfaces::report::{DashboardReport, to_json};
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tracing::{Level, debug, error, info, warn};
use tracing_subscriber::prelude::*;

#[derive(Parser)]
#[command(author, version, about = "Headless perpetual futures chart dashboard", long_about = None)]
struct Args {
    /// Pair to chart, e.g. BTC/USDT (overrides PAIR)
    #[arg(long)]
    pair: Option<String>,

    /// One of 1m 3m 5m 15m 30m 1h 2h 4h 6h 8h 12h 1d 1w (overrides TIMEFRAME)
    #[arg(long)]
    timeframe: Option<String>,

    /// Number of bars to fetch (overrides BAR_LIMIT)
    #[arg(long)]
    limit: Option<usize>,

    /// mock or csv (overrides DATA_SOURCE)
    #[arg(long)]
    source: Option<String>,

    /// Directory of <BASE>_<QUOTE>_<tf>.csv files (overrides CSV_DATA_DIR)
    #[arg(long)]
    csv_dir: Option<PathBuf>,

    /// Seconds between full refreshes (overrides REFRESH_INTERVAL_SECS)
    #[arg(long)]
    refresh_secs: Option<u64>,

    /// Refresh once, print and exit
    #[arg(long)]
    once: bool,

    /// Print snapshots as JSON instead of the text report
    #[arg(long)]
    json: bool,
}

impl Args {
    fn apply(&self, config: &mut Config) -> Result<()> {
        if let Some(pair) = &self.pair {
            config.dashboard.pair = pair.clone();
        }
        if let Some(timeframe) = &self.timeframe {
            config.dashboard.timeframe = Timeframe::from_str(timeframe)?;
        }
        if let Some(limit) = self.limit {
            config.dashboard.bar_limit = limit;
        }
        if let Some(source) = &self.source {
            config.data_source = DataSource::from_str(source)?;
        }
        if let Some(dir) = &self.csv_dir {
            config.csv_dir = dir.clone();
        }
        if let Some(secs) = self.refresh_secs {
            config.refresh_interval_secs = secs;
        }
        config
            .dashboard
            .validate()
            .context("Invalid command line overrides")?;
        Ok(())
    }
}

fn build_source(config: &Config) -> Arc<dyn MarketDataService> {
    let source: Arc<dyn MarketDataService> = match config.data_source {
        DataSource::Mock => Arc::new(MockMarketDataService::new()),
        DataSource::Csv => {
            let csv = CsvMarketDataService::new(config.csv_dir.clone());
            info!("Reading candles from {}", csv.dir().display());
            Arc::new(csv)
        }
    };

    if config.cache_ttl_secs > 0 {
        let ttl = Duration::from_secs(config.cache_ttl_secs);
        let cache = CachedMarketDataService::new(source, ttl);
        info!("Series cache enabled (ttl: {:?})", cache.ttl());
        Arc::new(cache)
    } else {
        source
    }
}

fn print_snapshot(snapshot: &DashboardSnapshot, json: bool) -> Result<()> {
    if json {
        println!("{}", to_json(snapshot).context("Failed to serialize snapshot")?);
    } else {
        println!("{}\n", DashboardReport::from_snapshot(snapshot));
    }
    Ok(())
}

/// Bar-open time of the latest snapshot, used to drive the countdown
fn last_bar_open(snapshot: &DashboardSnapshot) -> Option<DateTime<Utc>> {
    snapshot.series().last().map(|bar| bar.timestamp)
}

async fn refresh(
    pipeline: &DashboardPipeline,
    json: bool,
    latest: &mut Option<DashboardSnapshot>,
) -> Result<()> {
    match pipeline.refresh().await {
        Ok(snapshot) => {
            print_snapshot(&snapshot, json)?;
            *latest = Some(snapshot);
        }
        Err(e) => {
            // Keep showing the previous snapshot; the next tick tries again
            warn!("Refresh failed: {}", e);
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let args = Args::parse();

    // Logs go to stderr so stdout stays clean for reports and JSON
    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr)
        .pretty();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with(stderr_layer)
        .init();

    info!("perpdash {} starting...", env!("CARGO_PKG_VERSION"));

    let mut config = Config::from_env()?;
    args.apply(&mut config)?;
    info!(
        "Configuration loaded: Pair={}, Timeframe={}, Bars={}, Source={:?}",
        config.dashboard.pair,
        config.dashboard.timeframe,
        config.dashboard.bar_limit,
        config.data_source
    );

    let source = build_source(&config);
    let pipeline = DashboardPipeline::new(source, config.dashboard.clone())?;

    if args.once {
        let snapshot = pipeline.refresh().await?;
        return print_snapshot(&snapshot, args.json);
    }

    let pair = pipeline.config().pair.clone();
    let timeframe = pipeline.config().timeframe;
    let mut latest: Option<DashboardSnapshot> = None;
    // Boundary that already triggered an early refresh, so a stale source is not hammered
    let mut refreshed_boundary: Option<DateTime<Utc>> = None;

    let mut refresh_timer =
        tokio::time::interval(Duration::from_secs(config.refresh_interval_secs.max(1)));
    let mut countdown_timer = tokio::time::interval(Duration::from_secs(1));

    info!("Dashboard running. Press Ctrl+C to stop.");

    loop {
        tokio::select! {
            _ = refresh_timer.tick() => {
                refresh(&pipeline, args.json, &mut latest).await?;
            }
            _ = countdown_timer.tick() => {
                let Some(last_open) = latest.as_ref().and_then(last_bar_open) else {
                    continue;
                };
                let countdown = CountdownCalculator::now(timeframe, last_open);

                if countdown.is_closed() {
                    if refreshed_boundary != Some(countdown.next_boundary) {
                        refreshed_boundary = Some(countdown.next_boundary);
                        debug!("Candle closed at {}, refreshing", countdown.next_boundary);
                        refresh(&pipeline, args.json, &mut latest).await?;
                    }
                } else {
                    info!("{} {} next candle in {}", pair, timeframe, countdown);
                }
            }
            result = tokio::signal::ctrl_c() => {
                if let Err(e) = result {
                    error!("Failed to listen for Ctrl+C: {}", e);
                }
                info!("Shutdown signal received. Exiting...");
                break;
            }
        }
    }

    Ok(())
}
