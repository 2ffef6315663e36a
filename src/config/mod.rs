//! Configuration module for perpdash.
//!
//! This module provides structured configuration loading from environment variables,
//! organized by concern: what to chart, indicator parameters and the data source.

mod indicator_env_config;
mod source_config;

pub use indicator_env_config::IndicatorEnvConfig;
pub use source_config::{DataSource, SourceEnvConfig};

use crate::domain::config::DashboardConfig;
use crate::domain::market::timeframe::Timeframe;
use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

/// Main application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub dashboard: DashboardConfig,

    // Source (from SourceEnvConfig)
    pub data_source: DataSource,
    pub csv_dir: PathBuf,
    pub cache_ttl_secs: u64,
    pub refresh_interval_secs: u64,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Indicator parameters are validated here, so a bad window fails at
    /// startup rather than on the first refresh.
    pub fn from_env() -> Result<Self> {
        let pair = env::var("PAIR").unwrap_or_else(|_| "BTC/USDT".to_string());
        let timeframe_str = env::var("TIMEFRAME").unwrap_or_else(|_| "1m".to_string());
        let timeframe = Timeframe::from_str(&timeframe_str)?;
        let bar_limit = env::var("BAR_LIMIT")
            .unwrap_or_else(|_| "100".to_string())
            .parse::<usize>()
            .context("Failed to parse BAR_LIMIT")?;

        let indicators = IndicatorEnvConfig::from_env()
            .context("Failed to load indicator config")?
            .to_indicator_config()?;
        let source = SourceEnvConfig::from_env().context("Failed to load source config")?;

        let dashboard = DashboardConfig::new(pair, timeframe, bar_limit, indicators)
            .context("Invalid dashboard configuration")?;

        Ok(Self {
            dashboard,
            data_source: source.data_source,
            csv_dir: source.csv_dir,
            cache_ttl_secs: source.cache_ttl_secs,
            refresh_interval_secs: source.refresh_interval_secs,
        })
    }
}
