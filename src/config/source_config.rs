//! Data source configuration parsing from environment variables.

use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

/// Where bars come from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSource {
    Mock,
    Csv,
}

impl FromStr for DataSource {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mock" => Ok(DataSource::Mock),
            "csv" => Ok(DataSource::Csv),
            _ => anyhow::bail!("Invalid DATA_SOURCE: {}. Must be 'mock' or 'csv'", s),
        }
    }
}

/// Source environment configuration
#[derive(Debug, Clone)]
pub struct SourceEnvConfig {
    pub data_source: DataSource,
    pub csv_dir: PathBuf,
    /// 0 disables the series cache
    pub cache_ttl_secs: u64,
    pub refresh_interval_secs: u64,
}

impl SourceEnvConfig {
    pub fn from_env() -> Result<Self> {
        let data_source_str = env::var("DATA_SOURCE").unwrap_or_else(|_| "mock".to_string());

        Ok(Self {
            data_source: DataSource::from_str(&data_source_str)?,
            csv_dir: PathBuf::from(env::var("CSV_DATA_DIR").unwrap_or_else(|_| "data".to_string())),
            cache_ttl_secs: Self::parse_u64("SERIES_CACHE_TTL_SECS", 0)?,
            refresh_interval_secs: Self::parse_u64("REFRESH_INTERVAL_SECS", 60)?,
        })
    }

    fn parse_u64(key: &str, default: u64) -> Result<u64> {
        env::var(key)
            .unwrap_or_else(|_| default.to_string())
            .parse::<u64>()
            .context(format!("Failed to parse {}", key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_source_parsing() {
        assert_eq!(DataSource::from_str("mock").unwrap(), DataSource::Mock);
        assert_eq!(DataSource::from_str("CSV").unwrap(), DataSource::Csv);
        assert!(DataSource::from_str("bitget").is_err());
    }
}
