//! Dashboard Configuration Domain Value Object
//!
//! What to chart (pair, timeframe, depth) plus the indicator parameters.

use super::indicator_config::IndicatorConfig;
use crate::domain::errors::ConfigError;
use crate::domain::market::timeframe::Timeframe;
use serde::{Deserialize, Serialize};

/// Dashboard configuration value object
///
/// # Invariants
///
/// - `pair` is not blank
/// - `bar_limit` > 0
/// - `indicators` is valid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    pub pair: String,
    pub timeframe: Timeframe,
    pub bar_limit: usize,
    pub indicators: IndicatorConfig,
}

impl DashboardConfig {
    /// Create a new DashboardConfig with validation
    pub fn new(
        pair: impl Into<String>,
        timeframe: Timeframe,
        bar_limit: usize,
        indicators: IndicatorConfig,
    ) -> Result<Self, ConfigError> {
        let config = Self {
            pair: pair.into(),
            timeframe,
            bar_limit,
            indicators,
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pair.trim().is_empty() {
            return Err(ConfigError::EmptyPair);
        }
        if self.bar_limit == 0 {
            return Err(ConfigError::InvalidBarLimit {
                value: self.bar_limit,
            });
        }
        self.indicators.validate()
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            pair: "BTC/USDT".to_string(),
            timeframe: Timeframe::OneMin,
            bar_limit: 100,
            indicators: IndicatorConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_config() {
        let config = DashboardConfig::new(
            "ETH/USDT",
            Timeframe::FourHour,
            500,
            IndicatorConfig::default(),
        );
        assert!(config.is_ok());
    }

    #[test]
    fn test_blank_pair() {
        let result = DashboardConfig::new("  ", Timeframe::OneMin, 100, IndicatorConfig::default());
        assert_eq!(result, Err(ConfigError::EmptyPair));
    }

    #[test]
    fn test_zero_bar_limit() {
        let result =
            DashboardConfig::new("BTC/USDT", Timeframe::OneMin, 0, IndicatorConfig::default());
        assert_eq!(result, Err(ConfigError::InvalidBarLimit { value: 0 }));
    }
}
