//! Indicator configuration parsing from environment variables.
//!
//! This module handles loading the overlay parameters: EMA spans, windows and
//! band widths.

use crate::domain::config::IndicatorConfig;
use anyhow::{Context, Result};
use std::env;

/// Indicator environment configuration
#[derive(Debug, Clone)]
pub struct IndicatorEnvConfig {
    // EMA crossover
    pub ema_fast_span: usize,
    pub ema_slow_span: usize,

    // Breakout
    pub breakout_window: usize,

    // Bollinger Bands
    pub bollinger_window: usize,
    pub bollinger_k: f64,

    // Oscillators
    pub rsi_period: usize,
    pub macd_fast_span: usize,
    pub macd_slow_span: usize,
    pub macd_signal_span: usize,
    pub atr_period: usize,

    // Support / resistance
    pub extrema_window: usize,
    pub sr_merge_threshold: f64,
}

impl IndicatorEnvConfig {
    pub fn from_env() -> Result<Self> {
        let defaults = IndicatorConfig::default();

        Ok(Self {
            ema_fast_span: Self::parse_usize("EMA_FAST_SPAN", defaults.ema_fast_span)?,
            ema_slow_span: Self::parse_usize("EMA_SLOW_SPAN", defaults.ema_slow_span)?,
            breakout_window: Self::parse_usize("BREAKOUT_WINDOW", defaults.breakout_window)?,
            bollinger_window: Self::parse_usize("BOLLINGER_WINDOW", defaults.bollinger_window)?,
            bollinger_k: Self::parse_f64("BOLLINGER_K", defaults.bollinger_k)?,
            rsi_period: Self::parse_usize("RSI_PERIOD", defaults.rsi_period)?,
            macd_fast_span: Self::parse_usize("MACD_FAST_SPAN", defaults.macd_fast_span)?,
            macd_slow_span: Self::parse_usize("MACD_SLOW_SPAN", defaults.macd_slow_span)?,
            macd_signal_span: Self::parse_usize("MACD_SIGNAL_SPAN", defaults.macd_signal_span)?,
            atr_period: Self::parse_usize("ATR_PERIOD", defaults.atr_period)?,
            extrema_window: Self::parse_usize("EXTREMA_WINDOW", defaults.extrema_window)?,
            sr_merge_threshold: Self::parse_f64("SR_MERGE_THRESHOLD", defaults.sr_merge_threshold)?,
        })
    }

    /// Validated domain value object
    pub fn to_indicator_config(&self) -> Result<IndicatorConfig> {
        let config = IndicatorConfig {
            ema_fast_span: self.ema_fast_span,
            ema_slow_span: self.ema_slow_span,
            breakout_window: self.breakout_window,
            bollinger_window: self.bollinger_window,
            bollinger_k: self.bollinger_k,
            rsi_period: self.rsi_period,
            macd_fast_span: self.macd_fast_span,
            macd_slow_span: self.macd_slow_span,
            macd_signal_span: self.macd_signal_span,
            atr_period: self.atr_period,
            extrema_window: self.extrema_window,
            sr_merge_threshold: self.sr_merge_threshold,
        };
        config.validate().context("Invalid indicator configuration")?;
        Ok(config)
    }

    fn parse_usize(key: &str, default: usize) -> Result<usize> {
        env::var(key)
            .unwrap_or_else(|_| default.to_string())
            .parse::<usize>()
            .context(format!("Failed to parse {}", key))
    }

    fn parse_f64(key: &str, default: f64) -> Result<f64> {
        env::var(key)
            .unwrap_or_else(|_| default.to_string())
            .parse::<f64>()
            .context(format!("Failed to parse {}", key))
    }
}
