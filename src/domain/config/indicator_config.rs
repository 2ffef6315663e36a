//! Indicator Configuration Domain Value Object
//!
//! This module defines the `IndicatorConfig` value object, which encapsulates
//! every window, span and threshold the dashboard overlays use.

use crate::domain::analysis::columns;
use crate::domain::analysis::request::{Indicator, validate_parameter, validate_period};
use crate::domain::errors::ConfigError;
use serde::{Deserialize, Serialize};

/// Indicator configuration value object
///
/// # Invariants
///
/// - All span/window/period fields must be > 0
/// - `bollinger_k` and `sr_merge_threshold` must be finite and >= 0.0
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorConfig {
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

    // Support / Resistance
    pub extrema_window: usize,
    pub sr_merge_threshold: f64,
}

impl IndicatorConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_period("ema_fast_span", self.ema_fast_span)?;
        validate_period("ema_slow_span", self.ema_slow_span)?;
        validate_period("breakout_window", self.breakout_window)?;
        validate_period("bollinger_window", self.bollinger_window)?;
        validate_period("rsi_period", self.rsi_period)?;
        validate_period("macd_fast_span", self.macd_fast_span)?;
        validate_period("macd_slow_span", self.macd_slow_span)?;
        validate_period("macd_signal_span", self.macd_signal_span)?;
        validate_period("atr_period", self.atr_period)?;
        validate_period("extrema_window", self.extrema_window)?;

        validate_parameter("bollinger_k", self.bollinger_k)?;
        validate_parameter("sr_merge_threshold", self.sr_merge_threshold)?;
        Ok(())
    }

    /// The full overlay set drawn by the dashboard
    pub fn requests(&self) -> Vec<Indicator> {
        vec![
            Indicator::Ema {
                column: columns::EMA_FAST.to_string(),
                span: self.ema_fast_span,
            },
            Indicator::Ema {
                column: columns::EMA_SLOW.to_string(),
                span: self.ema_slow_span,
            },
            Indicator::RollingHigh {
                window: self.breakout_window,
            },
            Indicator::RollingLow {
                window: self.breakout_window,
            },
            Indicator::Bollinger {
                window: self.bollinger_window,
                k: self.bollinger_k,
            },
            Indicator::Rsi {
                period: self.rsi_period,
            },
            Indicator::Macd {
                fast: self.macd_fast_span,
                slow: self.macd_slow_span,
                signal: self.macd_signal_span,
            },
            Indicator::Atr {
                period: self.atr_period,
            },
            Indicator::Fibonacci,
            Indicator::SupportResistance {
                window: self.extrema_window,
                merge_threshold: self.sr_merge_threshold,
            },
        ]
    }
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            ema_fast_span: 9,
            ema_slow_span: 21,
            breakout_window: 10,
            bollinger_window: 20,
            bollinger_k: 2.0,
            rsi_period: 14,
            macd_fast_span: 12,
            macd_slow_span: 26,
            macd_signal_span: 9,
            atr_period: 14,
            extrema_window: 5,
            sr_merge_threshold: 0.02,
        }
    }
}
