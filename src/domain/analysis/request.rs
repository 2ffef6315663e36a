use crate::domain::errors::ConfigError;
use serde::{Deserialize, Serialize};

/// One indicator the engine should compute, with its parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Indicator {
    /// EMA of close written to `column`
    Ema { column: String, span: usize },
    /// Rolling max of high over `window` bars (inclusive of the current bar)
    RollingHigh { window: usize },
    /// Rolling min of low over `window` bars (inclusive of the current bar)
    RollingLow { window: usize },
    Bollinger { window: usize, k: f64 },
    Rsi { period: usize },
    Macd { fast: usize, slow: usize, signal: usize },
    Atr { period: usize },
    Fibonacci,
    SupportResistance { window: usize, merge_threshold: f64 },
}

impl Indicator {
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self {
            Indicator::Ema { span, .. } => validate_period("ema_span", *span),
            Indicator::RollingHigh { window } | Indicator::RollingLow { window } => {
                validate_period("rolling_window", *window)
            }
            Indicator::Bollinger { window, k } => {
                validate_period("bollinger_window", *window)?;
                validate_parameter("bollinger_k", *k)
            }
            Indicator::Rsi { period } => validate_period("rsi_period", *period),
            Indicator::Macd { fast, slow, signal } => {
                validate_period("macd_fast_span", *fast)?;
                validate_period("macd_slow_span", *slow)?;
                validate_period("macd_signal_span", *signal)
            }
            Indicator::Atr { period } => validate_period("atr_period", *period),
            Indicator::Fibonacci => Ok(()),
            Indicator::SupportResistance {
                window,
                merge_threshold,
            } => {
                validate_period("extrema_window", *window)?;
                validate_parameter("sr_merge_threshold", *merge_threshold)
            }
        }
    }
}

pub(crate) fn validate_period(field: &str, value: usize) -> Result<(), ConfigError> {
    if value == 0 {
        return Err(ConfigError::InvalidPeriod {
            field: field.to_string(),
            value,
        });
    }
    Ok(())
}

pub(crate) fn validate_parameter(field: &str, value: f64) -> Result<(), ConfigError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ConfigError::InvalidParameter {
            field: field.to_string(),
            value,
        });
    }
    Ok(())
}
