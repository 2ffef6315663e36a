use thiserror::Error;

/// Errors raised by the series fetch collaborator.
///
/// A fetch either returns a complete series or one of these; the pipeline never
/// computes indicators after a failed fetch.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MarketDataError {
    #[error("Unknown pair: {pair}")]
    UnknownPair { pair: String },

    #[error("Connection lost: {reason}")]
    ConnectionLost { reason: String },

    #[error("Service timeout after {duration_ms}ms")]
    Timeout { duration_ms: u64 },

    #[error("Rate limit exceeded: retry after {retry_after_secs}s")]
    RateLimitExceeded { retry_after_secs: u64 },

    #[error("Invalid market data for {pair}: {reason}")]
    InvalidData { pair: String, reason: String },
}

/// Configuration rejected before any computation starts
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Unknown timeframe: '{value}'. Valid options: 1m, 3m, 5m, 15m, 30m, 1h, 2h, 4h, 6h, 8h, 12h, 1d, 1w")]
    UnknownTimeframe { value: String },

    #[error("Invalid period: {field} = {value}. Must be > 0")]
    InvalidPeriod { field: String, value: usize },

    #[error("Invalid parameter: {field} = {value}. Must be finite and >= 0")]
    InvalidParameter { field: String, value: f64 },

    #[error("Pair must not be empty")]
    EmptyPair,

    #[error("Invalid bar limit: {value}. Must be > 0")]
    InvalidBarLimit { value: usize },
}

/// Structural problems in a bar sequence
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SeriesError {
    #[error("Bar {index} is not after the previous bar ({timestamp_ms} <= {previous_ms})")]
    NonAscending {
        index: usize,
        timestamp_ms: i64,
        previous_ms: i64,
    },

    #[error("Bar {index} is invalid: {reason}")]
    InvalidBar { index: usize, reason: String },
}

/// Errors raised when reading an indicator frame
#[derive(Debug, Error, Clone, PartialEq)]
pub enum FrameError {
    #[error("Indicator column '{column}' is missing from the frame")]
    MissingColumn { column: String },
}

impl MarketDataError {
    /// A source produced bars that do not form a valid series
    pub fn invalid_series(pair: &str, error: SeriesError) -> Self {
        MarketDataError::InvalidData {
            pair: pair.to_string(),
            reason: error.to_string(),
        }
    }
}

/// Everything that can abort one dashboard refresh
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PipelineError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Fetch failed: {0}")]
    Fetch(#[from] MarketDataError),

    #[error("Frame error: {0}")]
    Frame(#[from] FrameError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_market_data_error_formatting() {
        let error = MarketDataError::RateLimitExceeded {
            retry_after_secs: 12,
        };
        assert_eq!(error.to_string(), "Rate limit exceeded: retry after 12s");
    }

    #[test]
    fn test_series_error_formatting() {
        let error = SeriesError::NonAscending {
            index: 3,
            timestamp_ms: 1000,
            previous_ms: 1000,
        };

        let msg = error.to_string();
        assert!(msg.contains("Bar 3"));
        assert!(msg.contains("1000 <= 1000"));
    }

    #[test]
    fn test_invalid_series_keeps_pair_and_reason() {
        let error = MarketDataError::invalid_series(
            "ETH/USDT",
            SeriesError::InvalidBar {
                index: 4,
                reason: "low above high".to_string(),
            },
        );
        assert_eq!(
            error.to_string(),
            "Invalid market data for ETH/USDT: Bar 4 is invalid: low above high"
        );
    }

    #[test]
    fn test_pipeline_error_wraps_sources() {
        let error: PipelineError = MarketDataError::UnknownPair {
            pair: "FOO/USDT".to_string(),
        }
        .into();
        assert_eq!(error.to_string(), "Fetch failed: Unknown pair: FOO/USDT");

        let error: PipelineError = ConfigError::EmptyPair.into();
        assert!(matches!(error, PipelineError::Config(ConfigError::EmptyPair)));
    }
}
