use super::atr::atr;
use super::bollinger::bollinger;
use super::ema::ema_column;
use super::fibonacci::fibonacci_levels;
use super::macd::macd;
use super::rolling::{rolling_max, rolling_min};
use super::rsi::rsi;
use super::support_resistance::{pivot_column, support_resistance};
use crate::domain::analysis::{Indicator, IndicatorFrame, columns};
use crate::domain::config::IndicatorConfig;
use crate::domain::errors::ConfigError;
use crate::domain::market::series::Series;
use tracing::debug;

/// Turns a series into an [`IndicatorFrame`] for a fixed set of requests.
///
/// Parameters are validated once at construction. Computing never fails for
/// short or degenerate input: missing history shows up as `None` entries.
#[derive(Debug, Clone)]
pub struct IndicatorEngine {
    requests: Vec<Indicator>,
}

impl IndicatorEngine {
    pub fn new(requests: Vec<Indicator>) -> Result<Self, ConfigError> {
        for request in &requests {
            request.validate()?;
        }
        Ok(Self { requests })
    }

    pub fn from_config(config: &IndicatorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Self::new(config.requests())
    }

    pub fn requests(&self) -> &[Indicator] {
        &self.requests
    }

    /// Computes every requested indicator; the frame takes ownership of the series
    pub fn compute(&self, series: Series) -> Result<IndicatorFrame, ConfigError> {
        let closes = series.closes();
        let highs = series.highs();
        let lows = series.lows();
        let len = series.len();

        let mut frame = IndicatorFrame::new(series);

        for request in &self.requests {
            match request {
                Indicator::Ema { column, span } => {
                    frame.insert_column(column.clone(), ema_column(&closes, *span)?);
                }
                Indicator::RollingHigh { window } => {
                    frame.insert_column(columns::ROLLING_HIGH, rolling_max(&highs, *window)?);
                }
                Indicator::RollingLow { window } => {
                    frame.insert_column(columns::ROLLING_LOW, rolling_min(&lows, *window)?);
                }
                Indicator::Bollinger { window, k } => {
                    let bands = bollinger(&closes, *window, *k)?;
                    frame.insert_column(columns::BB_MIDDLE, bands.middle);
                    frame.insert_column(columns::BB_UPPER, bands.upper);
                    frame.insert_column(columns::BB_LOWER, bands.lower);
                }
                Indicator::Rsi { period } => {
                    frame.insert_column(columns::RSI, rsi(&closes, *period)?);
                }
                Indicator::Macd { fast, slow, signal } => {
                    let out = macd(&closes, *fast, *slow, *signal)?;
                    frame.insert_column(columns::MACD, out.macd);
                    frame.insert_column(columns::MACD_SIGNAL, out.signal);
                    frame.insert_column(columns::MACD_HIST, out.hist);
                }
                Indicator::Atr { period } => {
                    let column = atr(frame.series().bars(), *period)?;
                    frame.insert_column(columns::ATR, column);
                }
                Indicator::Fibonacci => {
                    let levels = fibonacci_levels(frame.series());
                    if levels.is_none() {
                        debug!("IndicatorEngine: empty series, no Fibonacci levels");
                    }
                    frame.set_fibonacci(levels);
                }
                Indicator::SupportResistance {
                    window,
                    merge_threshold,
                } => {
                    let (levels, resistance, support) =
                        support_resistance(frame.series(), *window, *merge_threshold);
                    debug!(
                        "IndicatorEngine: {} resistance / {} support pivots merged into {} / {} levels",
                        resistance.len(),
                        support.len(),
                        levels.resistance.len(),
                        levels.support.len()
                    );
                    frame.insert_column(columns::RESISTANCE_PIVOT, pivot_column(len, &resistance));
                    frame.insert_column(columns::SUPPORT_PIVOT, pivot_column(len, &support));
                    frame.set_support_resistance(levels);
                }
            }
        }

        debug!(
            "IndicatorEngine: computed {} indicators over {} bars for {} {}",
            self.requests.len(),
            len,
            frame.series().pair(),
            frame.series().timeframe()
        );

        Ok(frame)
    }
}
