//! Trailing-window statistics.
//!
//! Every function returns a column aligned with its input where index `i`
//! covers `[i - window + 1, i]`. Positions with fewer than `window`
//! observations are `None`.

use crate::domain::analysis::Column;
use crate::domain::errors::ConfigError;
use statrs::statistics::Statistics;
use ta::Next;
use ta::indicators::{Maximum, Minimum, SimpleMovingAverage};

fn ta_window_error(field: &str, window: usize) -> ConfigError {
    ConfigError::InvalidPeriod {
        field: field.to_string(),
        value: window,
    }
}

/// Runs a `ta` indicator over the input and blanks the warm-up positions
fn masked<I>(values: &[f64], window: usize, mut indicator: I) -> Column
where
    I: Next<f64, Output = f64>,
{
    values
        .iter()
        .enumerate()
        .map(|(i, &v)| {
            let out = indicator.next(v);
            (i + 1 >= window).then_some(out)
        })
        .collect()
}

pub fn rolling_max(values: &[f64], window: usize) -> Result<Column, ConfigError> {
    let indicator = Maximum::new(window).map_err(|_| ta_window_error("rolling_window", window))?;
    Ok(masked(values, window, indicator))
}

pub fn rolling_min(values: &[f64], window: usize) -> Result<Column, ConfigError> {
    let indicator = Minimum::new(window).map_err(|_| ta_window_error("rolling_window", window))?;
    Ok(masked(values, window, indicator))
}

pub fn rolling_mean(values: &[f64], window: usize) -> Result<Column, ConfigError> {
    let indicator = SimpleMovingAverage::new(window)
        .map_err(|_| ta_window_error("rolling_window", window))?;
    Ok(masked(values, window, indicator))
}

/// Sample standard deviation (N-1 denominator) over the window.
///
/// A single-observation window has no sample deviation; it is reported as 0.
pub fn rolling_std(values: &[f64], window: usize) -> Result<Column, ConfigError> {
    if window == 0 {
        return Err(ta_window_error("rolling_window", window));
    }

    Ok((0..values.len())
        .map(|i| {
            if i + 1 < window {
                return None;
            }
            let std = values[i + 1 - window..=i].std_dev();
            Some(if std.is_finite() { std } else { 0.0 })
        })
        .collect())
}
