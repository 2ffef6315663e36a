use super::rolling::{rolling_mean, rolling_std};
use crate::domain::analysis::Column;
use crate::domain::errors::ConfigError;

/// Middle, upper and lower band columns
#[derive(Debug, Clone, PartialEq)]
pub struct BollingerColumns {
    pub middle: Column,
    pub upper: Column,
    pub lower: Column,
}

/// Bollinger Bands: `MA ± k·σ` with the sample standard deviation of `window` closes.
///
/// A flat window (σ = 0) yields bands equal to the moving average.
pub fn bollinger(closes: &[f64], window: usize, k: f64) -> Result<BollingerColumns, ConfigError> {
    let middle = rolling_mean(closes, window)?;
    let std = rolling_std(closes, window)?;

    let (upper, lower) = middle
        .iter()
        .zip(&std)
        .map(|(ma, sd)| match (ma, sd) {
            (Some(ma), Some(sd)) => (Some(ma + k * sd), Some(ma - k * sd)),
            _ => (None, None),
        })
        .unzip();

    Ok(BollingerColumns {
        middle,
        upper,
        lower,
    })
}
