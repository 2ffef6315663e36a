use crate::domain::analysis::levels::{FIBONACCI_RATIOS, FibonacciLevel, FibonacciLevels};
use crate::domain::market::series::Series;

/// Retracement levels between the highest high and lowest low of the whole series.
///
/// `price = high - (high - low) · ratio`, so ratio 0 is the swing high and 1 the
/// swing low. An empty series has no levels.
pub fn fibonacci_levels(series: &Series) -> Option<FibonacciLevels> {
    if series.is_empty() {
        return None;
    }

    let swing_high = series
        .bars()
        .iter()
        .map(|b| b.high)
        .fold(f64::NEG_INFINITY, f64::max);
    let swing_low = series
        .bars()
        .iter()
        .map(|b| b.low)
        .fold(f64::INFINITY, f64::min);
    let range = swing_high - swing_low;

    let levels = FIBONACCI_RATIOS
        .iter()
        .map(|&ratio| FibonacciLevel {
            ratio,
            price: swing_high - range * ratio,
        })
        .collect();

    Some(FibonacciLevels {
        swing_high,
        swing_low,
        levels,
    })
}
