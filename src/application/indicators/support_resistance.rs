//! Support/resistance from symmetric local extrema.
//!
//! A bar is a resistance pivot when its high is strictly above the highs of the
//! `window` bars on each side, and a support pivot when its low is strictly
//! below the lows on each side. Bars closer than `window` to either end of the
//! series cannot qualify. Pivot prices are then thinned so no two kept levels
//! sit within `merge_threshold` (relative) of each other.

use crate::domain::analysis::Column;
use crate::domain::analysis::levels::{PriceLevel, SupportResistance};
use crate::domain::market::series::Series;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Extremum {
    Max,
    Min,
}

fn pivots(values: &[f64], window: usize, extremum: Extremum) -> Vec<PriceLevel> {
    if window == 0 || values.len() < 2 * window + 1 {
        return Vec::new();
    }

    (window..values.len() - window)
        .filter(|&i| {
            let candidate = values[i];
            let beats = |other: &f64| match extremum {
                Extremum::Max => candidate > *other,
                Extremum::Min => candidate < *other,
            };
            values[i - window..i].iter().all(beats) && values[i + 1..=i + window].iter().all(beats)
        })
        .map(|index| PriceLevel {
            index,
            price: values[index],
        })
        .collect()
}

/// Bars whose high is a strict local maximum over `window` bars on each side
pub fn resistance_pivots(series: &Series, window: usize) -> Vec<PriceLevel> {
    pivots(&series.highs(), window, Extremum::Max)
}

/// Bars whose low is a strict local minimum over `window` bars on each side
pub fn support_pivots(series: &Series, window: usize) -> Vec<PriceLevel> {
    pivots(&series.lows(), window, Extremum::Min)
}

/// Keeps levels in ascending price order, dropping any level within
/// `threshold` (relative to the kept level) of a level already kept.
///
/// Applying the filter to its own output returns the output unchanged.
pub fn merge_levels(mut candidates: Vec<PriceLevel>, threshold: f64) -> Vec<PriceLevel> {
    candidates.sort_by(|a, b| a.price.total_cmp(&b.price).then(a.index.cmp(&b.index)));

    let mut kept: Vec<PriceLevel> = Vec::with_capacity(candidates.len());
    for level in candidates {
        let near_existing = kept
            .iter()
            .any(|k| (level.price - k.price).abs() < threshold * k.price.abs());
        if !near_existing {
            kept.push(level);
        }
    }
    kept
}

/// Pivot prices spread into a per-bar column (`None` where the bar is no pivot)
pub fn pivot_column(len: usize, pivots: &[PriceLevel]) -> Column {
    let mut column = vec![None; len];
    for pivot in pivots {
        column[pivot.index] = Some(pivot.price);
    }
    column
}

/// Pivots for marker columns plus the merged levels
pub fn support_resistance(
    series: &Series,
    window: usize,
    merge_threshold: f64,
) -> (SupportResistance, Vec<PriceLevel>, Vec<PriceLevel>) {
    let resistance = resistance_pivots(series, window);
    let support = support_pivots(series, window);

    let levels = SupportResistance {
        support: merge_levels(support.clone(), merge_threshold),
        resistance: merge_levels(resistance.clone(), merge_threshold),
    };
    (levels, resistance, support)
}
