use serde::Serialize;

/// Retracement ratios drawn between the visible swing high and swing low
pub const FIBONACCI_RATIOS: [f64; 7] = [0.0, 0.236, 0.382, 0.5, 0.618, 0.786, 1.0];

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FibonacciLevel {
    pub ratio: f64,
    pub price: f64,
}

/// Retracement levels over a whole visible window (scalars, not per-bar values)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FibonacciLevels {
    pub swing_high: f64,
    pub swing_low: f64,
    pub levels: Vec<FibonacciLevel>,
}

impl FibonacciLevels {
    pub fn price_at(&self, ratio: f64) -> Option<f64> {
        self.levels
            .iter()
            .find(|l| (l.ratio - ratio).abs() < f64::EPSILON)
            .map(|l| l.price)
    }
}

/// A horizontal level anchored at the bar that produced it
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PriceLevel {
    pub index: usize,
    pub price: f64,
}

/// Merged support and resistance levels, each list in ascending price order
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct SupportResistance {
    pub support: Vec<PriceLevel>,
    pub resistance: Vec<PriceLevel>,
}
