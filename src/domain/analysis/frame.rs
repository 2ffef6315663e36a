use super::levels::{FibonacciLevels, SupportResistance};
use crate::domain::errors::FrameError;
use crate::domain::market::series::Series;
use serde::Serialize;
use std::collections::BTreeMap;

/// A derived per-bar sequence aligned with the series; `None` marks an absent value
pub type Column = Vec<Option<f64>>;

/// Column names produced by the default dashboard indicator set
pub mod columns {
    pub const EMA_FAST: &str = "ema_fast";
    pub const EMA_SLOW: &str = "ema_slow";
    pub const ROLLING_HIGH: &str = "rolling_high";
    pub const ROLLING_LOW: &str = "rolling_low";
    pub const BB_MIDDLE: &str = "bb_middle";
    pub const BB_UPPER: &str = "bb_upper";
    pub const BB_LOWER: &str = "bb_lower";
    pub const RSI: &str = "rsi";
    pub const MACD: &str = "macd";
    pub const MACD_SIGNAL: &str = "macd_signal";
    pub const MACD_HIST: &str = "macd_hist";
    pub const ATR: &str = "atr";
    pub const RESISTANCE_PIVOT: &str = "resistance_pivot";
    pub const SUPPORT_PIVOT: &str = "support_pivot";
}

/// The series plus every indicator computed over it.
///
/// # Invariants
///
/// - Every column has exactly `series.len()` entries
/// - Insufficient history is `None`, never a numeric placeholder
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorFrame {
    series: Series,
    columns: BTreeMap<String, Column>,
    fibonacci: Option<FibonacciLevels>,
    support_resistance: Option<SupportResistance>,
}

impl IndicatorFrame {
    pub fn new(series: Series) -> Self {
        Self {
            series,
            columns: BTreeMap::new(),
            fibonacci: None,
            support_resistance: None,
        }
    }

    pub fn series(&self) -> &Series {
        &self.series
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    pub(crate) fn insert_column(&mut self, name: impl Into<String>, column: Column) {
        debug_assert_eq!(column.len(), self.series.len(), "column length mismatch");
        self.columns.insert(name.into(), column);
    }

    pub(crate) fn set_fibonacci(&mut self, levels: Option<FibonacciLevels>) {
        self.fibonacci = levels;
    }

    pub(crate) fn set_support_resistance(&mut self, levels: SupportResistance) {
        self.support_resistance = Some(levels);
    }

    pub fn get(&self, name: &str) -> Option<&[Option<f64>]> {
        self.columns.get(name).map(|c| c.as_slice())
    }

    /// Like [`get`](Self::get) but reports a missing column as an error
    pub fn column(&self, name: &str) -> Result<&[Option<f64>], FrameError> {
        self.get(name).ok_or_else(|| FrameError::MissingColumn {
            column: name.to_string(),
        })
    }

    /// Value of `name` at `index`; `None` if the column, index or value is absent
    pub fn value(&self, name: &str, index: usize) -> Option<f64> {
        self.get(name)?.get(index).copied().flatten()
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    pub fn fibonacci(&self) -> Option<&FibonacciLevels> {
        self.fibonacci.as_ref()
    }

    pub fn support_resistance(&self) -> Option<&SupportResistance> {
        self.support_resistance.as_ref()
    }
}
