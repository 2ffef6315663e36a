use super::bar::Bar;
use super::timeframe::Timeframe;
use crate::domain::errors::SeriesError;
use chrono::Duration;
use serde::Serialize;

/// Time-ordered OHLCV bars for one pair and timeframe.
///
/// # Invariants
///
/// - Timestamps are strictly ascending (no duplicates)
/// - Every bar has finite prices, `low <= high` and a non-negative volume
/// - Every bar closes at a representable instant (`timestamp + timeframe`)
///
/// A series is never mutated after construction; derived data lives in new,
/// index-aligned vectors.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pair: String,
    timeframe: Timeframe,
    bars: Vec<Bar>,
}

impl Series {
    pub fn new(
        pair: impl Into<String>,
        timeframe: Timeframe,
        bars: Vec<Bar>,
    ) -> Result<Self, SeriesError> {
        for (index, bar) in bars.iter().enumerate() {
            if let Some(reason) = bar.defect() {
                return Err(SeriesError::InvalidBar { index, reason });
            }
            if bar
                .timestamp
                .checked_add_signed(Duration::seconds(timeframe.seconds()))
                .is_none()
            {
                return Err(SeriesError::InvalidBar {
                    index,
                    reason: format!("timestamp {} has no representable close", bar.timestamp),
                });
            }
            if index > 0 {
                let previous = &bars[index - 1];
                if bar.timestamp <= previous.timestamp {
                    return Err(SeriesError::NonAscending {
                        index,
                        timestamp_ms: bar.timestamp_ms(),
                        previous_ms: previous.timestamp_ms(),
                    });
                }
            }
        }

        Ok(Self {
            pair: pair.into(),
            timeframe,
            bars,
        })
    }

    pub fn pair(&self) -> &str {
        &self.pair
    }

    pub fn timeframe(&self) -> Timeframe {
        self.timeframe
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn last(&self) -> Option<&Bar> {
        self.bars.last()
    }

    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    pub fn highs(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.high).collect()
    }

    pub fn lows(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.low).collect()
    }

    /// Returns the most recent `limit` bars as a new series
    pub fn latest(&self, limit: usize) -> Series {
        let start = self.bars.len().saturating_sub(limit);
        Series {
            pair: self.pair.clone(),
            timeframe: self.timeframe,
            bars: self.bars[start..].to_vec(),
        }
    }
}
