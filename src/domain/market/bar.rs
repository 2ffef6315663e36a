use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One OHLCV candle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Bar {
    pub fn new(
        timestamp: DateTime<Utc>,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
    ) -> Self {
        Self {
            timestamp,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// Builds a bar from an exchange-style millisecond timestamp.
    ///
    /// Returns `None` when the timestamp is outside chrono's representable range.
    pub fn from_millis(
        timestamp_ms: i64,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
    ) -> Option<Self> {
        let timestamp = DateTime::from_timestamp_millis(timestamp_ms)?;
        Some(Self::new(timestamp, open, high, low, close, volume))
    }

    pub fn timestamp_ms(&self) -> i64 {
        self.timestamp.timestamp_millis()
    }

    /// True range against the previous close; the first bar of a series uses `high - low`
    pub fn true_range(&self, prev_close: Option<f64>) -> f64 {
        let range = self.high - self.low;
        match prev_close {
            Some(prev) => range
                .max((self.high - prev).abs())
                .max((self.low - prev).abs()),
            None => range,
        }
    }

    /// Describes the first structural problem with this bar, if any
    pub(crate) fn defect(&self) -> Option<String> {
        let prices = [
            ("open", self.open),
            ("high", self.high),
            ("low", self.low),
            ("close", self.close),
        ];
        if let Some((name, value)) = prices.iter().find(|(_, v)| !v.is_finite()) {
            return Some(format!("{} is not finite ({})", name, value));
        }
        if self.low > self.high {
            return Some(format!("low {} > high {}", self.low, self.high));
        }
        if !self.volume.is_finite() || self.volume < 0.0 {
            return Some(format!("volume {} is negative or not finite", self.volume));
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_true_range_uses_previous_close_gap() {
        let bar = Bar::from_millis(0, 10.0, 12.0, 9.0, 11.0, 1.0).unwrap();
        assert_eq!(bar.true_range(None), 3.0);
        // Gap up: previous close far below today's low
        assert_eq!(bar.true_range(Some(5.0)), 7.0);
        // Gap down: previous close far above today's high
        assert_eq!(bar.true_range(Some(16.0)), 7.0);
    }

    #[test]
    fn test_defect_detection() {
        let ok = Bar::from_millis(0, 10.0, 12.0, 9.0, 11.0, 1.0).unwrap();
        assert!(ok.defect().is_none());

        let inverted = Bar::from_millis(0, 10.0, 9.0, 12.0, 11.0, 1.0).unwrap();
        assert!(inverted.defect().unwrap().contains("low 12 > high 9"));

        let nan_close = Bar::from_millis(0, 10.0, 12.0, 9.0, f64::NAN, 1.0).unwrap();
        assert!(nan_close.defect().unwrap().contains("close"));

        let negative_volume = Bar::from_millis(0, 10.0, 12.0, 9.0, 11.0, -1.0).unwrap();
        assert!(negative_volume.defect().is_some());
    }
}
