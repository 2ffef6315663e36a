use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

/// Time left until the in-progress bar closes, as of one poll
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CountdownState {
    pub timeframe_seconds: i64,
    pub last_bar_timestamp: DateTime<Utc>,
    pub next_boundary: DateTime<Utc>,
    /// Always >= 0
    pub remaining_seconds: f64,
}

impl CountdownState {
    /// Remaining time truncated to whole seconds
    pub fn whole_seconds(&self) -> u64 {
        self.remaining_seconds.trunc() as u64
    }

    /// `(minutes, seconds)` of the truncated remaining time
    pub fn minutes_seconds(&self) -> (u64, u64) {
        let secs = self.whole_seconds();
        (secs / 60, secs % 60)
    }

    /// Fraction of the bar already elapsed, in `[0, 1]`
    pub fn progress(&self) -> f64 {
        if self.timeframe_seconds <= 0 {
            return 1.0;
        }
        let elapsed = self.timeframe_seconds as f64 - self.remaining_seconds;
        (elapsed / self.timeframe_seconds as f64).clamp(0.0, 1.0)
    }

    /// The bar has closed; a refresh will pick up the next one
    pub fn is_closed(&self) -> bool {
        self.remaining_seconds <= 0.0
    }
}

impl fmt::Display for CountdownState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (minutes, seconds) = self.minutes_seconds();
        write!(f, "{}m {}s", minutes, seconds)
    }
}
