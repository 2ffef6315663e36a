use crate::domain::errors::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Candle intervals offered by the futures dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Timeframe {
    #[serde(rename = "1m")]
    OneMin,
    #[serde(rename = "3m")]
    ThreeMin,
    #[serde(rename = "5m")]
    FiveMin,
    #[serde(rename = "15m")]
    FifteenMin,
    #[serde(rename = "30m")]
    ThirtyMin,
    #[serde(rename = "1h")]
    OneHour,
    #[serde(rename = "2h")]
    TwoHour,
    #[serde(rename = "4h")]
    FourHour,
    #[serde(rename = "6h")]
    SixHour,
    #[serde(rename = "8h")]
    EightHour,
    #[serde(rename = "12h")]
    TwelveHour,
    #[serde(rename = "1d")]
    OneDay,
    #[serde(rename = "1w")]
    OneWeek,
}

impl Timeframe {
    /// Returns the exact duration of one bar in seconds
    pub fn seconds(&self) -> i64 {
        match self {
            Timeframe::OneMin => 60,
            Timeframe::ThreeMin => 180,
            Timeframe::FiveMin => 300,
            Timeframe::FifteenMin => 900,
            Timeframe::ThirtyMin => 1_800,
            Timeframe::OneHour => 3_600,
            Timeframe::TwoHour => 7_200,
            Timeframe::FourHour => 14_400,
            Timeframe::SixHour => 21_600,
            Timeframe::EightHour => 28_800,
            Timeframe::TwelveHour => 43_200,
            Timeframe::OneDay => 86_400,
            Timeframe::OneWeek => 604_800,
        }
    }

    /// Returns the duration in milliseconds
    pub fn millis(&self) -> i64 {
        self.seconds() * 1000
    }

    /// Exchange-style interval code (e.g. "15m", "4h")
    pub fn as_str(&self) -> &'static str {
        match self {
            Timeframe::OneMin => "1m",
            Timeframe::ThreeMin => "3m",
            Timeframe::FiveMin => "5m",
            Timeframe::FifteenMin => "15m",
            Timeframe::ThirtyMin => "30m",
            Timeframe::OneHour => "1h",
            Timeframe::TwoHour => "2h",
            Timeframe::FourHour => "4h",
            Timeframe::SixHour => "6h",
            Timeframe::EightHour => "8h",
            Timeframe::TwelveHour => "12h",
            Timeframe::OneDay => "1d",
            Timeframe::OneWeek => "1w",
        }
    }

    /// Returns all available timeframes in ascending order
    pub fn all() -> Vec<Timeframe> {
        vec![
            Timeframe::OneMin,
            Timeframe::ThreeMin,
            Timeframe::FiveMin,
            Timeframe::FifteenMin,
            Timeframe::ThirtyMin,
            Timeframe::OneHour,
            Timeframe::TwoHour,
            Timeframe::FourHour,
            Timeframe::SixHour,
            Timeframe::EightHour,
            Timeframe::TwelveHour,
            Timeframe::OneDay,
            Timeframe::OneWeek,
        ]
    }

    /// Returns the start timestamp of the period containing the given timestamp
    ///
    /// # Arguments
    /// * `timestamp_ms` - Unix timestamp in milliseconds
    ///
    /// # Returns
    /// The start timestamp (in ms) of the period containing this timestamp.
    /// Periods are aligned to the Unix epoch (weekly periods open Thursday 00:00 UTC).
    pub fn period_start(&self, timestamp_ms: i64) -> i64 {
        let period_ms = self.millis();
        timestamp_ms - timestamp_ms.rem_euclid(period_ms)
    }
}

impl FromStr for Timeframe {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Month codes ("1M") collide with minutes, so minutes stay lowercase-only
        match s.trim() {
            "1m" => Ok(Timeframe::OneMin),
            "3m" => Ok(Timeframe::ThreeMin),
            "5m" => Ok(Timeframe::FiveMin),
            "15m" => Ok(Timeframe::FifteenMin),
            "30m" => Ok(Timeframe::ThirtyMin),
            "1h" | "1H" => Ok(Timeframe::OneHour),
            "2h" | "2H" => Ok(Timeframe::TwoHour),
            "4h" | "4H" => Ok(Timeframe::FourHour),
            "6h" | "6H" => Ok(Timeframe::SixHour),
            "8h" | "8H" => Ok(Timeframe::EightHour),
            "12h" | "12H" => Ok(Timeframe::TwelveHour),
            "1d" | "1D" => Ok(Timeframe::OneDay),
            "1w" | "1W" => Ok(Timeframe::OneWeek),
            other => Err(ConfigError::UnknownTimeframe {
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seconds_table() {
        let expected = [
            60, 180, 300, 900, 1800, 3600, 7200, 14400, 21600, 28800, 43200, 86400, 604800,
        ];
        let actual: Vec<i64> = Timeframe::all().iter().map(|tf| tf.seconds()).collect();
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_from_str() {
        assert_eq!(Timeframe::from_str("1m").unwrap(), Timeframe::OneMin);
        assert_eq!(Timeframe::from_str("30m").unwrap(), Timeframe::ThirtyMin);
        assert_eq!(Timeframe::from_str("4H").unwrap(), Timeframe::FourHour);
        assert_eq!(Timeframe::from_str("8h").unwrap(), Timeframe::EightHour);
        assert_eq!(Timeframe::from_str("1W").unwrap(), Timeframe::OneWeek);
        assert!(Timeframe::from_str("1M").is_err());
        assert!(Timeframe::from_str("10m").is_err());
        assert!(Timeframe::from_str("").is_err());
    }

    #[test]
    fn test_as_str_parses_back() {
        for tf in Timeframe::all() {
            assert_eq!(tf.as_str().parse::<Timeframe>().unwrap(), tf);
        }
    }

    #[test]
    fn test_period_start() {
        let tf = Timeframe::FiveMin;
        // 2024-01-01 00:00:00 UTC = 1704067200000 ms
        let base = 1704067200000i64;

        assert_eq!(tf.period_start(base), base);
        assert_eq!(tf.period_start(base + 3 * 60 * 1000), base);
        assert_eq!(tf.period_start(base + 7 * 60 * 1000), base + 5 * 60 * 1000);
    }
}
