use crate::application::pipeline::DashboardSnapshot;
use crate::domain::analysis::{SignalKind, columns};
use chrono::{DateTime, Utc};
use std::fmt;

/// Number of recent signals listed in the text report
const RECENT_SIGNALS: usize = 5;

/// Latest-bar readings of one snapshot, ready for a headless display
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardReport {
    pub pair: String,
    pub timeframe: String,
    pub bar_count: usize,
    pub last_close: Option<f64>,
    pub ema_fast: Option<f64>,
    pub ema_slow: Option<f64>,
    pub bollinger: Option<(f64, f64, f64)>,
    pub rsi: Option<f64>,
    pub macd: Option<(f64, f64, f64)>,
    pub atr: Option<f64>,
    pub fibonacci: Vec<(f64, f64)>,
    pub support: Vec<f64>,
    pub resistance: Vec<f64>,
    pub signal_count: usize,
    pub recent_signals: Vec<(DateTime<Utc>, SignalKind)>,
    pub countdown: Option<String>,
}

impl DashboardReport {
    pub fn from_snapshot(snapshot: &DashboardSnapshot) -> Self {
        let frame = &snapshot.frame;
        let last = frame.len().checked_sub(1);
        let at = |name: &str| last.and_then(|i| frame.value(name, i));

        let bollinger = match (
            at(columns::BB_LOWER),
            at(columns::BB_MIDDLE),
            at(columns::BB_UPPER),
        ) {
            (Some(lower), Some(middle), Some(upper)) => Some((lower, middle, upper)),
            _ => None,
        };
        let macd = match (at(columns::MACD), at(columns::MACD_SIGNAL), at(columns::MACD_HIST)) {
            (Some(line), Some(signal), Some(hist)) => Some((line, signal, hist)),
            _ => None,
        };

        let bars = snapshot.series().bars();
        let recent_signals = snapshot
            .signals
            .iter()
            .rev()
            .take(RECENT_SIGNALS)
            .filter_map(|event| bars.get(event.index).map(|bar| (bar.timestamp, event.kind)))
            .collect();

        let (support, resistance): (Vec<f64>, Vec<f64>) = frame
            .support_resistance()
            .map(|sr| {
                (
                    sr.support.iter().map(|l| l.price).collect(),
                    sr.resistance.iter().map(|l| l.price).collect(),
                )
            })
            .unwrap_or_default();

        Self {
            pair: snapshot.pair.clone(),
            timeframe: snapshot.timeframe.to_string(),
            bar_count: frame.len(),
            last_close: snapshot.series().last().map(|b| b.close),
            ema_fast: at(columns::EMA_FAST),
            ema_slow: at(columns::EMA_SLOW),
            bollinger,
            rsi: at(columns::RSI),
            macd,
            atr: at(columns::ATR),
            fibonacci: frame
                .fibonacci()
                .map(|fib| fib.levels.iter().map(|l| (l.ratio, l.price)).collect())
                .unwrap_or_default(),
            support,
            resistance,
            signal_count: snapshot.signals.len(),
            recent_signals,
            countdown: snapshot.countdown.map(|c| c.to_string()),
        }
    }
}

fn num(value: Option<f64>) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| format!("{:.2}", v))
}

fn prices(levels: &[f64]) -> String {
    if levels.is_empty() {
        return "none".to_string();
    }
    levels
        .iter()
        .map(|p| format!("{:.2}", p))
        .collect::<Vec<_>>()
        .join(", ")
}

impl fmt::Display for DashboardReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} {} | {} bars | close {}",
            self.pair,
            self.timeframe,
            self.bar_count,
            num(self.last_close)
        )?;
        writeln!(f, "EMA fast {} / slow {}", num(self.ema_fast), num(self.ema_slow))?;
        match self.bollinger {
            Some((lower, middle, upper)) => {
                writeln!(f, "Bollinger {:.2} / {:.2} / {:.2}", lower, middle, upper)?
            }
            None => writeln!(f, "Bollinger n/a")?,
        }
        write!(f, "RSI {} | ", num(self.rsi))?;
        match self.macd {
            Some((line, signal, hist)) => write!(
                f,
                "MACD {:.4} signal {:.4} hist {:.4}",
                line, signal, hist
            )?,
            None => write!(f, "MACD n/a")?,
        }
        writeln!(f, " | ATR {}", num(self.atr))?;

        if !self.fibonacci.is_empty() {
            let levels = self
                .fibonacci
                .iter()
                .map(|(ratio, price)| format!("{:.1}% {:.2}", ratio * 100.0, price))
                .collect::<Vec<_>>()
                .join(", ");
            writeln!(f, "Fibonacci {}", levels)?;
        }
        writeln!(f, "Support {}", prices(&self.support))?;
        writeln!(f, "Resistance {}", prices(&self.resistance))?;

        write!(f, "Signals {}", self.signal_count)?;
        for (timestamp, kind) in &self.recent_signals {
            write!(f, " | {} {}", timestamp.format("%Y-%m-%d %H:%M"), kind)?;
        }
        writeln!(f)?;

        match &self.countdown {
            Some(countdown) => write!(f, "Next candle in {}", countdown),
            None => write!(f, "Next candle n/a"),
        }
    }
}

/// Machine-readable form of a snapshot
pub fn to_json(snapshot: &DashboardSnapshot) -> serde_json::Result<String> {
    serde_json::to_string_pretty(snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::pipeline::DashboardPipeline;
    use crate::domain::config::{DashboardConfig, IndicatorConfig};
    use crate::domain::market::{Bar, Timeframe};
    use crate::infrastructure::MockMarketDataService;
    use chrono::{Duration, TimeZone};
    use std::sync::Arc;

    fn three_bar_snapshot() -> DashboardSnapshot {
        let mock = MockMarketDataService::new();
        mock.set_series(
            "BTC/USDT",
            Timeframe::OneHour,
            vec![
                Bar::from_millis(0, 10.0, 12.0, 9.0, 11.0, 1.0).unwrap(),
                Bar::from_millis(3_600_000, 11.0, 13.0, 10.0, 12.0, 1.0).unwrap(),
                Bar::from_millis(7_200_000, 12.0, 14.0, 11.0, 10.0, 1.0).unwrap(),
            ],
        );
        let config = DashboardConfig::new(
            "BTC/USDT",
            Timeframe::OneHour,
            100,
            IndicatorConfig {
                ema_fast_span: 2,
                ..IndicatorConfig::default()
            },
        )
        .unwrap();
        let pipeline = DashboardPipeline::new(Arc::new(mock), config).unwrap();

        let now = Utc.timestamp_millis_opt(7_200_000).unwrap() + Duration::seconds(1500);
        tokio_test::block_on(pipeline.refresh_at(now)).unwrap()
    }

    #[test]
    fn test_report_reads_latest_bar() {
        let report = DashboardReport::from_snapshot(&three_bar_snapshot());

        assert_eq!(report.bar_count, 3);
        assert_eq!(report.last_close, Some(10.0));
        assert!(report.bollinger.is_none());
        assert!(report.rsi.is_none());
        assert_eq!(report.fibonacci.len(), 7);
        assert_eq!(report.fibonacci[0], (0.0, 14.0));
        assert_eq!(report.signal_count, 2);
        assert_eq!(report.recent_signals[0].1, SignalKind::EmaSell);
        assert_eq!(report.countdown.as_deref(), Some("35m 0s"));
    }

    #[test]
    fn test_report_text() {
        let text = DashboardReport::from_snapshot(&three_bar_snapshot()).to_string();

        assert!(text.starts_with("BTC/USDT 1h | 3 bars | close 10.00"));
        assert!(text.contains("Bollinger n/a"));
        assert!(text.contains("RSI n/a"));
        assert!(text.contains("Fibonacci 0.0% 14.00, 23.6% 12.82"));
        assert!(text.contains("Signals 2 | 1970-01-01 02:00 sell | 1970-01-01 01:00 buy"));
        assert!(text.ends_with("Next candle in 35m 0s"));
    }

    #[test]
    fn test_json_output() {
        let json = to_json(&three_bar_snapshot()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["pair"], "BTC/USDT");
        assert_eq!(value["timeframe"], "1h");
        assert_eq!(value["signals"][0]["kind"], "buy");
        assert_eq!(value["countdown"]["remaining_seconds"], 2100.0);
    }
}
