use crate::domain::analysis::{IndicatorFrame, SignalEvent, SignalKind, columns};
use crate::domain::errors::FrameError;
use tracing::debug;

/// Tags EMA crossovers and prior-window breakouts in an indicator frame.
///
/// Both categories are evaluated independently, so one index can carry an EMA
/// event and a breakout event. Within an index the EMA event comes first.
#[derive(Debug, Clone)]
pub struct SignalDetector {
    fast_column: String,
    slow_column: String,
    high_column: String,
    low_column: String,
}

impl Default for SignalDetector {
    fn default() -> Self {
        Self::new(columns::EMA_FAST, columns::EMA_SLOW)
    }
}

impl SignalDetector {
    pub fn new(fast_column: impl Into<String>, slow_column: impl Into<String>) -> Self {
        Self {
            fast_column: fast_column.into(),
            slow_column: slow_column.into(),
            high_column: columns::ROLLING_HIGH.to_string(),
            low_column: columns::ROLLING_LOW.to_string(),
        }
    }

    pub fn detect(&self, frame: &IndicatorFrame) -> Result<Vec<SignalEvent>, FrameError> {
        let fast = frame.column(&self.fast_column)?;
        let slow = frame.column(&self.slow_column)?;
        let rolling_high = frame.column(&self.high_column)?;
        let rolling_low = frame.column(&self.low_column)?;
        let bars = frame.series().bars();

        let mut events = Vec::new();
        for i in 1..bars.len() {
            if let Some(kind) = crossover(fast[i - 1], slow[i - 1], fast[i], slow[i]) {
                events.push(SignalEvent::new(i, kind));
            }

            // Rolling values at i-1 cover bars [i-window, i-1]; bar i is not in its own reference
            let close = bars[i].close;
            if let Some(high) = rolling_high[i - 1]
                && close > high
            {
                events.push(SignalEvent::new(i, SignalKind::BreakoutBuy));
            } else if let Some(low) = rolling_low[i - 1]
                && close < low
            {
                events.push(SignalEvent::new(i, SignalKind::BreakoutSell));
            }
        }

        debug!(
            "SignalDetector: {} events over {} bars for {}",
            events.len(),
            bars.len(),
            frame.series().pair()
        );
        Ok(events)
    }
}

fn crossover(
    prev_fast: Option<f64>,
    prev_slow: Option<f64>,
    fast: Option<f64>,
    slow: Option<f64>,
) -> Option<SignalKind> {
    let (prev_fast, prev_slow, fast, slow) = (prev_fast?, prev_slow?, fast?, slow?);
    if fast > slow && prev_fast <= prev_slow {
        Some(SignalKind::EmaBuy)
    } else if fast < slow && prev_fast >= prev_slow {
        Some(SignalKind::EmaSell)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::indicators::IndicatorEngine;
    use crate::domain::analysis::{Indicator, SignalCategory};
    use crate::domain::market::{Bar, Series, Timeframe};

    fn series(ohlc: &[(f64, f64, f64, f64)]) -> Series {
        let bars = ohlc
            .iter()
            .enumerate()
            .map(|(i, &(o, h, l, c))| Bar::from_millis(i as i64 * 60_000, o, h, l, c, 1.0).unwrap())
            .collect();
        Series::new("BTC/USDT", Timeframe::OneMin, bars).unwrap()
    }

    fn flat(closes: &[f64]) -> Series {
        let ohlc: Vec<_> = closes.iter().map(|&c| (c, c, c, c)).collect();
        series(&ohlc)
    }

    fn engine(fast: usize, slow: usize, window: usize) -> IndicatorEngine {
        IndicatorEngine::new(vec![
            Indicator::Ema {
                column: columns::EMA_FAST.to_string(),
                span: fast,
            },
            Indicator::Ema {
                column: columns::EMA_SLOW.to_string(),
                span: slow,
            },
            Indicator::RollingHigh { window },
            Indicator::RollingLow { window },
        ])
        .unwrap()
    }

    #[test]
    fn test_three_bar_example() {
        let frame = engine(2, 21, 10)
            .compute(series(&[
                (10.0, 12.0, 9.0, 11.0),
                (11.0, 13.0, 10.0, 12.0),
                (12.0, 14.0, 11.0, 10.0),
            ]))
            .unwrap();

        assert_eq!(frame.value(columns::EMA_FAST, 0), Some(11.0));
        let events = SignalDetector::default().detect(&frame).unwrap();

        // fast 11.75 > slow 11.52 at 1, then 10.54 < 10.97 at 2
        assert_eq!(
            events,
            vec![
                SignalEvent::new(1, SignalKind::EmaBuy),
                SignalEvent::new(2, SignalKind::EmaSell),
            ]
        );
    }

    #[test]
    fn test_no_event_at_index_zero() {
        let frame = engine(2, 5, 1).compute(flat(&[100.0])).unwrap();
        assert!(SignalDetector::default().detect(&frame).unwrap().is_empty());
    }

    #[test]
    fn test_crossover_exclusivity() {
        let closes: Vec<f64> = (0..200)
            .map(|i| 100.0 + (i as f64 * 0.3).sin() * 5.0 + (i as f64 * 0.07).cos() * 3.0)
            .collect();
        let frame = engine(3, 8, 10).compute(flat(&closes)).unwrap();
        let events = SignalDetector::default().detect(&frame).unwrap();

        let ema_events: Vec<_> = events
            .iter()
            .filter(|e| e.kind.category() == SignalCategory::EmaCrossover)
            .collect();
        assert!(!ema_events.is_empty());
        for pair in ema_events.windows(2) {
            assert!(pair[0].index < pair[1].index);
            // Crossovers alternate direction
            assert_ne!(pair[0].kind, pair[1].kind);
        }
    }

    #[test]
    fn test_breakout_uses_prior_window() {
        let mut closes = vec![100.0; 12];
        closes.push(105.0);
        let frame = engine(2, 5, 10).compute(flat(&closes)).unwrap();

        // Rolling high at 12 includes bar 12 itself; the reference is the value at 11
        assert_eq!(frame.value(columns::ROLLING_HIGH, 11), Some(100.0));
        assert_eq!(frame.value(columns::ROLLING_HIGH, 12), Some(105.0));

        let events = SignalDetector::default().detect(&frame).unwrap();
        assert!(events.contains(&SignalEvent::new(12, SignalKind::BreakoutBuy)));
        assert!(
            !events
                .iter()
                .any(|e| e.index < 12 && e.kind.category() == SignalCategory::Breakout)
        );
    }

    #[test]
    fn test_breakout_sell_below_prior_low() {
        let mut closes = vec![50.0; 11];
        closes.push(45.0);
        let frame = engine(2, 5, 10).compute(flat(&closes)).unwrap();
        let events = SignalDetector::default().detect(&frame).unwrap();
        assert!(events.contains(&SignalEvent::new(11, SignalKind::BreakoutSell)));
    }

    #[test]
    fn test_no_breakout_before_window_filled() {
        // Absent rolling values at i-1 never fire
        let frame = engine(2, 5, 10).compute(flat(&[10.0, 20.0, 5.0, 30.0])).unwrap();
        let events = SignalDetector::default().detect(&frame).unwrap();
        assert!(
            events
                .iter()
                .all(|e| e.kind.category() == SignalCategory::EmaCrossover)
        );
    }

    #[test]
    fn test_ema_and_breakout_share_an_index() {
        let mut closes = vec![100.0; 10];
        closes.push(120.0);
        let frame = engine(2, 5, 10).compute(flat(&closes)).unwrap();
        let events = SignalDetector::default().detect(&frame).unwrap();

        assert_eq!(
            events,
            vec![
                SignalEvent::new(10, SignalKind::EmaBuy),
                SignalEvent::new(10, SignalKind::BreakoutBuy),
            ]
        );
    }

    #[test]
    fn test_missing_column_is_error() {
        let frame = IndicatorEngine::new(vec![Indicator::Ema {
            column: columns::EMA_FAST.to_string(),
            span: 9,
        }])
        .unwrap()
        .compute(flat(&[1.0, 2.0]))
        .unwrap();

        let result = SignalDetector::default().detect(&frame);
        assert_eq!(
            result,
            Err(FrameError::MissingColumn {
                column: columns::EMA_SLOW.to_string()
            })
        );
    }
}
