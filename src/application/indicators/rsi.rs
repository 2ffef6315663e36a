use crate::domain::analysis::Column;
use crate::domain::analysis::request::validate_period;
use crate::domain::errors::ConfigError;
use ta::Next;

/// Wilder's RSI.
///
/// The first value appears once `period` price changes are available and uses
/// their simple mean gain/loss; later values apply Wilder's smoothing
/// `avg = (avg·(period-1) + x) / period`. A zero average loss reads as 100.
#[derive(Debug, Clone)]
pub struct WilderRsi {
    period: usize,
    prev_close: Option<f64>,
    count: usize,
    gain_sum: f64,
    loss_sum: f64,
    avg_gain: f64,
    avg_loss: f64,
}

impl WilderRsi {
    pub fn new(period: usize) -> Result<Self, ConfigError> {
        validate_period("rsi_period", period)?;
        Ok(Self {
            period,
            prev_close: None,
            count: 0,
            gain_sum: 0.0,
            loss_sum: 0.0,
            avg_gain: 0.0,
            avg_loss: 0.0,
        })
    }

    fn value(&self) -> f64 {
        if self.avg_loss <= 0.0 {
            return 100.0;
        }
        let rs = self.avg_gain / self.avg_loss;
        (100.0 - 100.0 / (1.0 + rs)).clamp(0.0, 100.0)
    }
}

impl Next<f64> for WilderRsi {
    type Output = Option<f64>;

    fn next(&mut self, close: f64) -> Self::Output {
        let prev = self.prev_close.replace(close)?;

        let change = close - prev;
        let gain = change.max(0.0);
        let loss = (-change).max(0.0);
        self.count += 1;

        let n = self.period as f64;
        if self.count <= self.period {
            self.gain_sum += gain;
            self.loss_sum += loss;
            if self.count < self.period {
                return None;
            }
            self.avg_gain = self.gain_sum / n;
            self.avg_loss = self.loss_sum / n;
        } else {
            self.avg_gain = (self.avg_gain * (n - 1.0) + gain) / n;
            self.avg_loss = (self.avg_loss * (n - 1.0) + loss) / n;
        }

        Some(self.value())
    }
}

/// RSI column; absent for the first `period` bars
pub fn rsi(closes: &[f64], period: usize) -> Result<Column, ConfigError> {
    let mut rsi = WilderRsi::new(period)?;
    Ok(closes.iter().map(|&c| rsi.next(c)).collect())
}
