use crate::domain::analysis::Column;
use crate::domain::analysis::request::validate_period;
use crate::domain::errors::ConfigError;
use crate::domain::market::bar::Bar;
use ta::Next;

/// Wilder's average true range.
///
/// Same accumulate-then-smooth shape as the RSI: the first `period` true ranges
/// are averaged, then `atr = (atr·(period-1) + tr) / period`.
#[derive(Debug, Clone)]
pub struct WilderAtr {
    period: usize,
    prev_close: Option<f64>,
    count: usize,
    tr_sum: f64,
    atr: f64,
}

impl WilderAtr {
    pub fn new(period: usize) -> Result<Self, ConfigError> {
        validate_period("atr_period", period)?;
        Ok(Self {
            period,
            prev_close: None,
            count: 0,
            tr_sum: 0.0,
            atr: 0.0,
        })
    }
}

impl Next<&Bar> for WilderAtr {
    type Output = Option<f64>;

    fn next(&mut self, bar: &Bar) -> Self::Output {
        let tr = bar.true_range(self.prev_close);
        self.prev_close = Some(bar.close);
        self.count += 1;

        let n = self.period as f64;
        if self.count < self.period {
            self.tr_sum += tr;
            return None;
        }
        if self.count == self.period {
            self.tr_sum += tr;
            self.atr = self.tr_sum / n;
        } else {
            self.atr = (self.atr * (n - 1.0) + tr) / n;
        }
        Some(self.atr)
    }
}

/// ATR column; absent for indices `< period - 1`
pub fn atr(bars: &[Bar], period: usize) -> Result<Column, ConfigError> {
    let mut atr = WilderAtr::new(period)?;
    Ok(bars.iter().map(|b| atr.next(b)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar(i: i64, high: f64, low: f64, close: f64) -> Bar {
        Bar::from_millis(i * 60_000, close, high, low, close, 1.0).unwrap()
    }

    #[test]
    fn test_constant_range() {
        let bars: Vec<Bar> = (0..20).map(|i| bar(i, 102.0, 98.0, 100.0)).collect();
        let out = atr(&bars, 14).unwrap();
        assert!(out[..13].iter().all(Option::is_none));
        for v in out[13..].iter() {
            assert!((v.unwrap() - 4.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_gap_widens_true_range() {
        let bars = vec![
            bar(0, 11.0, 9.0, 10.0),  // tr 2
            bar(1, 21.0, 19.0, 20.0), // tr max(2, 11, 9) = 11
            bar(2, 21.0, 19.0, 20.0), // tr 2
        ];
        let out = atr(&bars, 2).unwrap();
        assert_eq!(out[0], None);
        assert_eq!(out[1], Some(6.5));
        assert_eq!(out[2], Some((6.5 + 2.0) / 2.0));
    }
}
