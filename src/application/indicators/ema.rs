use crate::domain::analysis::Column;
use crate::domain::analysis::request::validate_period;
use crate::domain::errors::ConfigError;
use ta::Next;

/// Exponential moving average as a weighted average of every observation so far.
///
/// With `α = 2/(span+1)` and `β = 1-α`:
///
/// `y_t = (x_t + β·x_{t-1} + β²·x_{t-2} + ...) / (1 + β + β² + ...)`
///
/// There is no seed: `y_0 = x_0` and early values are weighted means of a short
/// history, so they differ from an SMA-seeded EMA until the weights of the
/// oldest bars decay. That start-up bias is intentional and left uncorrected.
///
/// Updated as `y_t = y_{t-1} + (x_t - y_{t-1}) / w_t` with `w_t = 1 + β·w_{t-1}`,
/// which keeps a constant input exactly constant.
#[derive(Debug, Clone)]
pub struct WeightedEma {
    decay: f64,
    weight: f64,
    current: f64,
}

impl WeightedEma {
    pub fn new(span: usize) -> Result<Self, ConfigError> {
        validate_period("ema_span", span)?;
        let alpha = 2.0 / (span as f64 + 1.0);
        Ok(Self {
            decay: 1.0 - alpha,
            weight: 0.0,
            current: 0.0,
        })
    }
}

impl Next<f64> for WeightedEma {
    type Output = f64;

    fn next(&mut self, input: f64) -> Self::Output {
        self.weight = 1.0 + self.decay * self.weight;
        self.current += (input - self.current) / self.weight;
        self.current
    }
}

/// EMA of every value; defined from index 0
pub fn ema(values: &[f64], span: usize) -> Result<Vec<f64>, ConfigError> {
    let mut ema = WeightedEma::new(span)?;
    Ok(values.iter().map(|&v| ema.next(v)).collect())
}

pub fn ema_column(values: &[f64], span: usize) -> Result<Column, ConfigError> {
    Ok(ema(values, span)?.into_iter().map(Some).collect())
}
