use super::ema::ema;
use crate::domain::analysis::Column;
use crate::domain::errors::ConfigError;

#[derive(Debug, Clone, PartialEq)]
pub struct MacdColumns {
    pub macd: Column,
    pub signal: Column,
    pub hist: Column,
}

/// `MACD = EMA(fast) - EMA(slow)`, `Signal = EMA(MACD, signal)`, `Hist = MACD - Signal`
pub fn macd(
    closes: &[f64],
    fast: usize,
    slow: usize,
    signal: usize,
) -> Result<MacdColumns, ConfigError> {
    let fast_ema = ema(closes, fast)?;
    let slow_ema = ema(closes, slow)?;
    let line: Vec<f64> = fast_ema.iter().zip(&slow_ema).map(|(f, s)| f - s).collect();
    let signal_line = ema(&line, signal)?;

    let hist = line
        .iter()
        .zip(&signal_line)
        .map(|(m, s)| Some(m - s))
        .collect();

    Ok(MacdColumns {
        macd: line.into_iter().map(Some).collect(),
        signal: signal_line.into_iter().map(Some).collect(),
        hist,
    })
}
