//! Indicator calculations.
//!
//! Column functions take plain slices and return vectors aligned with their
//! input. Stateful calculators implement `ta::Next` so they can also be fed
//! bar by bar.

pub mod atr;
pub mod bollinger;
pub mod ema;
pub mod engine;
pub mod fibonacci;
pub mod macd;
pub mod rolling;
pub mod rsi;
pub mod support_resistance;

pub use engine::IndicatorEngine;
