// Indicator, signal and countdown value objects
pub mod analysis;

// Validated configuration value objects
pub mod config;

// Domain-specific error types
pub mod errors;

// Bars, series and timeframes
pub mod market;

// Port interfaces
pub mod ports;
