// Next-candle countdown
pub mod countdown;

// Indicator calculations and the engine that fills a frame
pub mod indicators;

// Series cache in front of a market data source
pub mod market_data;

// Fetch -> compute -> detect orchestration
pub mod pipeline;

// Crossover and breakout tagging
pub mod signals;
