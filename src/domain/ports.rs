use crate::domain::errors::MarketDataError;
use crate::domain::market::series::Series;
use crate::domain::market::timeframe::Timeframe;
use async_trait::async_trait;

/// Source of OHLCV series.
///
/// Implementations return at most `limit` of the most recent bars in strictly
/// ascending timestamp order, or fail atomically. Retries are the
/// implementation's (or the caller's) business, never the pipeline's.
#[async_trait]
pub trait MarketDataService: Send + Sync {
    async fn fetch_series(
        &self,
        pair: &str,
        timeframe: Timeframe,
        limit: usize,
    ) -> Result<Series, MarketDataError>;
}
