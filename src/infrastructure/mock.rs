use crate::domain::errors::MarketDataError;
use crate::domain::market::bar::Bar;
use crate::domain::market::series::Series;
use crate::domain::market::timeframe::Timeframe;
use crate::domain::ports::MarketDataService;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;
use std::sync::RwLock;
use tracing::debug;

const DEFAULT_SEED: u64 = 42;

/// Offline market data for demos and tests.
///
/// Known pairs get a seeded random walk whose last bar opens at the current
/// timeframe boundary. Tests can inject fixed bars per `(pair, timeframe)` or
/// make every fetch fail.
pub struct MockMarketDataService {
    base_prices: HashMap<String, f64>,
    seed: u64,
    clock: Option<DateTime<Utc>>,
    fixed: RwLock<HashMap<(String, Timeframe), Vec<Bar>>>,
    failure: RwLock<Option<MarketDataError>>,
}

impl MockMarketDataService {
    pub fn new() -> Self {
        let base_prices = [("BTC/USDT", 65_000.0), ("ETH/USDT", 3_400.0), ("SOL/USDT", 150.0)]
            .into_iter()
            .map(|(pair, price)| (pair.to_string(), price))
            .collect();

        Self {
            base_prices,
            seed: DEFAULT_SEED,
            clock: None,
            fixed: RwLock::new(HashMap::new()),
            failure: RwLock::new(None),
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Pin the synthetic series' end instead of following the wall clock
    pub fn with_clock(mut self, now: DateTime<Utc>) -> Self {
        self.clock = Some(now);
        self
    }

    pub fn with_pair(mut self, pair: impl Into<String>, base_price: f64) -> Self {
        self.base_prices.insert(pair.into(), base_price);
        self
    }

    pub fn pairs(&self) -> Vec<String> {
        let mut pairs: Vec<String> = self.base_prices.keys().cloned().collect();
        pairs.sort();
        pairs
    }

    /// Serve these bars (trimmed to `limit`) instead of a random walk
    pub fn set_series(&self, pair: impl Into<String>, timeframe: Timeframe, bars: Vec<Bar>) {
        let key = (pair.into(), timeframe);
        match self.fixed.write() {
            Ok(mut guard) => {
                guard.insert(key, bars);
            }
            Err(poisoned) => {
                poisoned.into_inner().insert(key, bars);
            }
        }
    }

    /// Every fetch fails with `error` until cleared with `None`
    pub fn set_failure(&self, error: Option<MarketDataError>) {
        match self.failure.write() {
            Ok(mut guard) => *guard = error,
            Err(poisoned) => *poisoned.into_inner() = error,
        }
    }

    fn injected_failure(&self) -> Option<MarketDataError> {
        match self.failure.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn fixed_bars(&self, pair: &str, timeframe: Timeframe) -> Option<Vec<Bar>> {
        let guard = match self.fixed.read() {
            Ok(g) => g,
            Err(poisoned) => poisoned.into_inner(),
        };
        guard.get(&(pair.to_string(), timeframe)).cloned()
    }

    fn random_walk(
        &self,
        pair: &str,
        base_price: f64,
        timeframe: Timeframe,
        limit: usize,
    ) -> Vec<Bar> {
        let now_ms = self.clock.unwrap_or_else(Utc::now).timestamp_millis();
        let last_open = timeframe.period_start(now_ms);
        let step_ms = timeframe.millis();

        let seed = pair
            .bytes()
            .fold(self.seed ^ timeframe.seconds() as u64, |acc, b| {
                acc.wrapping_mul(31).wrapping_add(b as u64)
            });
        let mut rng = StdRng::seed_from_u64(seed);

        // Per-bar volatility grows with the square root of the bar length
        let volatility = (0.002 * (timeframe.seconds() as f64 / 60.0).sqrt()).min(0.05);

        let mut close = base_price;
        (0..limit)
            .filter_map(|i| {
                let timestamp_ms = last_open - (limit - 1 - i) as i64 * step_ms;
                let open = close;
                close = open * (1.0 + rng.random_range(-volatility..=volatility));
                let high = open.max(close) * (1.0 + rng.random_range(0.0..=volatility / 2.0));
                let low = open.min(close) * (1.0 - rng.random_range(0.0..=volatility / 2.0));
                let volume = rng.random_range(10.0..1_000.0);
                Bar::from_millis(timestamp_ms, open, high, low, close, volume)
            })
            .collect()
    }
}

impl Default for MockMarketDataService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MarketDataService for MockMarketDataService {
    async fn fetch_series(
        &self,
        pair: &str,
        timeframe: Timeframe,
        limit: usize,
    ) -> Result<Series, MarketDataError> {
        if let Some(error) = self.injected_failure() {
            return Err(error);
        }

        let bars = if let Some(bars) = self.fixed_bars(pair, timeframe) {
            bars
        } else if let Some(&base_price) = self.base_prices.get(pair) {
            self.random_walk(pair, base_price, timeframe, limit)
        } else {
            return Err(MarketDataError::UnknownPair {
                pair: pair.to_string(),
            });
        };

        let series = Series::new(pair, timeframe, bars)
            .map_err(|e| MarketDataError::invalid_series(pair, e))?
            .latest(limit);

        debug!(
            "MockMarketDataService: Served {} bars for {} {}",
            series.len(),
            pair,
            timeframe
        );
        Ok(series)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn clock() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 6, 10, 17, 42).unwrap()
    }

    #[tokio::test]
    async fn test_random_walk_is_aligned_and_valid() {
        let mock = MockMarketDataService::new().with_clock(clock());
        let series = mock
            .fetch_series("BTC/USDT", Timeframe::FifteenMin, 100)
            .await
            .unwrap();

        assert_eq!(series.len(), 100);
        let last = series.last().unwrap();
        assert_eq!(
            last.timestamp,
            Utc.with_ymd_and_hms(2024, 5, 6, 10, 15, 0).unwrap()
        );
        for pair in series.bars().windows(2) {
            assert_eq!(pair[1].timestamp_ms() - pair[0].timestamp_ms(), 900_000);
        }
        for bar in series.bars() {
            assert!(bar.low <= bar.open.min(bar.close));
            assert!(bar.high >= bar.open.max(bar.close));
        }
    }

    #[tokio::test]
    async fn test_same_seed_same_series() {
        let a = MockMarketDataService::new().with_clock(clock());
        let b = MockMarketDataService::new().with_clock(clock());
        let c = MockMarketDataService::new().with_clock(clock()).with_seed(7);

        let sa = a.fetch_series("ETH/USDT", Timeframe::OneHour, 50).await.unwrap();
        let sb = b.fetch_series("ETH/USDT", Timeframe::OneHour, 50).await.unwrap();
        let sc = c.fetch_series("ETH/USDT", Timeframe::OneHour, 50).await.unwrap();

        assert_eq!(sa, sb);
        assert_ne!(sa.closes(), sc.closes());
    }

    #[tokio::test]
    async fn test_unknown_pair() {
        let mock = MockMarketDataService::new();
        let result = mock.fetch_series("DOGE/USDT", Timeframe::OneMin, 10).await;
        assert_eq!(
            result,
            Err(MarketDataError::UnknownPair {
                pair: "DOGE/USDT".to_string()
            })
        );
    }

    #[tokio::test]
    async fn test_injected_series_trimmed_to_limit() {
        let mock = MockMarketDataService::new();
        let bars = (0..20)
            .map(|i| Bar::from_millis(i * 60_000, 1.0, 1.0, 1.0, i as f64, 1.0).unwrap())
            .collect();
        mock.set_series("XYZ/USDT", Timeframe::OneMin, bars);

        let series = mock.fetch_series("XYZ/USDT", Timeframe::OneMin, 5).await.unwrap();
        assert_eq!(series.closes(), vec![15.0, 16.0, 17.0, 18.0, 19.0]);
    }

    #[tokio::test]
    async fn test_injected_failure() {
        let mock = MockMarketDataService::new();
        mock.set_failure(Some(MarketDataError::RateLimitExceeded {
            retry_after_secs: 30,
        }));
        assert!(matches!(
            mock.fetch_series("BTC/USDT", Timeframe::OneMin, 10).await,
            Err(MarketDataError::RateLimitExceeded { .. })
        ));

        mock.set_failure(None);
        assert!(mock.fetch_series("BTC/USDT", Timeframe::OneMin, 10).await.is_ok());
    }

    #[test]
    fn test_default_pairs() {
        let mock = MockMarketDataService::new().with_pair("ARB/USDT", 1.2);
        assert_eq!(
            mock.pairs(),
            vec!["ARB/USDT", "BTC/USDT", "ETH/USDT", "SOL/USDT"]
        );
    }
}
