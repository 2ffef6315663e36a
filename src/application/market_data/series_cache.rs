use crate::domain::errors::MarketDataError;
use crate::domain::market::series::Series;
use crate::domain::market::timeframe::Timeframe;
use crate::domain::ports::MarketDataService;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};
use tracing::debug;

type CacheKey = (String, Timeframe);

/// Series, the limit it was fetched with, and when
type CacheEntry = (Series, usize, Instant);

/// TTL guard in front of another [`MarketDataService`].
///
/// A cached series is served while it is younger than the TTL and was fetched
/// with at least the requested limit; it is trimmed to `limit` on the way out.
/// A source may return fewer bars than asked for, so the fetch limit is kept
/// with the entry. Failed fetches are never cached.
pub struct CachedMarketDataService {
    inner: Arc<dyn MarketDataService>,
    ttl: Duration,
    entries: RwLock<HashMap<CacheKey, CacheEntry>>,
}

impl std::fmt::Debug for CachedMarketDataService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CachedMarketDataService")
            .field("ttl", &self.ttl)
            .field("entries", &"<RwLock>")
            .finish()
    }
}

impl CachedMarketDataService {
    pub fn new(inner: Arc<dyn MarketDataService>, ttl: Duration) -> Self {
        Self {
            inner,
            ttl,
            entries: RwLock::new(HashMap::new()),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Drops every cached series
    pub fn clear(&self) {
        match self.entries.write() {
            Ok(mut guard) => guard.clear(),
            Err(poisoned) => {
                tracing::error!("CachedMarketDataService: Lock poisoned during clear, recovering");
                poisoned.into_inner().clear();
            }
        }
    }

    pub fn len(&self) -> usize {
        match self.entries.read() {
            Ok(guard) => guard.len(),
            Err(poisoned) => poisoned.into_inner().len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lookup(&self, key: &CacheKey, limit: usize) -> Option<Series> {
        let guard = match self.entries.read() {
            Ok(g) => g,
            Err(poisoned) => poisoned.into_inner(),
        };
        let (series, fetched_limit, cached_at) = guard.get(key)?;
        if cached_at.elapsed() < self.ttl && *fetched_limit >= limit {
            Some(series.latest(limit))
        } else {
            None
        }
    }

    fn store(&self, key: CacheKey, series: Series, limit: usize) {
        let entry = (series, limit, Instant::now());
        match self.entries.write() {
            Ok(mut guard) => {
                guard.insert(key, entry);
            }
            Err(poisoned) => {
                tracing::error!("CachedMarketDataService: Lock poisoned during write, recovering");
                poisoned.into_inner().insert(key, entry);
            }
        }
    }
}

#[async_trait]
impl MarketDataService for CachedMarketDataService {
    async fn fetch_series(
        &self,
        pair: &str,
        timeframe: Timeframe,
        limit: usize,
    ) -> Result<Series, MarketDataError> {
        let key = (pair.to_string(), timeframe);

        if let Some(series) = self.lookup(&key, limit) {
            debug!(
                "CachedMarketDataService: Cache hit for {} {} ({} bars)",
                pair,
                timeframe,
                series.len()
            );
            return Ok(series);
        }

        debug!("CachedMarketDataService: Cache miss for {} {}", pair, timeframe);
        let series = self.inner.fetch_series(pair, timeframe, limit).await?;
        self.store(key, series.clone(), limit);
        Ok(series)
    }
}
