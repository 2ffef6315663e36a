use crate::domain::errors::MarketDataError;
use crate::domain::market::bar::Bar;
use crate::domain::market::series::Series;
use crate::domain::market::timeframe::Timeframe;
use crate::domain::ports::MarketDataService;
use async_trait::async_trait;
use serde::Deserialize;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

#[derive(Debug, Deserialize)]
struct CsvBar {
    timestamp: i64,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    volume: f64,
}

/// Reads OHLCV history exported to CSV.
///
/// One file per pair and timeframe, named `<BASE>_<QUOTE>_<tf>.csv` with the
/// header `timestamp,open,high,low,close,volume` and millisecond timestamps.
#[derive(Debug, Clone)]
pub struct CsvMarketDataService {
    dir: PathBuf,
}

impl CsvMarketDataService {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// `BTC/USDT` at 1h maps to `BTC_USDT_1h.csv`
    pub fn file_path(&self, pair: &str, timeframe: Timeframe) -> PathBuf {
        let stem: String = pair
            .chars()
            .map(|c| if c == '/' || c == ':' { '_' } else { c })
            .collect();
        self.dir.join(format!("{}_{}.csv", stem, timeframe.as_str()))
    }
}

fn parse_bars(pair: &str, content: &[u8]) -> Result<Vec<Bar>, MarketDataError> {
    let mut reader = csv::Reader::from_reader(content);
    let mut bars = Vec::new();

    for (row, result) in reader.deserialize::<CsvBar>().enumerate() {
        let record = result.map_err(|e| MarketDataError::InvalidData {
            pair: pair.to_string(),
            reason: format!("row {}: {}", row + 1, e),
        })?;

        let bar = Bar::from_millis(
            record.timestamp,
            record.open,
            record.high,
            record.low,
            record.close,
            record.volume,
        )
        .ok_or_else(|| MarketDataError::InvalidData {
            pair: pair.to_string(),
            reason: format!("row {}: timestamp {} out of range", row + 1, record.timestamp),
        })?;
        bars.push(bar);
    }

    Ok(bars)
}

#[async_trait]
impl MarketDataService for CsvMarketDataService {
    async fn fetch_series(
        &self,
        pair: &str,
        timeframe: Timeframe,
        limit: usize,
    ) -> Result<Series, MarketDataError> {
        let path = self.file_path(pair, timeframe);

        let content = match tokio::fs::read(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("CsvMarketDataService: No file at {}", path.display());
                return Err(MarketDataError::UnknownPair {
                    pair: pair.to_string(),
                });
            }
            Err(e) => {
                warn!("CsvMarketDataService: Failed to read {}: {}", path.display(), e);
                return Err(MarketDataError::ConnectionLost {
                    reason: format!("{}: {}", path.display(), e),
                });
            }
        };

        let bars = parse_bars(pair, &content)?;
        let total = bars.len();
        let series = Series::new(pair, timeframe, bars)
            .map_err(|e| MarketDataError::invalid_series(pair, e))?
            .latest(limit);

        debug!(
            "CsvMarketDataService: Loaded {} of {} bars from {}",
            series.len(),
            total,
            path.display()
        );
        Ok(series)
    }
}
