use crate::application::countdown::CountdownCalculator;
use crate::application::indicators::IndicatorEngine;
use crate::application::signals::SignalDetector;
use crate::domain::analysis::{CountdownState, IndicatorFrame, SignalEvent};
use crate::domain::config::DashboardConfig;
use crate::domain::errors::{ConfigError, PipelineError};
use crate::domain::market::series::Series;
use crate::domain::market::timeframe::Timeframe;
use crate::domain::ports::MarketDataService;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info};

/// Everything one refresh produced; owned by the caller and never shared
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSnapshot {
    pub pair: String,
    pub timeframe: Timeframe,
    pub generated_at: DateTime<Utc>,
    pub frame: IndicatorFrame,
    pub signals: Vec<SignalEvent>,
    /// `None` when the source returned no bars
    pub countdown: Option<CountdownState>,
}

impl DashboardSnapshot {
    pub fn latest_signal(&self) -> Option<&SignalEvent> {
        self.signals.last()
    }

    pub fn series(&self) -> &Series {
        self.frame.series()
    }
}

/// Fetch, compute, detect and count down for one configured pair.
///
/// Every invocation allocates its own series and frame. A failed fetch aborts
/// before any indicator is computed.
pub struct DashboardPipeline {
    source: Arc<dyn MarketDataService>,
    config: DashboardConfig,
    engine: IndicatorEngine,
    detector: SignalDetector,
}

impl DashboardPipeline {
    pub fn new(
        source: Arc<dyn MarketDataService>,
        config: DashboardConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let engine = IndicatorEngine::from_config(&config.indicators)?;

        Ok(Self {
            source,
            config,
            engine,
            detector: SignalDetector::default(),
        })
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub async fn refresh(&self) -> Result<DashboardSnapshot, PipelineError> {
        self.refresh_at(Utc::now()).await
    }

    /// Refresh with an explicit clock for the countdown
    pub async fn refresh_at(&self, now: DateTime<Utc>) -> Result<DashboardSnapshot, PipelineError> {
        let DashboardConfig {
            pair,
            timeframe,
            bar_limit,
            ..
        } = &self.config;

        debug!(
            "DashboardPipeline: Fetching {} bars of {} {}",
            bar_limit, pair, timeframe
        );
        let series = self
            .source
            .fetch_series(pair, *timeframe, *bar_limit)
            .await?;

        self.analyze(series, now)
    }

    /// Runs the synchronous part of a refresh on an already-fetched series
    pub fn analyze(
        &self,
        series: Series,
        now: DateTime<Utc>,
    ) -> Result<DashboardSnapshot, PipelineError> {
        let countdown = series
            .last()
            .map(|bar| CountdownCalculator::compute(series.timeframe(), bar.timestamp, now));

        let frame = self.engine.compute(series)?;
        let signals = self.detector.detect(&frame)?;

        info!(
            "DashboardPipeline: {} {} refreshed with {} bars, {} signals",
            frame.series().pair(),
            frame.series().timeframe(),
            frame.len(),
            signals.len()
        );

        Ok(DashboardSnapshot {
            pair: frame.series().pair().to_string(),
            timeframe: frame.series().timeframe(),
            generated_at: now,
            frame,
            signals,
            countdown,
        })
    }
}
