//! Scan orchestration: regime check, concurrent fetch, per-symbol evaluation.

use std::sync::Arc;
use std::time::{Duration, Instant};

use futures_util::future::join_all;
use tracing::{info, warn};

use crate::config::{Mode, StrategyConfig};
use crate::error::ScanError;
use crate::metrics::Metrics;
use crate::models::market::MarketRegime;
use crate::models::scan::ScanResult;
use crate::models::signal::TradeSignal;
use crate::regime::{detect_regime, FLAT_RANGE_PCT};
use crate::services::market_data::CandleFetcher;
use crate::signals::SignalEngine;

/// What to scan and at which resolution
#[derive(Debug, Clone)]
pub struct ScanPlan {
    pub symbols: Vec<String>,
    pub benchmark_symbol: String,
    pub benchmark_label: String,
    pub benchmark_interval: String,
    pub range: String,
    pub scalp_interval: String,
    pub intraday_interval: String,
    pub timeout: Duration,
}

impl ScanPlan {
    pub fn interval_for(&self, mode: Mode) -> &str {
        match mode {
            Mode::Scalp => &self.scalp_interval,
            Mode::Intraday => &self.intraday_interval,
        }
    }
}

pub struct ScanOrchestrator {
    fetcher: Arc<dyn CandleFetcher>,
    plan: ScanPlan,
    metrics: Option<Arc<Metrics>>,
}

impl ScanOrchestrator {
    pub fn new(fetcher: Arc<dyn CandleFetcher>, plan: ScanPlan) -> Self {
        Self {
            fetcher,
            plan,
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn plan(&self) -> &ScanPlan {
        &self.plan
    }

    /// Run one complete scan against `config`.
    ///
    /// The whole scan is bounded by the plan's timeout. On expiry the
    /// in-flight fetches are dropped and no partial result is returned.
    pub async fn run_scan(&self, config: &StrategyConfig) -> Result<ScanResult, ScanError> {
        let started = Instant::now();

        match tokio::time::timeout(self.plan.timeout, self.scan(config)).await {
            Ok(result) => {
                if let Some(metrics) = &self.metrics {
                    metrics.scans_total.with_label_values(&[result.status.as_str()]).inc();
                    metrics
                        .scan_duration_seconds
                        .observe(started.elapsed().as_secs_f64());
                }
                Ok(result)
            }
            Err(_) => {
                warn!(timeout_ms = self.plan.timeout.as_millis() as u64, "Scan timed out");
                if let Some(metrics) = &self.metrics {
                    metrics.scans_total.with_label_values(&["TIMEOUT"]).inc();
                }
                Err(ScanError::Timeout(self.plan.timeout))
            }
        }
    }

    async fn scan(&self, config: &StrategyConfig) -> ScanResult {
        let regime = if config.safety.market_filter {
            let series = self
                .fetcher
                .fetch(
                    &self.plan.benchmark_symbol,
                    &self.plan.benchmark_interval,
                    &self.plan.range,
                )
                .await;
            let regime = detect_regime(series.as_ref());

            if regime.is_flat {
                info!(
                    benchmark = %self.plan.benchmark_symbol,
                    range_pct = ?regime.range_pct,
                    "Benchmark is range-bound, skipping symbol scan"
                );
                let message =
                    MarketRegime::flat_message(&self.plan.benchmark_label, FLAT_RANGE_PCT);
                return ScanResult::market_flat(regime, message);
            }
            regime
        } else {
            MarketRegime::unchecked()
        };

        let interval = self.plan.interval_for(config.mode);
        let range = self.plan.range.as_str();
        let fetches = self.plan.symbols.iter().map(|symbol| async move {
            let series = self.fetcher.fetch(symbol, interval, range).await;
            (symbol, series)
        });
        let fetched = join_all(fetches).await;

        let mut trades: Vec<TradeSignal> = Vec::with_capacity(fetched.len());
        let mut failed = 0usize;
        for (symbol, series) in fetched {
            match series {
                Some(series) => trades.push(SignalEngine::evaluate(symbol, &series, config)),
                None => failed += 1,
            }
        }

        if let Some(metrics) = &self.metrics {
            metrics.fetch_failures_total.inc_by(failed as u64);
            for trade in &trades {
                metrics
                    .signals_total
                    .with_label_values(&[trade.signal.as_str()])
                    .inc();
            }
        }

        info!(
            mode = config.mode.as_str(),
            interval = %interval,
            evaluated = trades.len(),
            fetch_failures = failed,
            trade_count = trades.iter().filter(|t| t.is_trade()).count(),
            "Scan complete"
        );

        ScanResult::active(regime, trades)
    }
}
