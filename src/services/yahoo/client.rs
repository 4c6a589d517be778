//! Yahoo Finance chart client

use std::time::Duration;

use async_trait::async_trait;
use backon::{ExponentialBuilder, Retryable};
use chrono::DateTime;
use reqwest::Client;
use tracing::{debug, warn};

use super::messages::{ChartResponse, QuoteData};
use crate::config::environment::DEFAULT_YAHOO_BASE_URL;
use crate::error::FetchError;
use crate::models::candle::{Candle, CandleSeries};
use crate::services::market_data::CandleFetcher;

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

pub struct YahooCandleFetcher {
    client: Client,
    base_url: String,
    max_retries: usize,
    base_delay: Duration,
}

impl YahooCandleFetcher {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_YAHOO_BASE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .user_agent(USER_AGENT)
            .build()
            .unwrap_or_else(|_| Client::new());
        Self::with_client(base_url, client)
    }

    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            max_retries: 2,
            base_delay: Duration::from_millis(250),
        }
    }

    pub fn with_retries(mut self, max_retries: usize, base_delay: Duration) -> Self {
        self.max_retries = max_retries;
        self.base_delay = base_delay;
        self
    }

    /// Fetch with retry on transient failures
    pub async fn fetch_series(
        &self,
        symbol: &str,
        interval: &str,
        range: &str,
    ) -> Result<CandleSeries, FetchError> {
        let backoff = ExponentialBuilder::default()
            .with_min_delay(self.base_delay)
            .with_max_times(self.max_retries);

        (|| async { self.fetch_once(symbol, interval, range).await })
            .retry(backoff)
            .when(FetchError::is_transient)
            .notify(|e: &FetchError, delay: Duration| {
                debug!(symbol = %symbol, error = %e, delay_ms = delay.as_millis() as u64, "Retrying chart request");
            })
            .await
    }

    async fn fetch_once(
        &self,
        symbol: &str,
        interval: &str,
        range: &str,
    ) -> Result<CandleSeries, FetchError> {
        let url = format!("{}/v8/finance/chart/{}", self.base_url, symbol);
        let response = self
            .client
            .get(&url)
            .query(&[("interval", interval), ("range", range), ("events", "history")])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                symbol: symbol.to_string(),
                status: status.as_u16(),
            });
        }

        let body: ChartResponse = response.json().await?;
        parse_chart(symbol, interval, range, body)
    }
}

impl Default for YahooCandleFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CandleFetcher for YahooCandleFetcher {
    async fn fetch(&self, symbol: &str, interval: &str, range: &str) -> Option<CandleSeries> {
        match self.fetch_series(symbol, interval, range).await {
            Ok(series) => {
                debug!(symbol = %symbol, interval = %interval, count = series.len(), "Fetched candles");
                Some(series)
            }
            Err(e) => {
                warn!(symbol = %symbol, interval = %interval, error = %e, "Failed to fetch candles");
                None
            }
        }
    }
}

/// Turn a chart payload into a time-ordered series. Rows with a missing
/// close or volume are dropped.
pub fn parse_chart(
    symbol: &str,
    interval: &str,
    range: &str,
    body: ChartResponse,
) -> Result<CandleSeries, FetchError> {
    let no_data = |reason: String| FetchError::NoData {
        symbol: symbol.to_string(),
        reason,
    };

    let data = match body.chart.result {
        Some(results) => results.into_iter().next(),
        None => None,
    };
    let data = match (data, body.chart.error) {
        (Some(data), _) => data,
        (None, Some(err)) => return Err(no_data(format!("{}: {}", err.code, err.description))),
        (None, None) => return Err(no_data("empty result".to_string())),
    };

    let timestamps = data
        .timestamp
        .ok_or_else(|| no_data("no timestamps".to_string()))?;
    let quote = data.indicators.quote.into_iter().next().unwrap_or_default();

    let mut candles: Vec<Candle> = timestamps
        .iter()
        .enumerate()
        .filter_map(|(i, &ts)| row_to_candle(&quote, i, ts))
        .collect();

    candles.sort_by_key(|c| c.time);
    candles.dedup_by_key(|c| c.time);

    let symbol = data
        .meta
        .and_then(|m| m.symbol)
        .unwrap_or_else(|| symbol.to_string());

    Ok(CandleSeries::new(symbol, interval, range, candles))
}

fn row_to_candle(quote: &QuoteData, i: usize, ts: i64) -> Option<Candle> {
    let field = |values: &Vec<Option<f64>>| values.get(i).copied().flatten();

    let close = field(&quote.close)?;
    let volume = field(&quote.volume)?;
    let time = DateTime::from_timestamp(ts, 0)?;

    Some(Candle::new(
        field(&quote.open).unwrap_or(close),
        field(&quote.high).unwrap_or(close),
        field(&quote.low).unwrap_or(close),
        close,
        volume,
        time,
    ))
}
