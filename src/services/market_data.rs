//! Fetch collaborator contract consumed by the scan orchestrator.

use async_trait::async_trait;

use crate::models::candle::CandleSeries;

#[async_trait]
pub trait CandleFetcher: Send + Sync {
    /// Candles for `symbol` at `interval` over `range`, oldest first.
    ///
    /// Implementations return `None` on any retrieval failure instead of
    /// erroring, so one bad symbol never fails a whole scan.
    async fn fetch(&self, symbol: &str, interval: &str, range: &str) -> Option<CandleSeries>;
}
