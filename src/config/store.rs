//! Configuration store behind a narrow get/set contract

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::info;

use crate::config::strategy::{ConfigPatch, StrategyConfig};
use crate::error::ConfigError;

#[async_trait]
pub trait ConfigStore: Send + Sync {
    /// Consistent snapshot of the current configuration.
    async fn get(&self) -> StrategyConfig;

    /// Shallow-merge `patch` into the current configuration and return the result.
    async fn set(&self, patch: ConfigPatch) -> Result<StrategyConfig, ConfigError>;
}

pub struct InMemoryConfigStore {
    current: RwLock<StrategyConfig>,
}

impl InMemoryConfigStore {
    pub fn new(initial: StrategyConfig) -> Self {
        Self {
            current: RwLock::new(initial),
        }
    }
}

impl Default for InMemoryConfigStore {
    fn default() -> Self {
        Self::new(StrategyConfig::default())
    }
}

#[async_trait]
impl ConfigStore for InMemoryConfigStore {
    async fn get(&self) -> StrategyConfig {
        self.current.read().await.clone()
    }

    async fn set(&self, patch: ConfigPatch) -> Result<StrategyConfig, ConfigError> {
        let mut current = self.current.write().await;
        let updated = current.merged(&patch);
        updated.validate()?;
        *current = updated.clone();

        info!(
            mode = updated.mode.as_str(),
            market_filter = updated.safety.market_filter,
            confirm_close = updated.safety.confirm_close,
            "Configuration updated"
        );
        Ok(updated)
    }
}
