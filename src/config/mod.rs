//! Strategy configuration, its store, and deployment settings.

pub mod environment;
pub mod store;
pub mod strategy;

pub use environment::{get_environment, parse_symbols, ScannerSettings, DEFAULT_SYMBOLS};
pub use store::{ConfigStore, InMemoryConfigStore};
pub use strategy::{ConfigPatch, Mode, SafetyConfig, StrategyConfig};
