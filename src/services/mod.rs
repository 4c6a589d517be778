//! External collaborators: market data retrieval.

pub mod market_data;
pub mod yahoo;

pub use market_data::CandleFetcher;
pub use yahoo::YahooCandleFetcher;
