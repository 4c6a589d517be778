//! Yahoo Finance candle source

pub mod client;
pub mod messages;

pub use client::{parse_chart, YahooCandleFetcher};
