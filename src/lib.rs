//! Rule-based intraday equity scanner.
//!
//! Candles flow from a [`services::CandleFetcher`] through the
//! [`core::ScanOrchestrator`], which checks the benchmark regime and runs the
//! [`signals::SignalEngine`] once per symbol.

pub mod common;
pub mod config;
pub mod core;
pub mod error;
pub mod indicators;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod regime;
pub mod services;
pub mod signals;
