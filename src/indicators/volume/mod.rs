//! Volume indicators: VWAP, relative volume

pub mod rvol;
pub mod vwap;

pub use rvol::*;
pub use vwap::*;
