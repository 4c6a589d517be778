pub mod trend;
pub mod volatility;
pub mod volume;

pub use trend::*;
pub use volatility::*;
pub use volume::*;
