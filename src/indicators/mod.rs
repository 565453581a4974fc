pub mod error;

pub mod structure;
pub mod volatility;

pub use error::IndicatorError;
pub use structure::*;
pub use volatility::*;
