//! Shared data models passed between providers, indicators and display.

pub mod indicators;
pub mod market;

pub use indicators::{BandRecord, TREND_DOWN, TREND_UP};
pub use market::{PriceRecord, Snapshot};
