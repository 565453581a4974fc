use serde::{Deserialize, Serialize};

use super::market::PriceRecord;

pub const TREND_UP: i32 = 1;
pub const TREND_DOWN: i32 = -1;

/// A [`PriceRecord`] annotated with synthetic OHLC, ATR and Supertrend state.
///
/// `atr`, `upper_band` and `lower_band` stay `None` during the ATR warm-up.
/// `signal` is the trend delta versus the previous row: `0`, `2` or `-2`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BandRecord {
    #[serde(flatten)]
    pub record: PriceRecord,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub true_range: Option<f64>,
    pub atr: Option<f64>,
    pub upper_band: Option<f64>,
    pub lower_band: Option<f64>,
    pub trend: i32,
    pub signal: i32,
}

impl BandRecord {
    pub fn identifier(&self) -> &str {
        self.record.identifier()
    }

    pub fn price(&self) -> f64 {
        self.record.price
    }

    pub fn is_uptrend(&self) -> bool {
        self.trend == TREND_UP
    }

    pub fn is_flip(&self) -> bool {
        self.signal != 0
    }

    /// The active Supertrend line: lower band in an uptrend, upper otherwise.
    pub fn supertrend_value(&self) -> Option<f64> {
        if self.is_uptrend() {
            self.lower_band
        } else {
            self.upper_band
        }
    }
}
