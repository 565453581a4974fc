//! Supertrend flip extraction.

use crate::indicators::error::IndicatorError;
use crate::indicators::structure::supertrend::{calculate_supertrend, SupertrendParams};
use crate::models::indicators::BandRecord;
use crate::models::market::PriceRecord;

pub struct SignalEngine;

impl SignalEngine {
    /// Keep only the rows where the trend flipped.
    pub fn signals(rows: &[BandRecord]) -> Vec<BandRecord> {
        rows.iter().filter(|row| row.is_flip()).cloned().collect()
    }

    /// Annotate `records` with SuperTrend and return the flip rows.
    pub fn evaluate(
        records: &[PriceRecord],
        params: &SupertrendParams,
    ) -> Result<Vec<BandRecord>, IndicatorError> {
        let rows = calculate_supertrend(records, params)?;
        Ok(Self::signals(&rows))
    }
}
