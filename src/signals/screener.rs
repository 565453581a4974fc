//! 24h price change screener.

use crate::models::market::PriceRecord;

pub const DEFAULT_CHANGE_THRESHOLD: f64 = 5.0;

/// Keep records whose 24h change is known and at least `pct_threshold`.
///
/// Records without a 24h change are dropped whatever the threshold.
pub fn screen_by_change(records: &[PriceRecord], pct_threshold: f64) -> Vec<PriceRecord> {
    records
        .iter()
        .filter(|record| {
            record
                .price_change_percentage_24h
                .is_some_and(|change| change >= pct_threshold)
        })
        .cloned()
        .collect()
}
