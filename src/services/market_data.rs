//! Market data provider interface consumed by the display surfaces.

use async_trait::async_trait;
use tracing::{info, warn};

use crate::models::market::{PriceRecord, Snapshot};
use crate::services::error::ProviderError;

#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Short provider name used in logs and notices.
    fn name(&self) -> &'static str;

    /// Fetch up to `limit` records in the source's rank order.
    async fn fetch_records(&self, limit: usize) -> Result<Vec<PriceRecord>, ProviderError>;

    /// Forget every cached response so the next fetch hits the network.
    async fn clear_cache(&self) {}
}

/// Fetch a snapshot, absorbing provider failures into an empty result.
pub async fn load_snapshot(provider: &dyn MarketDataProvider, limit: usize) -> Snapshot {
    match provider.fetch_records(limit).await {
        Ok(records) => {
            info!(
                provider = provider.name(),
                records = records.len(),
                "Fetched market snapshot"
            );
            Snapshot::new(records)
        }
        Err(e) => {
            warn!(provider = provider.name(), error = %e, "Market data unavailable");
            let notice = if e.is_malformed() {
                format!(
                    "Could not process {} data, the API may be having problems: {}",
                    provider.name(),
                    e
                )
            } else {
                format!("Failed to fetch data from {}: {}", provider.name(), e)
            };
            Snapshot::unavailable(notice)
        }
    }
}
