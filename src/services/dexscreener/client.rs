//! DexScreener REST client

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use super::messages::PairsResponse;
use crate::config::ProviderConfig;
use crate::models::market::PriceRecord;
use crate::services::cache::ResponseCache;
use crate::services::error::ProviderError;
use crate::services::market_data::MarketDataProvider;

const PROVIDER: &str = "DexScreener";
const PAIRS_PATH: &str = "/latest/dex/pairs";

pub struct DexScreenerClient {
    base_url: String,
    http: Client,
    cache: Arc<ResponseCache<Vec<PriceRecord>>>,
}

impl DexScreenerClient {
    pub fn new(config: &ProviderConfig) -> Result<Self, ProviderError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(ProviderError::Client)?;
        Ok(Self::with_client(
            config.dexscreener_base_url.clone(),
            http,
            config.cache_ttl,
        ))
    }

    pub fn with_client(base_url: impl Into<String>, http: Client, cache_ttl: Duration) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
            cache: Arc::new(ResponseCache::new(cache_ttl)),
        }
    }

    pub fn cache(&self) -> &Arc<ResponseCache<Vec<PriceRecord>>> {
        &self.cache
    }

    /// First `limit` pairs of the latest pairs listing.
    pub async fn fetch_pairs(&self, limit: usize) -> Result<Vec<PriceRecord>, ProviderError> {
        let key = format!("pairs:{}", limit);
        self.cache
            .get_or_try_insert_with(&key, || self.request_pairs(limit))
            .await
    }

    async fn request_pairs(&self, limit: usize) -> Result<Vec<PriceRecord>, ProviderError> {
        let url = format!("{}{}", self.base_url, PAIRS_PATH);
        debug!(url = %url, limit, "Requesting DexScreener pairs");

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|source| ProviderError::Transport {
                provider: PROVIDER,
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Status {
                provider: PROVIDER,
                status,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|source| ProviderError::Transport {
                provider: PROVIDER,
                source,
            })?;

        let payload: PairsResponse = serde_json::from_str(&body)
            .map_err(|e| ProviderError::malformed(PROVIDER, e.to_string()))?;

        let pairs = payload
            .pairs
            .ok_or_else(|| ProviderError::malformed(PROVIDER, "response has no `pairs` field"))?;

        pairs
            .into_iter()
            .take(limit)
            .map(|pair| {
                pair.into_record()
                    .map_err(|reason| ProviderError::malformed(PROVIDER, reason))
            })
            .collect()
    }
}

#[async_trait]
impl MarketDataProvider for DexScreenerClient {
    fn name(&self) -> &'static str {
        PROVIDER
    }

    async fn fetch_records(&self, limit: usize) -> Result<Vec<PriceRecord>, ProviderError> {
        self.fetch_pairs(limit).await
    }

    async fn clear_cache(&self) {
        self.cache.clear().await;
    }
}
