//! CoinGecko REST client

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::debug;

use super::messages::{CoinMarket, TrendingResponse};
use crate::config::ProviderConfig;
use crate::models::market::PriceRecord;
use crate::services::cache::ResponseCache;
use crate::services::error::ProviderError;
use crate::services::market_data::MarketDataProvider;

const PROVIDER: &str = "CoinGecko";
const TRENDING_CACHE_KEY: &str = "trending";

pub struct CoinGeckoClient {
    base_url: String,
    http: Client,
    vs_currency: String,
    cache: Arc<ResponseCache<Vec<PriceRecord>>>,
}

impl CoinGeckoClient {
    pub fn new(config: &ProviderConfig) -> Result<Self, ProviderError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(ProviderError::Client)?;
        Ok(Self::with_client(
            config.coingecko_base_url.clone(),
            http,
            config.cache_ttl,
        ))
    }

    pub fn with_client(base_url: impl Into<String>, http: Client, cache_ttl: Duration) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
            vs_currency: "usd".to_string(),
            cache: Arc::new(ResponseCache::new(cache_ttl)),
        }
    }

    pub fn with_vs_currency(mut self, vs_currency: impl Into<String>) -> Self {
        self.vs_currency = vs_currency.into();
        self
    }

    pub fn cache(&self) -> &Arc<ResponseCache<Vec<PriceRecord>>> {
        &self.cache
    }

    /// Coins ordered by market cap, with their 24h change.
    pub async fn fetch_market_data(
        &self,
        per_page: u32,
        page: u32,
    ) -> Result<Vec<PriceRecord>, ProviderError> {
        let key = format!("markets:{}:{}:{}", self.vs_currency, per_page, page);
        self.cache
            .get_or_try_insert_with(&key, || async move {
                let per_page = per_page.to_string();
                let page = page.to_string();
                let query = [
                    ("vs_currency", self.vs_currency.as_str()),
                    ("order", "market_cap_desc"),
                    ("per_page", per_page.as_str()),
                    ("page", page.as_str()),
                    ("price_change_percentage", "24h"),
                ];
                let coins: Vec<CoinMarket> = self.get_json("/coins/markets", &query).await?;
                Ok::<_, ProviderError>(coins.into_iter().map(PriceRecord::from).collect())
            })
            .await
    }

    /// Trending search coins, priced in BTC.
    pub async fn fetch_trending(&self) -> Result<Vec<PriceRecord>, ProviderError> {
        self.cache
            .get_or_try_insert_with(TRENDING_CACHE_KEY, || async move {
                let trending: TrendingResponse = self.get_json("/search/trending", &[]).await?;
                let records = trending
                    .coins
                    .into_iter()
                    .map(|coin| PriceRecord::from(coin.item))
                    .collect();
                Ok::<_, ProviderError>(records)
            })
            .await
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ProviderError> {
        let url = format!("{}{}", self.base_url, path);
        debug!(url = %url, "Requesting CoinGecko");

        let response = self
            .http
            .get(&url)
            .query(query)
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

        serde_json::from_str(&body).map_err(|e| ProviderError::malformed(PROVIDER, e.to_string()))
    }
}

#[async_trait]
impl MarketDataProvider for CoinGeckoClient {
    fn name(&self) -> &'static str {
        PROVIDER
    }

    async fn fetch_records(&self, limit: usize) -> Result<Vec<PriceRecord>, ProviderError> {
        let per_page = u32::try_from(limit).unwrap_or(u32::MAX);
        self.fetch_market_data(per_page, 1).await
    }

    async fn clear_cache(&self) {
        self.cache.clear().await;
    }
}
