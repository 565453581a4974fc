//! CoinGecko response payloads.

use serde::{Deserialize, Serialize};

use crate::models::market::PriceRecord;

/// One row of `/coins/markets`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoinMarket {
    pub id: String,
    pub symbol: String,
    pub name: String,
    #[serde(default)]
    pub current_price: Option<f64>,
    #[serde(default)]
    pub total_volume: Option<f64>,
    #[serde(default)]
    pub price_change_percentage_24h: Option<f64>,
}

impl From<CoinMarket> for PriceRecord {
    fn from(coin: CoinMarket) -> Self {
        let mut record = PriceRecord::new(coin.current_price.unwrap_or(0.0))
            .with_symbol(coin.symbol)
            .with_name(coin.name)
            .with_volume(coin.total_volume.unwrap_or(0.0));
        record.price_change_percentage_24h = coin.price_change_percentage_24h;
        record
    }
}

/// Payload of `/search/trending`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendingResponse {
    pub coins: Vec<TrendingCoin>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendingCoin {
    pub item: TrendingItem,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendingItem {
    pub id: String,
    pub name: String,
    pub symbol: String,
    #[serde(default)]
    pub price_btc: Option<f64>,
}

impl From<TrendingItem> for PriceRecord {
    /// Trending prices are quoted in BTC.
    fn from(item: TrendingItem) -> Self {
        PriceRecord::new(item.price_btc.unwrap_or(0.0))
            .with_symbol(item.symbol)
            .with_name(item.name)
    }
}
