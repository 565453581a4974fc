//! CoinGecko markets and trending endpoints.

pub mod client;
pub mod messages;

pub use client::CoinGeckoClient;
pub use messages::{CoinMarket, TrendingCoin, TrendingItem, TrendingResponse};
