//! Market data providers backed by public HTTP APIs.

pub mod cache;
pub mod coingecko;
pub mod dexscreener;
pub mod error;
pub mod market_data;

pub use cache::ResponseCache;
pub use coingecko::CoinGeckoClient;
pub use dexscreener::DexScreenerClient;
pub use error::ProviderError;
pub use market_data::{load_snapshot, MarketDataProvider};
