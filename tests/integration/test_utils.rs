//! Shared fixtures and wiremock helpers
#![allow(dead_code)]

use std::time::Duration;

use serde_json::{json, Value};
use trendscreen::services::coingecko::CoinGeckoClient;
use trendscreen::services::dexscreener::DexScreenerClient;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const CACHE_TTL: Duration = Duration::from_secs(60);

pub fn coingecko_client(server: &MockServer) -> CoinGeckoClient {
    CoinGeckoClient::with_client(server.uri(), reqwest::Client::new(), CACHE_TTL)
}

pub fn dexscreener_client(server: &MockServer) -> DexScreenerClient {
    DexScreenerClient::with_client(server.uri(), reqwest::Client::new(), CACHE_TTL)
}

pub fn markets_json() -> Value {
    json!([
        {
            "id": "bitcoin",
            "symbol": "btc",
            "name": "Bitcoin",
            "current_price": 30000,
            "total_volume": 1.5e10,
            "price_change_percentage_24h": 10.0
        },
        {
            "id": "ethereum",
            "symbol": "eth",
            "name": "Ethereum",
            "current_price": 2000,
            "total_volume": null,
            "price_change_percentage_24h": 3.0
        }
    ])
}

pub fn trending_json() -> Value {
    json!({
        "coins": [
            { "item": { "id": "bitcoin", "name": "Bitcoin", "symbol": "BTC", "price_btc": 1.0 } },
            { "item": { "id": "ethereum", "name": "Ethereum", "symbol": "ETH", "price_btc": 0.065 } }
        ]
    })
}

pub fn dex_pair(base: &str, price_usd: Option<&str>, volume_h24: Option<f64>) -> Value {
    json!({
        "chainId": "solana",
        "dexId": "raydium",
        "url": format!("https://dexscreener.com/solana/{}", base.to_lowercase()),
        "pairAddress": format!("{}-pair", base),
        "baseToken": { "address": format!("{}-mint", base), "name": base, "symbol": base },
        "quoteToken": { "address": "usdc-mint", "name": "USD Coin", "symbol": "USDC" },
        "priceNative": "1",
        "priceUsd": price_usd,
        "volume": { "h24": volume_h24, "h6": 0, "h1": 0, "m5": 0 }
    })
}

/// Eleven flat pairs, then a crash and a rally: two SuperTrend flips.
pub fn flip_pairs_json() -> Value {
    let mut pairs: Vec<Value> = (0..11)
        .map(|i| dex_pair(&format!("FLAT{}", i), Some("100"), Some(100.0)))
        .collect();
    pairs.push(dex_pair("DUMP", Some("50"), Some(10.0)));
    pairs.push(dex_pair("PUMP", Some("200"), Some(5000.0)));
    json!({ "schemaVersion": "1.0.0", "pairs": pairs })
}

pub async fn mount_json(server: &MockServer, route: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

pub async fn mount_status(server: &MockServer, route: &str, status: u16) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}

pub async fn request_count(server: &MockServer, route: &str) -> usize {
    server
        .received_requests()
        .await
        .expect("wiremock requests")
        .iter()
        .filter(|req| req.url.path() == route)
        .count()
}
