//! DexScreener response payloads.

use serde::{Deserialize, Serialize};

use crate::models::market::PriceRecord;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PairsResponse {
    #[serde(default)]
    pub pairs: Option<Vec<DexPair>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DexPair {
    pub chain_id: String,
    pub dex_id: String,
    #[serde(default)]
    pub url: Option<String>,
    pub base_token: TokenRef,
    pub quote_token: TokenRef,
    #[serde(default)]
    pub price_usd: Option<String>,
    #[serde(default)]
    pub volume: Option<PairVolume>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenRef {
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    pub symbol: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PairVolume {
    #[serde(default)]
    pub h24: Option<f64>,
}

impl DexPair {
    pub fn pair_name(&self) -> String {
        format!("{}/{}", self.base_token.symbol, self.quote_token.symbol)
    }

    /// USD price, `0.0` when absent or empty. Unparseable prices are errors.
    pub fn price(&self) -> Result<f64, String> {
        match self.price_usd.as_deref().map(str::trim) {
            None | Some("") => Ok(0.0),
            Some(raw) => raw
                .parse::<f64>()
                .map_err(|e| format!("invalid priceUsd {:?} for {}: {}", raw, self.pair_name(), e)),
        }
    }

    pub fn volume_h24(&self) -> f64 {
        self.volume.as_ref().and_then(|v| v.h24).unwrap_or(0.0)
    }

    pub fn into_record(self) -> Result<PriceRecord, String> {
        let price = self.price()?;
        let mut record = PriceRecord::new(price)
            .with_pair(self.pair_name())
            .with_volume(self.volume_h24())
            .with_venue(self.chain_id, self.dex_id);
        record.url = self.url;
        Ok(record)
    }
}
