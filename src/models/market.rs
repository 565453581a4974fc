use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One price observation as produced by a market data provider.
///
/// Providers coerce missing prices to `0.0` before handing records over.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRecord {
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub pair: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub symbol: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub volume: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub chain: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub dex: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub price_change_percentage_24h: Option<f64>,
}

impl PriceRecord {
    pub fn new(price: f64) -> Self {
        Self {
            price,
            pair: None,
            symbol: None,
            name: None,
            volume: None,
            url: None,
            chain: None,
            dex: None,
            price_change_percentage_24h: None,
        }
    }

    pub fn with_pair(mut self, pair: impl Into<String>) -> Self {
        self.pair = Some(pair.into());
        self
    }

    pub fn with_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = Some(symbol.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_volume(mut self, volume: f64) -> Self {
        self.volume = Some(volume);
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn with_venue(mut self, chain: impl Into<String>, dex: impl Into<String>) -> Self {
        self.chain = Some(chain.into());
        self.dex = Some(dex.into());
        self
    }

    pub fn with_price_change_24h(mut self, pct: f64) -> Self {
        self.price_change_percentage_24h = Some(pct);
        self
    }

    /// Display identifier: the pair if known, else the symbol, else the name.
    pub fn identifier(&self) -> &str {
        self.pair
            .as_deref()
            .or(self.symbol.as_deref())
            .or(self.name.as_deref())
            .unwrap_or("?")
    }
}

/// Result of one provider fetch as seen by the display surfaces.
///
/// Fetch failures are absorbed into an empty `records` list and a
/// human-readable `notice`.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub records: Vec<PriceRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
    pub fetched_at: DateTime<Utc>,
}

impl Snapshot {
    pub fn new(records: Vec<PriceRecord>) -> Self {
        Self {
            records,
            notice: None,
            fetched_at: Utc::now(),
        }
    }

    pub fn unavailable(notice: impl Into<String>) -> Self {
        Self {
            records: Vec::new(),
            notice: Some(notice.into()),
            fetched_at: Utc::now(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
