//! Runtime configuration loaded from the environment and command line.

pub mod cli;

use std::env;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;
use url::Url;

use crate::display::TrendFilter;
use crate::indicators::structure::supertrend::SupertrendParams;

pub use cli::{is_valid_per_page, CliCommand, ScreenerArgs, DEFAULT_PER_PAGE, MAX_PER_PAGE, USAGE};

pub const DEFAULT_COINGECKO_API_URL: &str = "https://api.coingecko.com/api/v3";
pub const DEFAULT_DEXSCREENER_API_URL: &str = "https://api.dexscreener.com";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?} ({reason})")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },
    #[error("unknown argument: {0}")]
    UnknownArgument(String),
    #[error("missing value for {0}")]
    MissingValue(String),
}

/// Current deployment environment (`APP_ENV`, defaults to `sandbox`).
pub fn get_environment() -> String {
    env::var("APP_ENV").unwrap_or_else(|_| "sandbox".to_string())
}

fn parse_value<T>(key: &str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim().parse::<T>().map_err(|e| ConfigError::InvalidValue {
        key: key.to_string(),
        value: raw.to_string(),
        reason: e.to_string(),
    })
}

fn lookup_or<T, F>(lookup: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => parse_value(key, &raw),
        _ => Ok(default),
    }
}

fn lookup_url<F>(lookup: &F, key: &str, default: &str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key)
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string());
    let parsed = Url::parse(raw.trim()).map_err(|e| ConfigError::InvalidValue {
        key: key.to_string(),
        value: raw.clone(),
        reason: e.to_string(),
    })?;
    Ok(parsed.as_str().trim_end_matches('/').to_string())
}

fn env_lookup(key: &str) -> Option<String> {
    env::var(key).ok()
}

/// HTTP provider settings.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderConfig {
    pub coingecko_base_url: String,
    pub dexscreener_base_url: String,
    pub timeout: Duration,
    pub cache_ttl: Duration,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            coingecko_base_url: DEFAULT_COINGECKO_API_URL.to_string(),
            dexscreener_base_url: DEFAULT_DEXSCREENER_API_URL.to_string(),
            timeout: Duration::from_secs(10),
            cache_ttl: Duration::from_secs(60),
        }
    }
}

impl ProviderConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(env_lookup)
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Ok(Self {
            coingecko_base_url: lookup_url(&lookup, "COINGECKO_API_URL", DEFAULT_COINGECKO_API_URL)?,
            dexscreener_base_url: lookup_url(
                &lookup,
                "DEXSCREENER_API_URL",
                DEFAULT_DEXSCREENER_API_URL,
            )?,
            timeout: Duration::from_secs(lookup_or(
                &lookup,
                "HTTP_TIMEOUT_SECONDS",
                defaults.timeout.as_secs(),
            )?),
            cache_ttl: Duration::from_secs(lookup_or(
                &lookup,
                "CACHE_TTL_SECONDS",
                defaults.cache_ttl.as_secs(),
            )?),
        })
    }
}

/// Load SuperTrend parameters from `ATR_PERIOD` / `ATR_MULTIPLIER`.
pub fn supertrend_params_from_env() -> Result<SupertrendParams, ConfigError> {
    supertrend_params_from_lookup(env_lookup)
}

pub fn supertrend_params_from_lookup<F>(lookup: F) -> Result<SupertrendParams, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let defaults = SupertrendParams::default();
    let atr_period = lookup_or(&lookup, "ATR_PERIOD", defaults.atr_period)?;
    let atr_mult = lookup_or(&lookup, "ATR_MULTIPLIER", defaults.atr_mult)?;

    SupertrendParams::new(atr_period, atr_mult).map_err(|e| ConfigError::InvalidValue {
        key: "ATR_PERIOD/ATR_MULTIPLIER".to_string(),
        value: format!("{}/{}", atr_period, atr_mult),
        reason: e.to_string(),
    })
}

/// Settings handed to the display surfaces at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayConfig {
    pub title: String,
    pub pair_limit: usize,
    pub min_volume: f64,
    pub trend_filter: TrendFilter,
    pub port: u16,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            title: "DEX Crypto Screener - Supertrend Style".to_string(),
            pair_limit: 30,
            min_volume: 0.0,
            trend_filter: TrendFilter::All,
            port: 8080,
        }
    }
}

impl DisplayConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(env_lookup)
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let min_volume: f64 = lookup_or(&lookup, "MIN_VOLUME", defaults.min_volume)?;
        if !min_volume.is_finite() || min_volume < 0.0 {
            return Err(ConfigError::InvalidValue {
                key: "MIN_VOLUME".to_string(),
                value: min_volume.to_string(),
                reason: "must be a non-negative number".to_string(),
            });
        }

        Ok(Self {
            title: lookup("SCREENER_TITLE")
                .filter(|t| !t.trim().is_empty())
                .unwrap_or(defaults.title),
            pair_limit: lookup_or(&lookup, "PAIR_LIMIT", defaults.pair_limit)?,
            min_volume,
            trend_filter: lookup_or(&lookup, "TREND_FILTER", defaults.trend_filter)?,
            port: lookup_or(&lookup, "PORT", defaults.port)?,
        })
    }
}
