//! Filters and text rendering for screener output.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::DisplayConfig;
use crate::indicators::error::IndicatorError;
use crate::indicators::structure::supertrend::{calculate_supertrend, SupertrendParams};
use crate::models::indicators::{BandRecord, TREND_DOWN, TREND_UP};
use crate::models::market::PriceRecord;
use crate::signals::engine::SignalEngine;

/// Trend-direction selector applied to signal rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendFilter {
    #[default]
    All,
    Up,
    Down,
}

impl TrendFilter {
    pub fn matches(&self, trend: i32) -> bool {
        match self {
            TrendFilter::All => true,
            TrendFilter::Up => trend == TREND_UP,
            TrendFilter::Down => trend == TREND_DOWN,
        }
    }
}

impl FromStr for TrendFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" | "" => Ok(TrendFilter::All),
            "up" | "uptrend" => Ok(TrendFilter::Up),
            "down" | "downtrend" => Ok(TrendFilter::Down),
            other => Err(format!("expected all, up or down, got {:?}", other)),
        }
    }
}

impl fmt::Display for TrendFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TrendFilter::All => "all",
            TrendFilter::Up => "up",
            TrendFilter::Down => "down",
        };
        f.write_str(label)
    }
}

/// Keep rows with at least `min_volume` traded and a matching trend.
///
/// Rows without a volume count as zero volume.
pub fn filter_rows(rows: &[BandRecord], min_volume: f64, trend: TrendFilter) -> Vec<BandRecord> {
    rows.iter()
        .filter(|row| row.record.volume.unwrap_or(0.0) >= min_volume)
        .filter(|row| trend.matches(row.trend))
        .cloned()
        .collect()
}

/// `<name> (<SYMBOL>): <price> USD, 24h change <pct>%`
pub fn format_screen_line(record: &PriceRecord) -> String {
    let name = record.name.as_deref().unwrap_or_else(|| record.identifier());
    let symbol = record.symbol.as_deref().unwrap_or("").to_uppercase();
    let change = record
        .price_change_percentage_24h
        .map(|pct| pct.to_string())
        .unwrap_or_else(|| "n/a".to_string());
    format!(
        "{} ({}): {} USD, 24h change {}%",
        name, symbol, record.price, change
    )
}

pub fn trend_label(trend: i32) -> &'static str {
    if trend == TREND_UP {
        "UP"
    } else {
        "DOWN"
    }
}

pub fn signal_label(signal: i32) -> &'static str {
    match signal.signum() {
        1 => "BUY",
        -1 => "SELL",
        _ => "-",
    }
}

/// Plain-text table of signal rows.
pub fn render_signal_table(rows: &[BandRecord]) -> String {
    let pair_width = rows
        .iter()
        .map(|row| row.identifier().len())
        .max()
        .unwrap_or(0)
        .max("PAIR".len());

    let mut out = format!(
        "{:<pair_width$}  {:>16}  {:<5}  {:<6}  {:>16}  URL\n",
        "PAIR", "PRICE", "TREND", "SIGNAL", "VOLUME 24H",
    );

    for row in rows {
        out.push_str(&format!(
            "{:<pair_width$}  {:>16.8}  {:<5}  {:<6}  {:>16.2}  {}\n",
            row.identifier(),
            row.price(),
            trend_label(row.trend),
            signal_label(row.signal),
            row.record.volume.unwrap_or(0.0),
            row.record.url.as_deref().unwrap_or(""),
        ));
    }

    out
}

/// Page title, heading and the filtered signal table for one snapshot.
pub fn render_signal_report(
    records: &[PriceRecord],
    params: &SupertrendParams,
    display_config: &DisplayConfig,
) -> Result<String, IndicatorError> {
    let rows = calculate_supertrend(records, params)?;
    let signals = filter_rows(
        &SignalEngine::signals(&rows),
        display_config.min_volume,
        display_config.trend_filter,
    );
    info!(
        pairs = rows.len(),
        signals = signals.len(),
        min_volume = display_config.min_volume,
        trend = %display_config.trend_filter,
        "Computed SuperTrend signals"
    );

    let mut out = format!("{}\nNew trend signals\n", display_config.title);
    if signals.is_empty() {
        out.push_str("No trend flips in the current snapshot.\n");
    } else {
        out.push_str(&render_signal_table(&signals));
    }
    Ok(out)
}
