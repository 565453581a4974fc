//! SuperTrend indicator

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::common::math;
use crate::indicators::error::IndicatorError;
use crate::indicators::volatility::{calculate_atr_series, true_range_series};
use crate::models::indicators::{BandRecord, TREND_DOWN, TREND_UP};
use crate::models::market::PriceRecord;

/// Synthetic spread applied around a single price to build high/low.
pub const SYNTHETIC_SPREAD: f64 = 0.02;

pub const DEFAULT_ATR_PERIOD: usize = 10;
pub const DEFAULT_ATR_MULTIPLIER: f64 = 1.5;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SupertrendParams {
    pub atr_period: usize,
    pub atr_mult: f64,
}

impl SupertrendParams {
    /// Build validated parameters.
    pub fn new(atr_period: usize, atr_mult: f64) -> Result<Self, IndicatorError> {
        let params = Self {
            atr_period,
            atr_mult,
        };
        params.validate()?;
        Ok(params)
    }

    pub fn validate(&self) -> Result<(), IndicatorError> {
        if self.atr_period == 0 {
            return Err(IndicatorError::invalid("atr_period", "must be at least 1"));
        }
        if !self.atr_mult.is_finite() || self.atr_mult <= 0.0 {
            return Err(IndicatorError::invalid(
                "atr_mult",
                format!("must be a positive finite number, got {}", self.atr_mult),
            ));
        }
        Ok(())
    }
}

impl Default for SupertrendParams {
    fn default() -> Self {
        Self {
            atr_period: DEFAULT_ATR_PERIOD,
            atr_mult: DEFAULT_ATR_MULTIPLIER,
        }
    }
}

/// Band state carried from one row to the next.
#[derive(Debug, Clone, Copy)]
struct TrendState {
    trend: i32,
    upper_band: Option<f64>,
    lower_band: Option<f64>,
}

/// Calculate SuperTrend over an ordered sequence of price records
///
/// Each record is treated as one bar with `high = price * 1.02`,
/// `low = price * 0.98`, `close = price`. The record order is the time axis.
///
/// trend: 1 for uptrend, -1 for downtrend. The first row is always an uptrend.
/// A row flips up when its close exceeds the previous upper band and down
/// when it drops below the previous lower band. While the trend holds, the
/// band protecting it only moves in the trend's direction.
pub fn calculate_supertrend(
    records: &[PriceRecord],
    params: &SupertrendParams,
) -> Result<Vec<BandRecord>, IndicatorError> {
    params.validate()?;

    if records.is_empty() {
        return Ok(Vec::new());
    }

    if records.len() < params.atr_period {
        warn!(
            records = records.len(),
            atr_period = params.atr_period,
            "Not enough records for ATR warm-up, bands stay undefined"
        );
    }

    let high: Vec<f64> = records
        .iter()
        .map(|r| r.price * (1.0 + SYNTHETIC_SPREAD))
        .collect();
    let low: Vec<f64> = records
        .iter()
        .map(|r| r.price * (1.0 - SYNTHETIC_SPREAD))
        .collect();
    let close: Vec<f64> = records.iter().map(|r| r.price).collect();

    let tr_values = true_range_series(&high, &low, &close);
    let atr_values = calculate_atr_series(&tr_values, params.atr_period)?;

    let mut rows = Vec::with_capacity(records.len());
    let mut prev: Option<TrendState> = None;

    for (i, record) in records.iter().enumerate() {
        let hl2 = math::hl2(high[i], low[i]);
        let mut upper_band = atr_values[i].map(|atr| hl2 + params.atr_mult * atr);
        let mut lower_band = atr_values[i].map(|atr| hl2 - params.atr_mult * atr);

        let (trend, signal) = match prev {
            None => (TREND_UP, 0),
            Some(state) => {
                let trend = if crosses_above(close[i], state.upper_band) {
                    TREND_UP
                } else if crosses_below(close[i], state.lower_band) {
                    TREND_DOWN
                } else {
                    state.trend
                };

                if trend == state.trend {
                    if trend == TREND_UP {
                        lower_band = ratchet(lower_band, state.lower_band, f64::max);
                    } else {
                        upper_band = ratchet(upper_band, state.upper_band, f64::min);
                    }
                }

                (trend, trend - state.trend)
            }
        };

        if signal != 0 {
            debug!(
                index = i,
                identifier = record.identifier(),
                close = close[i],
                trend,
                "SuperTrend flip"
            );
        }

        prev = Some(TrendState {
            trend,
            upper_band,
            lower_band,
        });

        rows.push(BandRecord {
            record: record.clone(),
            high: high[i],
            low: low[i],
            close: close[i],
            true_range: tr_values[i],
            atr: atr_values[i],
            upper_band,
            lower_band,
            trend,
            signal,
        });
    }

    Ok(rows)
}

/// Calculate SuperTrend with default parameters (10, 1.5)
pub fn calculate_supertrend_default(
    records: &[PriceRecord],
) -> Result<Vec<BandRecord>, IndicatorError> {
    calculate_supertrend(records, &SupertrendParams::default())
}

fn crosses_above(close: f64, prev_upper: Option<f64>) -> bool {
    prev_upper.is_some_and(|band| close > band)
}

fn crosses_below(close: f64, prev_lower: Option<f64>) -> bool {
    prev_lower.is_some_and(|band| close < band)
}

fn ratchet(current: Option<f64>, previous: Option<f64>, pick: fn(f64, f64) -> f64) -> Option<f64> {
    match (current, previous) {
        (Some(current), Some(previous)) => Some(pick(current, previous)),
        (current, _) => current,
    }
}
