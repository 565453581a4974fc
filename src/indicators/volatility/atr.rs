//! ATR (Average True Range) indicator

use crate::common::math;
use crate::indicators::error::IndicatorError;

/// True range per bar, aligned with the input.
///
/// The first bar has no previous close, so its entry is `None`.
pub fn true_range_series(high: &[f64], low: &[f64], close: &[f64]) -> Vec<Option<f64>> {
    let len = high.len().min(low.len()).min(close.len());
    let mut tr_values = Vec::with_capacity(len);

    for i in 0..len {
        if i == 0 {
            tr_values.push(None);
        } else {
            tr_values.push(Some(math::true_range(high[i], low[i], close[i - 1])));
        }
    }

    tr_values
}

/// Rolling ATR over a true-range series, aligned with the input.
///
/// `atr[i]` is the simple mean of `true_ranges[i - period + 1..=i]` and is only
/// emitted when every value in that window is defined. No partial averages
/// are produced during warm-up.
pub fn calculate_atr_series(
    true_ranges: &[Option<f64>],
    period: usize,
) -> Result<Vec<Option<f64>>, IndicatorError> {
    if period == 0 {
        return Err(IndicatorError::invalid("atr_period", "must be at least 1"));
    }

    let mut atr_values = Vec::with_capacity(true_ranges.len());
    let mut window_sum = 0.0;
    let mut defined_run = 0usize;

    for (i, tr) in true_ranges.iter().enumerate() {
        match tr {
            Some(value) => {
                window_sum += value;
                defined_run += 1;
            }
            None => {
                window_sum = 0.0;
                defined_run = 0;
            }
        }

        if defined_run > period {
            // Oldest value leaving the window is defined since the run covers it.
            if let Some(expired) = true_ranges[i - period] {
                window_sum -= expired;
            }
        }

        if defined_run >= period {
            atr_values.push(Some(window_sum / period as f64));
        } else {
            atr_values.push(None);
        }
    }

    Ok(atr_values)
}
