//! Small numeric primitives used by the indicator calculations.

/// True range of a bar given the previous close.
///
/// Greatest of `high - low`, `|high - prev_close|` and `|low - prev_close|`.
pub fn true_range(high: f64, low: f64, prev_close: f64) -> f64 {
    (high - low)
        .max((high - prev_close).abs())
        .max((low - prev_close).abs())
}

/// Midpoint of a high/low pair.
pub fn hl2(high: f64, low: f64) -> f64 {
    (high + low) / 2.0
}
