//! Unit tests for SuperTrend

use std::io;
use std::sync::{Arc, Mutex};

use tracing_subscriber::fmt::MakeWriter;
use trendscreen::indicators::structure::supertrend::{
    calculate_supertrend, calculate_supertrend_default, SupertrendParams,
};
use trendscreen::indicators::IndicatorError;
use trendscreen::models::market::PriceRecord;

const EPS: f64 = 1e-9;
const WARM_UP_WARNING: &str = "Not enough records for ATR warm-up";

/// In-memory log sink for a scoped subscriber.
#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = CapturedLogs;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Run `f` with a WARN-level subscriber and return what it logged.
fn capture_warnings<T>(f: impl FnOnce() -> T) -> (T, String) {
    let logs = CapturedLogs::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(logs.clone())
        .with_max_level(tracing::Level::WARN)
        .with_ansi(false)
        .finish();
    let result = tracing::subscriber::with_default(subscriber, f);
    (result, logs.contents())
}

fn records_from(prices: &[f64]) -> Vec<PriceRecord> {
    prices
        .iter()
        .enumerate()
        .map(|(i, &price)| PriceRecord::new(price).with_pair(format!("TOK{}/USDC", i)))
        .collect()
}

/// Eleven flat bars to finish the ATR warm-up, then a crash and a rally.
fn crash_then_rally() -> Vec<PriceRecord> {
    let mut prices = vec![100.0; 11];
    prices.push(50.0);
    prices.push(200.0);
    records_from(&prices)
}

fn zigzag(count: usize) -> Vec<PriceRecord> {
    let prices: Vec<f64> = (0..count)
        .map(|i| {
            let swing = if (i / 4) % 2 == 0 { 1.0 } else { -1.0 };
            100.0 + swing * (i % 4) as f64 * 6.0 + (i as f64 * 0.7)
        })
        .collect();
    records_from(&prices)
}

#[test]
fn test_supertrend_empty_input() {
    let rows = calculate_supertrend_default(&[]).unwrap();
    assert!(rows.is_empty());
}

#[test]
fn test_supertrend_preserves_length_and_order() {
    let records = zigzag(40);
    let rows = calculate_supertrend_default(&records).unwrap();
    assert_eq!(rows.len(), records.len());
    for (row, record) in rows.iter().zip(&records) {
        assert_eq!(&row.record, record);
    }
}

#[test]
fn test_supertrend_synthetic_bar() {
    let rows = calculate_supertrend_default(&records_from(&[50.0])).unwrap();
    let row = &rows[0];
    assert!((row.high - 51.0).abs() < EPS);
    assert!((row.low - 49.0).abs() < EPS);
    assert_eq!(row.close, 50.0);
    assert!(row.true_range.is_none());
}

#[test]
fn test_supertrend_first_row_is_uptrend() {
    for records in [zigzag(25), crash_then_rally(), records_from(&[10.0])] {
        let rows = calculate_supertrend_default(&records).unwrap();
        assert_eq!(rows[0].trend, 1);
        assert_eq!(rows[0].signal, 0);
    }
}

#[test]
fn test_supertrend_signal_is_trend_delta() {
    let params = SupertrendParams::new(3, 1.0).unwrap();
    let rows = calculate_supertrend(&zigzag(60), &params).unwrap();

    for i in 1..rows.len() {
        assert!(rows[i].trend == 1 || rows[i].trend == -1);
        assert_eq!(rows[i].signal, rows[i].trend - rows[i - 1].trend);
        assert!([-2, 0, 2].contains(&rows[i].signal));
    }
}

#[test]
fn test_supertrend_bands_ratchet_within_trend() {
    let params = SupertrendParams::new(3, 1.0).unwrap();
    let rows = calculate_supertrend(&zigzag(80), &params).unwrap();

    for pair in rows.windows(2) {
        let (prev, cur) = (&pair[0], &pair[1]);
        if prev.trend != cur.trend {
            continue;
        }
        if let (Some(prev_lower), Some(lower)) = (prev.lower_band, cur.lower_band) {
            if cur.trend == 1 {
                assert!(lower >= prev_lower, "lower band fell inside an uptrend");
            }
        }
        if let (Some(prev_upper), Some(upper)) = (prev.upper_band, cur.upper_band) {
            if cur.trend == -1 {
                assert!(upper <= prev_upper, "upper band rose inside a downtrend");
            }
        }
    }
}

#[test]
fn test_supertrend_lower_band_clamped_on_dip() {
    let mut prices = vec![100.0; 11];
    prices.push(99.0);
    let rows = calculate_supertrend_default(&records_from(&prices)).unwrap();

    // 99 stays inside the previous bands, so the uptrend carries on and the
    // lower band keeps its previous, higher value.
    let prev = &rows[10];
    let cur = &rows[11];
    assert_eq!(cur.trend, 1);
    assert_eq!(cur.signal, 0);
    assert_eq!(cur.lower_band, prev.lower_band);

    let atr = cur.atr.unwrap();
    assert!((atr - 3.996).abs() < 1e-6);
    let raw_upper = 99.0 + 1.5 * atr;
    assert!((cur.upper_band.unwrap() - raw_upper).abs() < 1e-6);
}

#[test]
fn test_supertrend_short_input_has_no_atr() {
    let params = SupertrendParams::default();
    let records = records_from(&vec![100.0; params.atr_period - 1]);
    let (rows, logs) = capture_warnings(|| calculate_supertrend(&records, &params).unwrap());

    assert!(logs.contains(WARM_UP_WARNING), "missing warm-up warning: {}", logs);
    assert!(logs.contains("records=9"));
    assert!(logs.contains("atr_period=10"));

    assert_eq!(rows.len(), params.atr_period - 1);
    for row in &rows {
        assert!(row.atr.is_none());
        assert!(row.upper_band.is_none());
        assert!(row.lower_band.is_none());
        assert_eq!(row.trend, 1);
        assert_eq!(row.signal, 0);
    }
}

#[test]
fn test_supertrend_full_warm_up_does_not_warn() {
    let records = records_from(&[100.0; 12]);
    let (rows, logs) = capture_warnings(|| calculate_supertrend_default(&records).unwrap());

    assert_eq!(rows.len(), 12);
    assert!(!logs.contains(WARM_UP_WARNING), "unexpected warning: {}", logs);
}

#[test]
fn test_supertrend_atr_undefined_before_period() {
    let params = SupertrendParams::default();
    let rows = calculate_supertrend(&zigzag(20), &params).unwrap();

    for row in &rows[..params.atr_period] {
        assert!(row.atr.is_none());
    }
    for row in &rows[params.atr_period..] {
        assert!(row.atr.is_some());
        assert!(row.upper_band.is_some());
        assert!(row.lower_band.is_some());
    }
}

#[test]
fn test_supertrend_constant_price_never_flips() {
    let rows = calculate_supertrend_default(&records_from(&[100.0; 12])).unwrap();

    assert_eq!(rows.len(), 12);
    assert!(rows.iter().all(|r| r.trend == 1));
    assert!(rows.iter().all(|r| r.signal == 0));

    let last = rows.last().unwrap();
    assert!((last.atr.unwrap() - 4.0).abs() < 1e-9);
    assert!((last.upper_band.unwrap() - 106.0).abs() < 1e-9);
    assert!((last.lower_band.unwrap() - 94.0).abs() < 1e-9);
}

#[test]
fn test_supertrend_steady_rally_stays_up() {
    let prices: Vec<f64> = (0..15).map(|i| 100.0 + i as f64 * 100.0 / 14.0).collect();
    let params = SupertrendParams::new(10, 1.5).unwrap();
    let rows = calculate_supertrend(&records_from(&prices), &params).unwrap();

    assert!(rows.iter().all(|r| r.trend == 1));
    assert!(rows.iter().all(|r| r.signal == 0));

    // TR_i = 0.02 * p_i + step, so ATR_10 = 0.02 * mean(p_1..p_10) + step.
    let step = 100.0 / 14.0;
    let mean_p = 100.0 + 5.5 * step;
    let expected_atr = 0.02 * mean_p + step;
    assert!(rows[9].atr.is_none());
    assert!((rows[10].atr.unwrap() - expected_atr).abs() < 1e-9);
    assert!((expected_atr - 9.928_571_428_571).abs() < 1e-9);
}

#[test]
fn test_supertrend_crash_then_rally_flips_twice() {
    let rows = calculate_supertrend_default(&crash_then_rally()).unwrap();

    assert_eq!(rows[11].trend, -1);
    assert_eq!(rows[11].signal, -2);
    assert!((rows[11].atr.unwrap() - 8.7).abs() < 1e-9);
    assert!((rows[11].upper_band.unwrap() - 63.05).abs() < 1e-9);

    assert_eq!(rows[12].trend, 1);
    assert_eq!(rows[12].signal, 2);

    let flips: Vec<usize> = rows
        .iter()
        .enumerate()
        .filter(|(_, r)| r.signal != 0)
        .map(|(i, _)| i)
        .collect();
    assert_eq!(flips, vec![11, 12]);
}

#[test]
fn test_supertrend_depends_on_order() {
    let forward = crash_then_rally();
    let mut reversed = forward.clone();
    reversed.reverse();

    let forward_rows = calculate_supertrend_default(&forward).unwrap();
    let reversed_rows = calculate_supertrend_default(&reversed).unwrap();

    assert_eq!(forward_rows.iter().filter(|r| r.signal != 0).count(), 2);
    assert_eq!(reversed_rows.iter().filter(|r| r.signal != 0).count(), 0);
}

#[test]
fn test_supertrend_is_deterministic() {
    let records = zigzag(30);
    let first = calculate_supertrend_default(&records).unwrap();
    let second = calculate_supertrend_default(&records).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_supertrend_rejects_zero_period() {
    let params = SupertrendParams {
        atr_period: 0,
        atr_mult: 1.5,
    };
    let err = calculate_supertrend(&records_from(&[1.0, 2.0]), &params).unwrap_err();
    assert!(matches!(err, IndicatorError::InvalidParameter { name: "atr_period", .. }));
}

#[test]
fn test_supertrend_rejects_zero_period_on_empty_input() {
    let params = SupertrendParams {
        atr_period: 0,
        atr_mult: 1.5,
    };
    assert!(calculate_supertrend(&[], &params).is_err());
}

#[test]
fn test_supertrend_rejects_bad_multiplier() {
    for atr_mult in [0.0, -1.5, f64::NAN, f64::INFINITY] {
        let err = SupertrendParams::new(10, atr_mult).unwrap_err();
        assert!(matches!(err, IndicatorError::InvalidParameter { name: "atr_mult", .. }));
    }
}

#[test]
fn test_supertrend_default_params() {
    let params = SupertrendParams::default();
    assert_eq!(params.atr_period, 10);
    assert_eq!(params.atr_mult, 1.5);
}
