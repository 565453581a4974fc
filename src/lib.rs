//! Market screener built around a Supertrend flip detector.
//!
//! Providers fetch price snapshots from public APIs, the indicator layer
//! annotates them with Supertrend bands, and the signal layer extracts flips
//! and threshold moves for display.

pub mod common;
pub mod config;
pub mod core;
pub mod display;
pub mod indicators;
pub mod logging;
pub mod models;
pub mod services;
pub mod signals;
