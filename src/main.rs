//! Trendscreen
//!
//! Fetches the latest DexScreener pairs, runs SuperTrend over them and prints
//! the rows whose trend just flipped.

use dotenvy::dotenv;
use trendscreen::config::{self, DisplayConfig, ProviderConfig};
use trendscreen::display::render_signal_report;
use trendscreen::logging;
use trendscreen::services::dexscreener::DexScreenerClient;
use trendscreen::services::market_data::load_snapshot;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    logging::init_logging();

    let providers = ProviderConfig::from_env()?;
    let params = config::supertrend_params_from_env()?;
    let display_config = DisplayConfig::from_env()?;

    let client = DexScreenerClient::new(&providers)?;
    let snapshot = load_snapshot(&client, display_config.pair_limit).await;

    if let Some(notice) = &snapshot.notice {
        eprintln!("{}", notice);
    }

    print!(
        "{}",
        render_signal_report(&snapshot.records, &params, &display_config)?
    );

    Ok(())
}
