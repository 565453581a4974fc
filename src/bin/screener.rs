//! Threshold screener
//!
//! Fetches the top CoinGecko markets and prints the coins whose 24h change
//! is at or above the threshold. Network and parse failures exit non-zero.

use dotenvy::dotenv;
use std::env;
use tracing::info;
use trendscreen::config::{CliCommand, ProviderConfig, ScreenerArgs, USAGE};
use trendscreen::display::format_screen_line;
use trendscreen::logging;
use trendscreen::services::coingecko::CoinGeckoClient;
use trendscreen::signals::screener::screen_by_change;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();

    let args = match ScreenerArgs::parse_from(env::args().skip(1))? {
        CliCommand::Help => {
            println!("{}", USAGE);
            return Ok(());
        }
        CliCommand::Run(args) => args,
    };

    logging::init_logging();

    let providers = ProviderConfig::from_env()?;
    let client = CoinGeckoClient::new(&providers)?;

    let data = client.fetch_market_data(args.per_page, 1).await?;
    let screened = screen_by_change(&data, args.threshold);
    info!(
        fetched = data.len(),
        matched = screened.len(),
        threshold = args.threshold,
        "Screened CoinGecko markets"
    );

    for coin in &screened {
        println!("{}", format_screen_line(coin));
    }

    Ok(())
}
