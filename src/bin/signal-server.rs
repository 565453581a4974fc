//! Trendscreen Signal Server
//!
//! HTTP surface exposing SuperTrend signals, trending coins and the
//! threshold screener as JSON.

use dotenvy::dotenv;
use tokio::signal;
use tracing::{error, info};
use trendscreen::config::{self, DisplayConfig, ProviderConfig};
use trendscreen::core::http::{start_server, AppState};
use trendscreen::logging;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env if present
    dotenv().ok();

    logging::init_logging();

    let providers = ProviderConfig::from_env()?;
    let params = config::supertrend_params_from_env()?;
    let display_config = DisplayConfig::from_env()?;
    let port = display_config.port;

    let env = config::get_environment();
    info!("Starting Trendscreen Signal Server");
    info!(environment = %env, "Environment");
    info!(
        atr_period = params.atr_period,
        atr_mult = params.atr_mult,
        cache_ttl_seconds = providers.cache_ttl.as_secs(),
        "SuperTrend configuration"
    );

    let state = AppState::from_config(&providers, params, display_config)?;

    let server_handle = tokio::spawn(async move {
        if let Err(e) = start_server(state, port).await {
            error!(error = %e, "HTTP server error");
        }
    });

    tokio::select! {
        _ = signal::ctrl_c() => {
            info!("Shutting down signal server...");
        }
        _ = server_handle => {
            error!("HTTP server stopped");
        }
    }

    Ok(())
}
