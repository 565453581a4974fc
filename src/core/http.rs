//! HTTP endpoint server using Axum

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
    routing::{delete, get},
    Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{error, info, Level};

use crate::config::{is_valid_per_page, DisplayConfig, ProviderConfig, DEFAULT_PER_PAGE};
use crate::display::{filter_rows, TrendFilter};
use crate::indicators::structure::supertrend::{calculate_supertrend, SupertrendParams};
use crate::models::market::Snapshot;
use crate::services::coingecko::CoinGeckoClient;
use crate::services::dexscreener::DexScreenerClient;
use crate::services::error::ProviderError;
use crate::services::market_data::{load_snapshot, MarketDataProvider};
use crate::signals::engine::SignalEngine;
use crate::signals::screener::{screen_by_change, DEFAULT_CHANGE_THRESHOLD};

pub const SERVICE_NAME: &str = "trendscreen-signal-server";

#[derive(Clone)]
pub struct AppState {
    pub health: Arc<RwLock<HealthStatus>>,
    pub start_time: Arc<Instant>,
    pub coingecko: Arc<CoinGeckoClient>,
    pub dexscreener: Arc<DexScreenerClient>,
    pub params: SupertrendParams,
    pub display: Arc<DisplayConfig>,
}

impl AppState {
    pub fn new(
        coingecko: CoinGeckoClient,
        dexscreener: DexScreenerClient,
        params: SupertrendParams,
        display: DisplayConfig,
    ) -> Self {
        Self {
            health: Arc::new(RwLock::new(HealthStatus::default())),
            start_time: Arc::new(Instant::now()),
            coingecko: Arc::new(coingecko),
            dexscreener: Arc::new(dexscreener),
            params,
            display: Arc::new(display),
        }
    }

    pub fn from_config(
        providers: &ProviderConfig,
        params: SupertrendParams,
        display: DisplayConfig,
    ) -> Result<Self, ProviderError> {
        Ok(Self::new(
            CoinGeckoClient::new(providers)?,
            DexScreenerClient::new(providers)?,
            params,
            display,
        ))
    }
}

#[derive(Clone, Debug)]
pub struct HealthStatus {
    pub status: String,
}

impl Default for HealthStatus {
    fn default() -> Self {
        Self {
            status: "healthy".to_string(),
        }
    }
}

pub async fn health_check(State(state): State<AppState>) -> Result<Json<Value>, StatusCode> {
    let health = state.health.read().await;
    let uptime_seconds = state.start_time.elapsed().as_secs();
    Ok(Json(json!({
        "status": health.status,
        "uptime_seconds": uptime_seconds,
        "service": SERVICE_NAME
    })))
}

#[derive(Debug, Deserialize)]
struct SignalQuery {
    min_volume: Option<f64>,
    trend: Option<TrendFilter>,
}

#[derive(Debug, Deserialize)]
struct ScreenQuery {
    per_page: Option<u32>,
    threshold: Option<f64>,
}

/// SuperTrend flips over the latest DEX pairs, after display filters
async fn list_signals(
    State(state): State<AppState>,
    Query(params): Query<SignalQuery>,
) -> Result<Json<Value>, StatusCode> {
    let min_volume = params.min_volume.unwrap_or(state.display.min_volume);
    let trend = params.trend.unwrap_or(state.display.trend_filter);
    if !min_volume.is_finite() || min_volume < 0.0 {
        return Err(StatusCode::BAD_REQUEST);
    }

    let snapshot = load_snapshot(&*state.dexscreener, state.display.pair_limit).await;
    let rows = calculate_supertrend(&snapshot.records, &state.params).map_err(|e| {
        error!(error = %e, "SuperTrend calculation failed");
        StatusCode::INTERNAL_SERVER_ERROR
    })?;
    let signals = filter_rows(&SignalEngine::signals(&rows), min_volume, trend);

    Ok(Json(json!({
        "title": state.display.title,
        "min_volume": min_volume,
        "trend": trend,
        "count": signals.len(),
        "signals": signals,
        "notice": snapshot.notice,
        "fetched_at": snapshot.fetched_at,
    })))
}

/// Every DEX pair annotated with SuperTrend state
async fn list_pairs(State(state): State<AppState>) -> Result<Json<Value>, StatusCode> {
    let snapshot = load_snapshot(&*state.dexscreener, state.display.pair_limit).await;
    let rows = calculate_supertrend(&snapshot.records, &state.params).map_err(|e| {
        error!(error = %e, "SuperTrend calculation failed");
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    Ok(Json(json!({
        "count": rows.len(),
        "rows": rows,
        "notice": snapshot.notice,
        "fetched_at": snapshot.fetched_at,
    })))
}

/// CoinGecko trending coins
async fn list_trending(State(state): State<AppState>) -> Json<Snapshot> {
    let snapshot = match state.coingecko.fetch_trending().await {
        Ok(records) => Snapshot::new(records),
        Err(e) => {
            error!(error = %e, "Failed to load trending coins");
            Snapshot::unavailable(format!("Failed to fetch trending coins: {}", e))
        }
    };
    Json(snapshot)
}

/// CoinGecko markets filtered by 24h change
async fn screen_markets(
    State(state): State<AppState>,
    Query(params): Query<ScreenQuery>,
) -> Result<Json<Value>, StatusCode> {
    let per_page = params.per_page.unwrap_or(DEFAULT_PER_PAGE);
    let threshold = params.threshold.unwrap_or(DEFAULT_CHANGE_THRESHOLD);
    if !is_valid_per_page(per_page) || !threshold.is_finite() {
        return Err(StatusCode::BAD_REQUEST);
    }

    let records = state
        .coingecko
        .fetch_market_data(per_page, 1)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to load market data");
            StatusCode::BAD_GATEWAY
        })?;
    let screened = screen_by_change(&records, threshold);

    Ok(Json(json!({
        "threshold": threshold,
        "count": screened.len(),
        "records": screened,
    })))
}

/// Drop every cached provider response
async fn clear_cache(State(state): State<AppState>) -> StatusCode {
    state.coingecko.clear_cache().await;
    state.dexscreener.clear_cache().await;
    info!("Provider caches cleared");
    StatusCode::NO_CONTENT
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/signals", get(list_signals))
        .route("/api/pairs", get(list_pairs))
        .route("/api/trending", get(list_trending))
        .route("/api/screen", get(screen_markets))
        .route("/api/cache", delete(clear_cache))
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::new().level(Level::DEBUG))
                        .on_request(DefaultOnRequest::new().level(Level::DEBUG))
                        .on_response(DefaultOnResponse::new().level(Level::DEBUG)),
                )
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

pub async fn start_server(state: AppState, port: u16) -> Result<(), Box<dyn std::error::Error>> {
    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;

    info!(port = port, "HTTP server listening on port {}", port);
    axum::serve(listener, app).await?;

    Ok(())
}
