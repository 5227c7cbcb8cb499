use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use stockdash_core::domain::dashboard::DashboardView;
use stockdash_core::domain::stock::StockData;
use stockdash_core::ingest::error::StockDataError;
use stockdash_core::ingest::fmp::FmpClient;
use stockdash_core::ingest::provider::StockDataProvider;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = stockdash_core::config::Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .with(sentry_tracing::layer())
        .init();

    let provider: Option<Arc<dyn StockDataProvider>> = match FmpClient::from_settings(&settings) {
        Ok(client) => Some(Arc::new(client)),
        Err(e) => {
            sentry_anyhow::capture_anyhow(&e);
            tracing::error!(error = %e, "FMP client init failed; starting API in degraded mode");
            None
        }
    };

    let state = AppState { provider };

    let app = Router::new()
        .route("/healthz", get(healthz))
        .route("/stocks/:ticker", get(get_stock_data))
        .route("/stocks/:ticker/dashboard", get(get_stock_dashboard))
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(3000);
    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));

    tracing::info!(%addr, "api listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn healthz() -> &'static str {
    "ok"
}

#[derive(Clone)]
struct AppState {
    provider: Option<Arc<dyn StockDataProvider>>,
}

async fn get_stock_data(
    State(state): State<AppState>,
    Path(ticker): Path<String>,
) -> Result<Json<StockData>, StatusCode> {
    let ticker = normalize_ticker(&ticker)?;
    let data = fetch_for(&state, &ticker).await?;
    Ok(Json(data))
}

async fn get_stock_dashboard(
    State(state): State<AppState>,
    Path(ticker): Path<String>,
) -> Result<Json<DashboardView>, StatusCode> {
    let ticker = normalize_ticker(&ticker)?;
    let data = fetch_for(&state, &ticker).await?;
    Ok(Json(DashboardView::build(&ticker, &data)))
}

async fn fetch_for(state: &AppState, ticker: &str) -> Result<StockData, StatusCode> {
    let Some(provider) = &state.provider else {
        return Err(StatusCode::SERVICE_UNAVAILABLE);
    };

    provider
        .fetch_stock_data(ticker)
        .await
        .map_err(handle_fetch_error)
}

fn normalize_ticker(ticker: &str) -> Result<String, StatusCode> {
    let ticker = ticker.trim().to_uppercase();
    if ticker.is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }
    Ok(ticker)
}

fn handle_fetch_error(err: anyhow::Error) -> StatusCode {
    match err.downcast_ref::<StockDataError>() {
        // FMP answers unknown tickers with empty sections everywhere.
        Some(StockDataError::NoData { .. }) => StatusCode::NOT_FOUND,
        Some(StockDataError::Validation { .. }) => {
            tracing::warn!(error = %err, "provider payload failed validation");
            StatusCode::BAD_GATEWAY
        }
        Some(StockDataError::Assembly { .. }) | None => {
            sentry_anyhow::capture_anyhow(&err);
            tracing::error!(error = %err, "stock data fetch failed");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}

fn init_sentry(settings: &stockdash_core::config::Settings) -> Option<sentry::ClientInitGuard> {
    let dsn = settings.sentry_dsn.as_deref()?;
    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    )))
}
