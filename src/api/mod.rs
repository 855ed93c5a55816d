mod error;

use std::sync::Arc;

use anyhow::Result;
use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::Serialize;

pub use error::ApiError;

use crate::{
    address::address_validation_error,
    aggregator::StatsAggregator,
    lookup_stats::{LookupSnapshot, LOOKUP_STATS},
    models::WalletStats,
    share::{self, PreviewMetadata, ShareQuery},
};

#[derive(Clone)]
pub struct AppState {
    pub aggregator: Arc<StatsAggregator>,
    pub public_base_url: String,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StatsResponse {
    address: String,
    #[serde(flatten)]
    stats: WalletStats,
    share_url: String,
    image_url: String,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

async fn wallet_stats(
    State(state): State<AppState>,
    Path(address): Path<String>,
) -> Result<Json<StatsResponse>, ApiError> {
    if let Some(err) = address_validation_error(&address) {
        return Err(err.into());
    }
    let address = address.trim().to_string();

    let stats = state.aggregator.wallet_stats(&address).await;
    Ok(Json(StatsResponse {
        share_url: share::share_url(&state.public_base_url, &stats),
        image_url: share::image_url(&state.public_base_url, &stats),
        address,
        stats,
    }))
}

async fn share_metadata(
    State(state): State<AppState>,
    Query(query): Query<ShareQuery>,
) -> Json<PreviewMetadata> {
    Json(query.metadata(&state.public_base_url))
}

async fn lookup_counters() -> Json<LookupSnapshot> {
    Json(LOOKUP_STATS.snapshot())
}

pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/stats/:address", get(wallet_stats))
        .route("/share", get(share_metadata))
        .route("/metrics/lookups", get(lookup_counters))
        .with_state(state)
}

pub async fn run_http_server(addr: &str, state: AppState) -> Result<()> {
    let app = app_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("HTTP server listening on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
