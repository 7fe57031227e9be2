use crate::state::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;

pub fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health_check))
        .route("/prices", get(prices))
        .route("/exchanges", get(list_exchanges))
}

// ---------------------------------------------------------------------------
// Health
// ---------------------------------------------------------------------------

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

// ---------------------------------------------------------------------------
// Prices
// ---------------------------------------------------------------------------

/// Refetch everything and return the snapshot as JSON.
async fn prices(State(state): State<Arc<AppState>>) -> Response {
    match state.dashboard.refresh().await {
        Ok(snapshot) => Json(snapshot).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to build price table");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({"error": e.to_string()})),
            )
                .into_response()
        }
    }
}

// ---------------------------------------------------------------------------
// Exchanges
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct ExchangeInfo {
    name: String,
    base_url: String,
}

async fn list_exchanges(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let exchanges: Vec<ExchangeInfo> = state
        .dashboard
        .adapters()
        .iter()
        .map(|a| ExchangeInfo {
            name: a.name().to_string(),
            base_url: a.base_url().to_string(),
        })
        .collect();
    Json(serde_json::json!({
        "exchanges": exchanges,
        "pairs": state.dashboard.pairs(),
    }))
}
