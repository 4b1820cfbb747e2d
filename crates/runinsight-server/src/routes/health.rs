//! Liveness and readiness probes.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use runinsight_core::CategoryKey;

use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(ready))
        .route("/health/live", get(live))
}

/// GET /api/health
async fn health(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let database = if state.store.count_categories().is_ok() {
        "connected"
    } else {
        "disconnected"
    };

    Json(serde_json::json!({
        "status": "OK",
        "timestamp": Utc::now(),
        "uptime": state.uptime_secs(),
        "version": env!("CARGO_PKG_VERSION"),
        "services": {
            "database": database,
            "textMining": "active",
        },
    }))
}

/// GET /api/health/ready — 503 until the store answers and has every category.
async fn ready(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match state.store.count_categories() {
        Ok(count) if count == CategoryKey::ALL.len() as i64 => (
            StatusCode::OK,
            Json(serde_json::json!({
                "status": "READY",
                "timestamp": Utc::now(),
                "checks": {
                    "database": "OK",
                    "categories": count,
                },
            })),
        ),
        Ok(count) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(serde_json::json!({
                "status": "NOT_READY",
                "timestamp": Utc::now(),
                "error": format!("Se esperaban {} categorías, hay {}", CategoryKey::ALL.len(), count),
            })),
        ),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(serde_json::json!({
                "status": "NOT_READY",
                "timestamp": Utc::now(),
                "error": e.to_string(),
            })),
        ),
    }
}

/// GET /api/health/live
async fn live() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ALIVE",
        "timestamp": Utc::now(),
        "pid": std::process::id(),
    }))
}
