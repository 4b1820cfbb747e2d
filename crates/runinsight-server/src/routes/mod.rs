//! HTTP route handlers.

pub mod health;
pub mod text_mining;

use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use runinsight_core::Error;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::error;

use crate::state::AppState;

const ENDPOINTS: &[&str] = &[
    "GET /api/health",
    "GET /api/health/ready",
    "GET /api/health/live",
    "POST /api/text-mining/classify",
    "GET /api/text-mining/categories",
    "GET /api/text-mining/stats",
    "GET /api/text-mining/stats/{userId}",
    "GET /api/text-mining/stats/{userId}/weekly",
    "GET /api/text-mining/preferences/{userId}",
];

/// Build the main Axum router with all routes.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(service_info))
        .nest("/api", api_routes())
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .merge(health::routes())
        .nest("/text-mining", text_mining::routes())
}

/// GET / — service info.
async fn service_info() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "name": "RunInsight Text Mining API",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Clasificación de preguntas de corredores por categoría",
        "endpoints": ENDPOINTS,
    }))
}

async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({
            "success": false,
            "error": "Endpoint no encontrado",
            "availableEndpoints": ENDPOINTS,
        })),
    )
}

/// Map a library error onto a JSON error response.
///
/// Client errors carry their message; anything else is a 500 whose message
/// is only exposed in dev mode.
pub(crate) fn error_response(
    state: &AppState,
    context: &str,
    err: Error,
) -> (StatusCode, Json<serde_json::Value>) {
    if err.is_client_error() {
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({
                "success": false,
                "error": "Datos de entrada inválidos",
                "details": [err.to_string()],
            })),
        );
    }

    error!("{}: {}", context, err);
    let mut body = serde_json::json!({
        "success": false,
        "error": context,
    });
    if state.config.dev_mode {
        body["message"] = serde_json::Value::String(err.to_string());
    }
    (StatusCode::INTERNAL_SERVER_ERROR, Json(body))
}

/// 400 with a list of validation messages.
pub(crate) fn validation_response(details: Vec<String>) -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::BAD_REQUEST,
        Json(serde_json::json!({
            "success": false,
            "error": "Datos de entrada inválidos",
            "details": details,
        })),
    )
}
