//! Question classification and per-user statistics routes.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Utc;
use runinsight_classify::ClassificationResult;
use runinsight_store::{UserStats, MAX_PERIOD_DAYS};
use serde::Deserialize;
use tracing::{info, warn};

use super::{error_response, validation_response};
use crate::state::AppState;
use crate::validation::{parse_user_id, validate_classify_body};

const DEFAULT_PERIOD_DAYS: u32 = 7;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/classify", post(classify))
        .route("/categories", get(list_categories))
        .route("/stats", get(global_stats))
        .route("/stats/{user_id}", get(user_stats))
        .route("/stats/{user_id}/weekly", get(weekly_stats))
        .route("/preferences/{user_id}", get(user_preferences))
}

// ---------------------------------------------------------------
// Query / Body types
// ---------------------------------------------------------------

#[derive(Deserialize)]
struct PeriodQuery {
    days: Option<String>,
}

type JsonResponse = (StatusCode, Json<serde_json::Value>);

fn path_user_id(raw: &str) -> Result<i64, JsonResponse> {
    parse_user_id(&serde_json::Value::String(raw.to_string()))
        .map_err(|_| validation_response(vec!["ID de usuario inválido".to_string()]))
}

fn period_days(query: &PeriodQuery) -> Result<u32, JsonResponse> {
    let Some(raw) = query.days.as_deref() else {
        return Ok(DEFAULT_PERIOD_DAYS);
    };
    match raw.trim().parse::<u32>() {
        Ok(days) if (1..=MAX_PERIOD_DAYS).contains(&days) => Ok(days),
        _ => Err(validation_response(vec![format!(
            "El parámetro days debe estar entre 1 y {}",
            MAX_PERIOD_DAYS
        )])),
    }
}

// ---------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------

/// POST /api/text-mining/classify — classify a question and record it.
async fn classify(
    State(state): State<Arc<AppState>>,
    body: Result<Json<serde_json::Value>, JsonRejection>,
) -> impl IntoResponse {
    let Json(body) = match body {
        Ok(body) => body,
        Err(rejection) => return validation_response(vec![rejection.body_text()]),
    };

    let input = match validate_classify_body(&body) {
        Ok(input) => input,
        Err(details) => return validation_response(details),
    };

    let result = match state.classifier.classify(&input.question) {
        Ok(result) => result,
        Err(e) => return error_response(&state, "Error al clasificar la pregunta", e),
    };

    if let Err(e) = state
        .store
        .save_question(input.user_id, &input.question, result.category_key)
    {
        return error_response(&state, "Error al guardar la pregunta", e);
    }

    // The question is already stored; a failed stats read only drops `userStats`.
    let user_stats = match state.store.user_stats(input.user_id) {
        Ok(stats) => Some(stats),
        Err(e) => {
            warn!("Stats unavailable for user {}: {}", input.user_id, e);
            None
        }
    };

    info!(
        "User {} asked about {} ({}%)",
        input.user_id, result.category, result.confidence
    );

    (StatusCode::OK, Json(classify_body(&result, user_stats.as_ref())))
}

fn classify_body(result: &ClassificationResult, user_stats: Option<&UserStats>) -> serde_json::Value {
    serde_json::json!({
        "success": true,
        "category": result.category,
        "confidence": result.confidence,
        "scores": result.scores,
        "userStats": user_stats,
        "timestamp": Utc::now(),
    })
}

/// GET /api/text-mining/categories
async fn list_categories(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match state.store.list_categories() {
        Ok(categories) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "success": true,
                "categories": categories,
            })),
        ),
        Err(e) => error_response(&state, "Error al obtener categorías", e),
    }
}

/// GET /api/text-mining/stats/{userId}
async fn user_stats(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> impl IntoResponse {
    let user_id = match path_user_id(&user_id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    match state.store.user_stats(user_id) {
        Ok(stats) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "success": true,
                "stats": stats,
            })),
        ),
        Err(e) => error_response(&state, "Error al obtener estadísticas", e),
    }
}

/// GET /api/text-mining/stats/{userId}/weekly?days=N
async fn weekly_stats(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    Query(query): Query<PeriodQuery>,
) -> impl IntoResponse {
    let user_id = match path_user_id(&user_id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    let days = match period_days(&query) {
        Ok(days) => days,
        Err(resp) => return resp,
    };
    match state.store.user_stats_since(user_id, days) {
        Ok(stats) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "success": true,
                "stats": stats,
            })),
        ),
        Err(e) => error_response(&state, "Error al obtener estadísticas", e),
    }
}

/// GET /api/text-mining/preferences/{userId}
async fn user_preferences(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> impl IntoResponse {
    let user_id = match path_user_id(&user_id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    match state.store.user_preferences(user_id) {
        Ok(preferences) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "success": true,
                "preferences": preferences,
            })),
        ),
        Err(e) => error_response(&state, "Error al obtener preferencias", e),
    }
}

/// GET /api/text-mining/stats
async fn global_stats(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match state.store.global_stats() {
        Ok(stats) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "success": true,
                "stats": stats,
            })),
        ),
        Err(e) => error_response(&state, "Error al obtener estadísticas globales", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_period_days_defaults_and_bounds() {
        assert_eq!(period_days(&PeriodQuery { days: None }).unwrap(), 7);
        assert_eq!(period_days(&PeriodQuery { days: Some("30".into()) }).unwrap(), 30);
        assert!(period_days(&PeriodQuery { days: Some("0".into()) }).is_err());
        assert!(period_days(&PeriodQuery { days: Some("31".into()) }).is_err());
        assert!(period_days(&PeriodQuery { days: Some("siete".into()) }).is_err());
    }

    #[test]
    fn test_path_user_id() {
        assert_eq!(path_user_id("123").unwrap(), 123);
        let (status, _) = path_user_id("abc").unwrap_err();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(path_user_id("-1").is_err());
    }

    #[test]
    fn test_classify_body_without_stats() {
        let result = runinsight_classify::classify("¿Qué debo comer antes de correr?").unwrap();

        let body = classify_body(&result, None);
        assert_eq!(body["success"], true);
        assert_eq!(body["category"], "Nutrición");
        assert!(body["userStats"].is_null());
        assert_eq!(body["scores"].as_object().unwrap().len(), 5);

        let stats = runinsight_store::QuestionStore::open_in_memory()
            .unwrap()
            .user_stats(3)
            .unwrap();
        let body = classify_body(&result, Some(&stats));
        assert_eq!(body["userStats"]["userId"], 3);
    }
}
