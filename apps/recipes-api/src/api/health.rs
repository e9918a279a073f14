//! Liveness and readiness endpoints

use axum::{Json, Router, extract::State, routing::get};
use axum_helpers::AppError;
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    mongodb: bool,
}

/// Create a health check router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(is_alive))
        .route("/ready", get(readiness_check))
        .with_state(state)
}

async fn is_alive() -> Json<&'static str> {
    Json("alive")
}

/// Readiness check - verifies MongoDB answers a ping
async fn readiness_check(State(state): State<AppState>) -> Result<Json<HealthResponse>, AppError> {
    if !database::mongodb::check_health(&state.mongo_client).await {
        return Err(AppError::ServiceUnavailable("MongoDB is not reachable".to_string()));
    }

    Ok(Json(HealthResponse {
        status: "ready".to_string(),
        mongodb: true,
    }))
}
