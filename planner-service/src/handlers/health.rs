use crate::startup::AppState;
use axum::{extract::State, response::IntoResponse, Json};
use serde_json::{json, Value};
use service_core::error::AppError;

pub async fn root() -> impl IntoResponse {
    Json(json!({ "message": "Welcome to the Planiva AI Event Planner API!" }))
}

/// Liveness probe. Reports whether plan generation is available but never
/// fails on it.
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "planner-service",
        "version": env!("CARGO_PKG_VERSION"),
        "plan_generation": if state.planner.is_ready() { "enabled" } else { "disabled" }
    }))
}

/// Readiness probe: the table store must answer.
pub async fn readiness_check(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    state.store.health_check().await.map_err(|e| {
        tracing::warn!(error = %e, "Storage readiness check failed");
        AppError::ServiceUnavailable
    })?;

    Ok(Json(json!({ "status": "ready" })))
}
