//! AI agent routes: plan generation and provider listings.

use crate::dtos::{CatererParams, PlanRequest};
use crate::models::GeneratedPlan;
use crate::services::storage::{
    Record, CATERERS_TABLE, DECORATORS_TABLE, SERVICE_PROVIDERS_TABLE, VENUES_TABLE,
};
use crate::startup::AppState;
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    Json,
};
use service_core::error::AppError;
use validator::Validate;

pub async fn plan_event(
    State(state): State<AppState>,
    payload: Result<Json<PlanRequest>, JsonRejection>,
) -> Result<Json<GeneratedPlan>, AppError> {
    let Json(request) = payload?;
    request.validate()?;

    let plan = state
        .planner
        .generate_event_plan(&request.query, request.existing_details.as_ref())
        .await
        .map_err(|e| AppError::failed("Failed to generate event plan", e))?;

    tracing::info!(
        event_type = %plan.event_type,
        components = plan.required_components.len(),
        "Generated event plan"
    );

    Ok(Json(plan))
}

async fn list_table(
    state: &AppState,
    table: &'static str,
    label: &str,
) -> Result<Json<Vec<Record>>, AppError> {
    let rows = state
        .store
        .select(table)
        .await
        .map_err(|e| AppError::failed(format!("Failed to fetch {}", label), e))?;

    tracing::debug!(table, count = rows.len(), "Fetched provider listing");
    Ok(Json(rows))
}

pub async fn get_venues(State(state): State<AppState>) -> Result<Json<Vec<Record>>, AppError> {
    list_table(&state, VENUES_TABLE, "venues").await
}

/// Lists every caterer. The recommendation filters are accepted but not
/// yet applied to the query.
pub async fn get_caterers(
    State(state): State<AppState>,
    params: Result<Query<CatererParams>, QueryRejection>,
) -> Result<Json<Vec<Record>>, AppError> {
    let params = match params {
        Ok(Query(params)) => params,
        Err(rejection) => {
            tracing::debug!(
                error = %rejection.body_text(),
                "Ignoring unparseable caterer filters"
            );
            CatererParams::default()
        }
    };

    if params.cuisine_type.is_some() || params.budget_per_plate.is_some() {
        tracing::debug!(
            cuisine_type = ?params.cuisine_type,
            budget_per_plate = ?params.budget_per_plate,
            "Caterer filters are not applied"
        );
    }
    list_table(&state, CATERERS_TABLE, "caterers").await
}

pub async fn get_decorators(
    State(state): State<AppState>,
) -> Result<Json<Vec<Record>>, AppError> {
    list_table(&state, DECORATORS_TABLE, "decorators").await
}

pub async fn get_service_providers(
    State(state): State<AppState>,
) -> Result<Json<Vec<Record>>, AppError> {
    list_table(&state, SERVICE_PROVIDERS_TABLE, "service providers").await
}
