//! Event CRUD routes over the `events` table.

use crate::dtos::{CreateEventRequest, DeleteEventResponse, UpdateEventRequest};
use crate::models::{Event, EVENTS_TABLE};
use crate::services::storage::Record;
use crate::startup::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use service_core::error::AppError;
use validator::Validate;

fn event_from_row(row: Record) -> Result<Event, AppError> {
    serde_json::from_value(row).map_err(|e| {
        tracing::error!(error = %e, "Storage returned a malformed event row");
        AppError::InternalError(anyhow::anyhow!("Malformed event row: {}", e))
    })
}

fn not_found() -> AppError {
    AppError::NotFound(anyhow::anyhow!("Event not found."))
}

pub async fn create_event(
    State(state): State<AppState>,
    payload: Result<Json<CreateEventRequest>, JsonRejection>,
) -> Result<Json<Event>, AppError> {
    let Json(request) = payload?;
    request.validate()?;

    let record = serde_json::to_value(&request)
        .map_err(|e| AppError::InternalError(anyhow::anyhow!(e)))?;

    let row = state
        .store
        .insert(EVENTS_TABLE, record)
        .await
        .map_err(|e| AppError::failed("Error creating event", e))?;
    let event = event_from_row(row)?;

    tracing::info!(event_id = event.id, "Event created");
    Ok(Json(event))
}

pub async fn get_event(
    State(state): State<AppState>,
    Path(event_id): Path<i64>,
) -> Result<Json<Event>, AppError> {
    let row = state
        .store
        .find(EVENTS_TABLE, event_id)
        .await
        .map_err(|e| AppError::failed("Error retrieving event", e))?
        .ok_or_else(not_found)?;

    Ok(Json(event_from_row(row)?))
}

pub async fn update_event(
    State(state): State<AppState>,
    Path(event_id): Path<i64>,
    payload: Result<Json<UpdateEventRequest>, JsonRejection>,
) -> Result<Json<Event>, AppError> {
    let Json(request) = payload?;
    request.validate()?;

    if request.is_empty() {
        return Err(AppError::BadRequest(anyhow::anyhow!(
            "No fields supplied for update."
        )));
    }

    let partial = serde_json::to_value(&request)
        .map_err(|e| AppError::InternalError(anyhow::anyhow!(e)))?;

    let row = state
        .store
        .update(EVENTS_TABLE, event_id, partial)
        .await
        .map_err(|e| AppError::failed("Error updating event", e))?
        .ok_or_else(not_found)?;
    let event = event_from_row(row)?;

    tracing::info!(event_id = event.id, "Event updated");
    Ok(Json(event))
}

pub async fn delete_event(
    State(state): State<AppState>,
    Path(event_id): Path<i64>,
) -> Result<Json<DeleteEventResponse>, AppError> {
    let deleted = state
        .store
        .delete(EVENTS_TABLE, event_id)
        .await
        .map_err(|e| AppError::failed("Error deleting event", e))?;

    if !deleted {
        return Err(AppError::NotFound(anyhow::anyhow!(
            "Event not found or failed to delete."
        )));
    }

    tracing::info!(event_id, "Event deleted");
    Ok(Json(DeleteEventResponse {
        message: "Event deleted successfully.".to_string(),
    }))
}
