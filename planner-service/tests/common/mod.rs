#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    Router,
};
use planner_service::services::providers::mock::MockTextProvider;
use planner_service::services::providers::TextProvider;
use planner_service::services::storage::Record;
use planner_service::services::{EventPlanner, InMemoryStore, StorageError, TableStore};
use planner_service::{build_router, AppState};
use serde_json::Value;
use std::sync::Arc;
use tower::util::ServiceExt;

pub const TEST_ORIGIN: &str = "http://localhost:3000";

pub const VALID_PLAN: &str = r#"{
    "event_name": "Ananya weds Rohan",
    "event_type": "Intimate Kerala Wedding",
    "event_date": "2026-01-18",
    "number_of_guests": 120,
    "budget": 2500000.0,
    "required_components": [
        {"component_type": "Venue", "details": "Backwater resort in Kumarakom", "preferences": "Open-air mandap"},
        {"component_type": "Caterer", "details": "South Indian Sadhya", "preferences": "Served on banana leaves"}
    ],
    "action_items": ["Reserve resort", "Book Chenda Melam troupe"]
}"#;

/// Router over the given store, with the mock provider (or no provider).
pub fn app(store: Arc<InMemoryStore>, provider: Option<Arc<MockTextProvider>>) -> Router {
    app_with(store, provider)
}

pub fn app_with(store: Arc<dyn TableStore>, provider: Option<Arc<MockTextProvider>>) -> Router {
    let provider = provider.map(|p| p as Arc<dyn TextProvider>);
    let state = AppState::new(store, EventPlanner::new(provider));
    build_router(state, TEST_ORIGIN).expect("Failed to build router")
}

/// Store whose every call fails as if the backend were unreachable.
pub struct FailingStore;

fn unreachable() -> StorageError {
    StorageError::Transport("connection refused".to_string())
}

#[async_trait]
impl TableStore for FailingStore {
    async fn select(&self, _table: &str) -> Result<Vec<Record>, StorageError> {
        Err(unreachable())
    }

    async fn find(&self, _table: &str, _id: i64) -> Result<Option<Record>, StorageError> {
        Err(unreachable())
    }

    async fn insert(&self, _table: &str, _record: Record) -> Result<Record, StorageError> {
        Err(unreachable())
    }

    async fn update(
        &self,
        _table: &str,
        _id: i64,
        _partial: Record,
    ) -> Result<Option<Record>, StorageError> {
        Err(unreachable())
    }

    async fn delete(&self, _table: &str, _id: i64) -> Result<bool, StorageError> {
        Err(unreachable())
    }

    async fn health_check(&self) -> Result<(), StorageError> {
        Err(unreachable())
    }
}

pub fn sample_event() -> Value {
    serde_json::json!({
        "event_name": "Meera & Arjun",
        "event_type": "Rajasthani Royal Wedding",
        "event_date": "2025-11-21",
        "number_of_guests": 350,
        "budget": 4500000.0
    })
}

/// Send one request and decode the JSON body (`Null` when empty).
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| {
            Value::String(String::from_utf8_lossy(&bytes).into_owned())
        })
    };

    (status, json)
}
