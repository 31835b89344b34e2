mod common;

use axum::http::{Method, StatusCode};
use common::{app, app_with, send, FailingStore, VALID_PLAN};
use planner_service::services::providers::mock::MockTextProvider;
use planner_service::services::storage::{CATERERS_TABLE, SERVICE_PROVIDERS_TABLE, VENUES_TABLE};
use planner_service::services::InMemoryStore;
use serde_json::json;
use std::sync::Arc;

#[tokio::test]
async fn plan_event_returns_generated_plan() {
    let mock = Arc::new(MockTextProvider::returning(VALID_PLAN));
    let app = app(Arc::new(InMemoryStore::new()), Some(mock.clone()));

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/agent/plan_event",
        Some(json!({ "query": "Intimate Kerala wedding for 120 guests" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["event_type"], "Intimate Kerala Wedding");
    assert_eq!(body["number_of_guests"], 120);
    assert_eq!(body["required_components"].as_array().unwrap().len(), 2);
    assert_eq!(body["action_items"][1], "Book Chenda Melam troupe");
    assert_eq!(mock.call_count(), 1);
}

#[tokio::test]
async fn plan_event_without_model_is_server_error() {
    let app = app(Arc::new(InMemoryStore::new()), None);

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/agent/plan_event",
        Some(json!({ "query": "Goa beach wedding", "existing_details": { "budget": 100 } })),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Failed to generate event plan");
    assert_eq!(
        body["details"],
        "Critical: Gemini client is not initialized. Please check the server logs and API key."
    );
}

#[tokio::test]
async fn plan_event_with_non_json_output_reports_format_error() {
    let mock = Arc::new(MockTextProvider::returning("Sure! Here's a lovely plan..."));
    let app = app(Arc::new(InMemoryStore::new()), Some(mock));

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/agent/plan_event",
        Some(json!({ "query": "Delhi farmhouse wedding" })),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body["details"],
        "The AI returned an invalid format. Please try rephrasing your request."
    );
}

#[tokio::test]
async fn plan_event_rejects_empty_query_before_calling_model() {
    let mock = Arc::new(MockTextProvider::returning(VALID_PLAN));
    let app = app(Arc::new(InMemoryStore::new()), Some(mock.clone()));

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/agent/plan_event",
        Some(json!({ "query": "" })),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(mock.call_count(), 0);
}

#[tokio::test]
async fn listings_are_returned_unmodified() {
    let venue = json!({ "id": 1, "name": "City Palace", "city": "Udaipur", "capacity": 600 });
    let caterer = json!({ "id": 2, "name": "Sadhya House", "cuisine": "Kerala" });
    let provider = json!({ "id": 3, "name": "Henna by Ria", "service": "Mehendi Artist" });
    let store = InMemoryStore::new()
        .with_rows(VENUES_TABLE, vec![venue.clone()])
        .with_rows(CATERERS_TABLE, vec![caterer.clone()])
        .with_rows(SERVICE_PROVIDERS_TABLE, vec![provider.clone()]);
    let app = app(Arc::new(store), None);

    let (status, body) = send(&app, Method::GET, "/api/agent/venues", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([venue]));

    let (_, body) = send(&app, Method::GET, "/api/agent/service_providers", None).await;
    assert_eq!(body, json!([provider]));

    let (_, body) = send(&app, Method::GET, "/api/agent/decorators", None).await;
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn caterer_filters_are_accepted_but_not_applied() {
    let caterers = vec![
        json!({ "id": 1, "name": "Sadhya House", "cuisine": "Kerala" }),
        json!({ "id": 2, "name": "Amritsari Rasoi", "cuisine": "Punjabi" }),
    ];
    let store = InMemoryStore::new().with_rows(CATERERS_TABLE, caterers.clone());
    let app = app(Arc::new(store), None);

    let (status, body) = send(
        &app,
        Method::GET,
        "/api/agent/caterers?cuisine_type=Punjabi&budget_per_plate=1500",
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!(caterers));
}

#[tokio::test]
async fn caterer_filters_in_any_shape_still_list_everything() {
    let caterers = vec![json!({ "id": 1, "name": "Sadhya House", "cuisine": "Kerala" })];
    let store = InMemoryStore::new().with_rows(CATERERS_TABLE, caterers.clone());
    let app = app(Arc::new(store), None);

    for query in [
        "budget_per_plate=1500.50",
        "budget_per_plate=-1",
        "budget_per_plate=",
        "cuisine_type=Kerala&cuisine_type=Goan",
    ] {
        let (status, body) = send(
            &app,
            Method::GET,
            &format!("/api/agent/caterers?{}", query),
            None,
        )
        .await;

        assert_eq!(status, StatusCode::OK, "query {}", query);
        assert_eq!(body, json!(caterers), "query {}", query);
    }
}

#[tokio::test]
async fn listing_storage_failure_is_server_error() {
    let app = app_with(Arc::new(FailingStore), None);

    let (status, body) = send(&app, Method::GET, "/api/agent/venues", None).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Failed to fetch venues");
    assert!(body["details"]
        .as_str()
        .unwrap()
        .contains("connection refused"));
}
