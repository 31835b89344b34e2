use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateEventRequest {
    #[validate(length(min = 1, message = "event_name must not be empty"))]
    pub event_name: String,

    #[validate(length(min = 1, message = "event_type must not be empty"))]
    pub event_type: String,

    pub event_date: NaiveDate,

    pub number_of_guests: u32,

    #[validate(range(min = 0.0, message = "budget must not be negative"))]
    pub budget: f64,
}

/// Partial update; only fields present in the body are written.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateEventRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "event_name must not be empty"))]
    pub event_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "event_type must not be empty"))]
    pub event_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_date: Option<NaiveDate>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number_of_guests: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.0, message = "budget must not be negative"))]
    pub budget: Option<f64>,
}

impl UpdateEventRequest {
    pub fn is_empty(&self) -> bool {
        self.event_name.is_none()
            && self.event_type.is_none()
            && self.event_date.is_none()
            && self.number_of_guests.is_none()
            && self.budget.is_none()
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteEventResponse {
    pub message: String,
}
