//! Structured plan produced by the generative model.
//!
//! Plans are never persisted; one is decoded per request from the model's
//! JSON output and returned to the caller as-is.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// A complete wedding plan in the shape the prompt demands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct GeneratedPlan {
    #[validate(length(min = 1, message = "event_name must not be empty"))]
    pub event_name: String,

    pub event_type: String,

    /// Date or suggested season; the model may not commit to a day.
    pub event_date: String,

    pub number_of_guests: u32,

    /// Total budget in INR.
    #[validate(range(min = 0.0, message = "budget must not be negative"))]
    pub budget: f64,

    pub required_components: Vec<RequiredComponent>,

    pub action_items: Vec<String>,
}

/// One vendor or service the plan calls for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequiredComponent {
    pub component_type: String,
    pub details: String,
    pub preferences: String,
}
