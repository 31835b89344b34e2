use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct PlanRequest {
    #[validate(length(min = 1, message = "query must not be empty"))]
    pub query: String,

    /// Details the caller already knows; accepted but not fed to the prompt.
    #[serde(default)]
    pub existing_details: Option<serde_json::Value>,
}

/// Caterer recommendation filters. Accepted on `/caterers` but not applied
/// to the storage query, so values are kept as raw strings.
#[derive(Debug, Default, Deserialize)]
pub struct CatererParams {
    pub cuisine_type: Option<String>,
    pub budget_per_plate: Option<String>,
}
