//! HTTP handlers for the planner service.

pub mod agent;
pub mod events;
pub mod health;
pub mod metrics;

pub use agent::{get_caterers, get_decorators, get_service_providers, get_venues, plan_event};
pub use events::{create_event, delete_event, get_event, update_event};
pub use health::{health_check, readiness_check, root};
