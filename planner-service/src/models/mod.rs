//! Domain models for the planner service.

pub mod event;
pub mod plan;

pub use event::{Event, EVENTS_TABLE};
pub use plan::{GeneratedPlan, RequiredComponent};
