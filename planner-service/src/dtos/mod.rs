pub mod agent;
pub mod events;

pub use agent::{CatererParams, PlanRequest};
pub use events::{CreateEventRequest, DeleteEventResponse, UpdateEventRequest};
