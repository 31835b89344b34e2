pub mod metrics;
pub mod planner;
pub mod prompt;
pub mod providers;
pub mod storage;

pub use metrics::init_metrics;
pub use planner::{EventPlanner, PlanError};
pub use storage::{InMemoryStore, PostgrestStore, StorageError, TableStore};
