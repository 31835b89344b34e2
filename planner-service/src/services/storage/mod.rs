//! Table storage abstraction.
//!
//! The planner keeps no data of its own: events and provider listings live
//! in a hosted table store and every operation is passed straight through.
//! `PostgrestStore` talks to a Supabase/PostgREST endpoint; `InMemoryStore`
//! backs tests and local runs.

pub mod memory;
pub mod postgrest;

pub use memory::InMemoryStore;
pub use postgrest::PostgrestStore;

use async_trait::async_trait;
use service_core::error::AppError;
use thiserror::Error;

/// An opaque table row.
pub type Record = serde_json::Value;

/// Provider listing tables exposed by the agent routes.
pub const VENUES_TABLE: &str = "venues";
pub const CATERERS_TABLE: &str = "caterers";
pub const DECORATORS_TABLE: &str = "decorators";
pub const SERVICE_PROVIDERS_TABLE: &str = "event_services_providers";

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Storage not configured: {0}")]
    NotConfigured(String),

    #[error("Network error: {0}")]
    Transport(String),

    #[error("Storage API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Failed to decode storage response: {0}")]
    Decode(String),

    #[error("Storage returned no rows for {0}")]
    EmptyResponse(String),

    #[error("Invalid record: {0}")]
    InvalidRecord(String),
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        AppError::DatabaseError(anyhow::Error::new(err))
    }
}

/// Generic per-table CRUD over a hosted store.
///
/// Reads are unfiltered apart from the id lookup; mutations are keyed by
/// the integer `id` column.
#[async_trait]
pub trait TableStore: Send + Sync {
    /// Every row of `table`.
    async fn select(&self, table: &str) -> Result<Vec<Record>, StorageError>;

    /// The row whose `id` equals `id`, if any.
    async fn find(&self, table: &str, id: i64) -> Result<Option<Record>, StorageError>;

    /// Insert `record` and return the stored row, including its new id.
    async fn insert(&self, table: &str, record: Record) -> Result<Record, StorageError>;

    /// Overwrite the keys present in `partial`. `None` when no row matched.
    async fn update(
        &self,
        table: &str,
        id: i64,
        partial: Record,
    ) -> Result<Option<Record>, StorageError>;

    /// Remove the row. `false` when no row matched.
    async fn delete(&self, table: &str, id: i64) -> Result<bool, StorageError>;

    /// Health check.
    async fn health_check(&self) -> Result<(), StorageError>;
}
