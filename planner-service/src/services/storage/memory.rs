//! In-process table store for tests and local runs.

use super::{Record, StorageError, TableStore};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;

#[derive(Default)]
struct Tables {
    rows: HashMap<String, Vec<Record>>,
    next_id: i64,
}

/// Table store held entirely in memory. Ids are assigned from a single
/// sequence shared by all tables.
#[derive(Default)]
pub struct InMemoryStore {
    tables: Mutex<Tables>,
}

fn row_id(row: &Record) -> Option<i64> {
    row.get("id").and_then(Value::as_i64)
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed `table` with `rows` as they would come from the provider.
    pub fn with_rows(self, table: &str, rows: Vec<Record>) -> Self {
        {
            let mut tables = self.lock();
            for row in &rows {
                if let Some(id) = row_id(row) {
                    tables.next_id = tables.next_id.max(id);
                }
            }
            tables.rows.entry(table.to_string()).or_default().extend(rows);
        }
        self
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Tables> {
        // A panic while holding the lock cannot leave rows half-written
        self.tables.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl TableStore for InMemoryStore {
    async fn select(&self, table: &str) -> Result<Vec<Record>, StorageError> {
        Ok(self.lock().rows.get(table).cloned().unwrap_or_default())
    }

    async fn find(&self, table: &str, id: i64) -> Result<Option<Record>, StorageError> {
        Ok(self
            .lock()
            .rows
            .get(table)
            .and_then(|rows| rows.iter().find(|row| row_id(row) == Some(id)).cloned()))
    }

    async fn insert(&self, table: &str, record: Record) -> Result<Record, StorageError> {
        let Value::Object(mut fields) = record else {
            return Err(StorageError::InvalidRecord(
                "insert expects a JSON object".to_string(),
            ));
        };

        let mut tables = self.lock();
        tables.next_id += 1;
        let id = tables.next_id;
        fields.insert("id".to_string(), Value::from(id));

        let row = Value::Object(fields);
        tables
            .rows
            .entry(table.to_string())
            .or_default()
            .push(row.clone());
        Ok(row)
    }

    async fn update(
        &self,
        table: &str,
        id: i64,
        partial: Record,
    ) -> Result<Option<Record>, StorageError> {
        let Value::Object(changes) = partial else {
            return Err(StorageError::InvalidRecord(
                "update expects a JSON object".to_string(),
            ));
        };

        let mut tables = self.lock();
        let Some(row) = tables
            .rows
            .get_mut(table)
            .and_then(|rows| rows.iter_mut().find(|row| row_id(row) == Some(id)))
        else {
            return Ok(None);
        };

        if let Value::Object(fields) = row {
            for (key, value) in changes {
                if key != "id" {
                    fields.insert(key, value);
                }
            }
        }
        Ok(Some(row.clone()))
    }

    async fn delete(&self, table: &str, id: i64) -> Result<bool, StorageError> {
        let mut tables = self.lock();
        let Some(rows) = tables.rows.get_mut(table) else {
            return Ok(false);
        };

        let before = rows.len();
        rows.retain(|row| row_id(row) != Some(id));
        Ok(rows.len() != before)
    }

    async fn health_check(&self) -> Result<(), StorageError> {
        Ok(())
    }
}
