//! PostgREST (Supabase) table store client.
//!
//! Every call maps onto one REST request against `{base}/rest/v1/{table}`.
//! Mutations ask for `return=representation` so the affected rows come back
//! in the response body; an empty array means nothing matched.

use super::{Record, StorageError, TableStore};
use crate::services::metrics;
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use secrecy::{ExposeSecret, Secret};
use std::time::Instant;

const REST_PATH: &str = "rest/v1";

pub struct PostgrestStore {
    base_url: String,
    api_key: Secret<String>,
    client: Client,
}

impl PostgrestStore {
    pub fn new(base_url: &str, api_key: Secret<String>) -> Result<Self, StorageError> {
        let base_url = base_url.trim_end_matches('/').to_string();

        reqwest::Url::parse(&base_url)
            .map_err(|e| StorageError::NotConfigured(format!("invalid storage URL: {}", e)))?;

        if api_key.expose_secret().is_empty() {
            return Err(StorageError::NotConfigured(
                "storage API key is empty".to_string(),
            ));
        }

        let client = Client::builder()
            .build()
            .map_err(|e| StorageError::Transport(e.to_string()))?;

        tracing::info!(url = %base_url, "Initialized storage client");

        Ok(Self {
            base_url,
            api_key,
            client,
        })
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/{}/{}", self.base_url, REST_PATH, table)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        let key = self.api_key.expose_secret();
        request.header("apikey", key).bearer_auth(key)
    }

    fn id_filter(id: i64) -> [(&'static str, String); 1] {
        [("id", format!("eq.{}", id))]
    }

    async fn send(
        &self,
        operation: &'static str,
        table: &str,
        request: RequestBuilder,
    ) -> Result<Vec<Record>, StorageError> {
        let start = Instant::now();
        let result = self.send_inner(request).await;
        metrics::record_storage_operation(
            operation,
            table,
            start.elapsed().as_secs_f64(),
            result.is_ok(),
        );

        if let Err(e) = &result {
            tracing::error!(operation, table, error = %e, "Storage request failed");
        }
        result
    }

    async fn send_inner(&self, request: RequestBuilder) -> Result<Vec<Record>, StorageError> {
        let response = self
            .authorized(request)
            .send()
            .await
            .map_err(|e| StorageError::Transport(e.to_string()))?;

        let response = check_status(response).await?;

        let text = response
            .text()
            .await
            .map_err(|e| StorageError::Transport(e.to_string()))?;

        // DELETE/PATCH may legitimately answer with an empty body
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }

        serde_json::from_str(&text).map_err(|e| StorageError::Decode(e.to_string()))
    }
}

async fn check_status(response: Response) -> Result<Response, StorageError> {
    if response.status().is_success() {
        return Ok(response);
    }

    let status = response.status().as_u16();
    let message = response.text().await.unwrap_or_default();
    Err(StorageError::Api { status, message })
}

#[async_trait]
impl TableStore for PostgrestStore {
    async fn select(&self, table: &str) -> Result<Vec<Record>, StorageError> {
        tracing::debug!(table, "Selecting all rows");
        let request = self
            .client
            .get(self.table_url(table))
            .query(&[("select", "*")]);
        self.send("select", table, request).await
    }

    async fn find(&self, table: &str, id: i64) -> Result<Option<Record>, StorageError> {
        let request = self
            .client
            .get(self.table_url(table))
            .query(&[("select", "*")])
            .query(&Self::id_filter(id));
        let rows = self.send("find", table, request).await?;
        Ok(rows.into_iter().next())
    }

    async fn insert(&self, table: &str, record: Record) -> Result<Record, StorageError> {
        if !record.is_object() {
            return Err(StorageError::InvalidRecord(
                "insert expects a JSON object".to_string(),
            ));
        }

        let request = self
            .client
            .post(self.table_url(table))
            .header("Prefer", "return=representation")
            .json(&record);
        let rows = self.send("insert", table, request).await?;

        rows.into_iter()
            .next()
            .ok_or_else(|| StorageError::EmptyResponse(format!("insert into {}", table)))
    }

    async fn update(
        &self,
        table: &str,
        id: i64,
        partial: Record,
    ) -> Result<Option<Record>, StorageError> {
        if !partial.is_object() {
            return Err(StorageError::InvalidRecord(
                "update expects a JSON object".to_string(),
            ));
        }

        let request = self
            .client
            .patch(self.table_url(table))
            .query(&Self::id_filter(id))
            .header("Prefer", "return=representation")
            .json(&partial);
        let rows = self.send("update", table, request).await?;
        Ok(rows.into_iter().next())
    }

    async fn delete(&self, table: &str, id: i64) -> Result<bool, StorageError> {
        let request = self
            .client
            .delete(self.table_url(table))
            .query(&Self::id_filter(id))
            .header("Prefer", "return=representation");
        let rows = self.send("delete", table, request).await?;
        Ok(!rows.is_empty())
    }

    async fn health_check(&self) -> Result<(), StorageError> {
        let url = format!("{}/{}/", self.base_url, REST_PATH);
        let response = self
            .authorized(self.client.get(url))
            .send()
            .await
            .map_err(|e| StorageError::Transport(e.to_string()))?;

        check_status(response).await.map(|_| ())
    }
}
