//! REST client for `/api/records`.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Instant;
use tracing::{debug, info, warn};

use think_core::defaults::RECORDS_PATH;
use think_core::{is_uuid, Error, Record, RecordStore, RecordToBeSaved, Result};

use crate::config::ClientConfig;
use crate::http::{build_client, join, status_error};

/// Record store backed by the think server.
///
/// Ids are checked locally before any request is made; a malformed id
/// fails with [`Error::RecordNotFound`] and never reaches the network.
pub struct RecordClient {
    client: Client,
    config: ClientConfig,
}

impl RecordClient {
    /// Create a client with the given configuration.
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;
        let client = build_client(&config)?;

        info!(
            "Initializing record client: url={}, timeout={}s",
            config.base_url, config.timeout_seconds
        );

        Ok(Self { client, config })
    }

    /// Create from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::new(ClientConfig::from_env())
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn collection_url(&self) -> String {
        join(&self.config.base_url, RECORDS_PATH)
    }

    fn record_url(&self, id: &str) -> String {
        format!("{}/{}", self.collection_url(), id)
    }
}

fn ensure_uuid(id: &str) -> Result<()> {
    if is_uuid(id) {
        Ok(())
    } else {
        debug!(record_id = id, "Rejected malformed record id");
        Err(Error::RecordNotFound(id.to_string()))
    }
}

#[async_trait]
impl RecordStore for RecordClient {
    async fn list_records(&self) -> Result<Vec<Record>> {
        let start = Instant::now();
        let response = self.client.get(self.collection_url()).send().await?;

        if !response.status().is_success() {
            let err = status_error(response).await;
            warn!(op = "list_records", error = %err, "List failed");
            return Err(err);
        }

        let records: Vec<Record> = response.json().await?;
        debug!(
            op = "list_records",
            result_count = records.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Listed records"
        );
        Ok(records)
    }

    async fn get_record(&self, id: &str) -> Result<Record> {
        ensure_uuid(id)?;

        let response = self.client.get(self.record_url(id)).send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            debug!(op = "get_record", record_id = id, "Record not found");
            return Err(Error::RecordNotFound(id.to_string()));
        }
        if !status.is_success() {
            let err = status_error(response).await;
            warn!(op = "get_record", record_id = id, error = %err, "Fetch failed");
            return Err(err);
        }

        let record: Record = response.json().await?;
        debug!(op = "get_record", record_id = id, mime_type = %record.mime_type, "Fetched record");
        Ok(record)
    }

    async fn save_record(&self, record: &RecordToBeSaved) -> Result<bool> {
        let id = record.id.to_string();
        let response = self
            .client
            .post(self.record_url(&id))
            .json(record)
            .send()
            .await?;

        let status = response.status().as_u16();
        let success = self.config.save_success_statuses.contains(&status);
        info!(
            op = "save_record",
            record_id = %id,
            mime_type = %record.mime_type,
            status,
            success,
            "Saved record"
        );
        Ok(success)
    }

    async fn delete_record(&self, id: &str) -> Result<bool> {
        ensure_uuid(id)?;

        let response = self.client.delete(self.record_url(id)).send().await?;

        let status = response.status().as_u16();
        let success = self.config.delete_success_statuses.contains(&status);
        info!(op = "delete_record", record_id = id, status, success, "Deleted record");
        Ok(success)
    }
}
