//! REST client for `/api/file`: blobs attached to a record.

use chrono::{DateTime, Utc};
use reqwest::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use think_core::defaults::{DELETE_SUCCESS_STATUS, FILES_PATH, UPLOAD_SUCCESS_STATUS};
use think_core::{Error, Result};

use crate::config::ClientConfig;
use crate::http::{build_client, join, status_error};

const DEFAULT_MIME_TYPE: &str = "application/octet-stream";

/// File contents as served by the view and download endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileBlob {
    pub bytes: Vec<u8>,
    pub mime_type: String,
    /// Name from `Content-Disposition`; only set by downloads.
    pub filename: Option<String>,
}

/// File metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileMeta {
    pub id: Uuid,
    pub mime_type: String,
    pub size: u64,
    pub created_at: DateTime<Utc>,
}

pub struct FileClient {
    client: Client,
    base_url: String,
}

impl FileClient {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        config.validate()?;
        let client = build_client(config)?;
        info!("Initializing file client: url={}", config.base_url);
        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    /// URL a document embeds to show the file inline.
    pub fn view_url(&self, id: Uuid, filename: &str) -> String {
        join(&self.base_url, &file_path(id, None, filename))
    }

    fn url(&self, id: Uuid, section: Option<&str>, filename: &str) -> String {
        join(&self.base_url, &file_path(id, section, filename))
    }

    /// Upload `bytes` as `filename` under record `id`.
    pub async fn upload(&self, id: Uuid, filename: &str, bytes: Vec<u8>) -> Result<bool> {
        let size = bytes.len();
        let response = self
            .client
            .post(self.url(id, None, filename))
            .body(bytes)
            .send()
            .await?;
        let status = response.status().as_u16();
        let success = status == UPLOAD_SUCCESS_STATUS;
        info!(op = "upload_file", record_id = %id, filename, size, status, success, "Uploaded file");
        Ok(success)
    }

    /// Fetch a file for inline viewing.
    pub async fn read(&self, id: Uuid, filename: &str) -> Result<FileBlob> {
        let response = self.client.get(self.url(id, None, filename)).send().await?;
        let response = check(response, id).await?;
        blob(response, false).await
    }

    pub async fn meta(&self, id: Uuid, filename: &str) -> Result<FileMeta> {
        let response = self
            .client
            .get(self.url(id, Some("meta"), filename))
            .send()
            .await?;
        let response = check(response, id).await?;
        let meta: FileMeta = response.json().await?;
        debug!(op = "file_meta", record_id = %id, filename, size = meta.size, "Fetched file meta");
        Ok(meta)
    }

    /// Fetch a file as an attachment, including its download name.
    pub async fn download(&self, id: Uuid, filename: &str) -> Result<FileBlob> {
        let response = self
            .client
            .get(self.url(id, Some("download"), filename))
            .send()
            .await?;
        let response = check(response, id).await?;
        blob(response, true).await
    }

    pub async fn delete(&self, id: Uuid, filename: &str) -> Result<bool> {
        let response = self.client.delete(self.url(id, None, filename)).send().await?;
        let status = response.status().as_u16();
        let success = status == DELETE_SUCCESS_STATUS;
        info!(op = "delete_file", record_id = %id, filename, status, success, "Deleted file");
        Ok(success)
    }
}

fn file_path(id: Uuid, section: Option<&str>, filename: &str) -> String {
    let filename = urlencoding::encode(filename);
    match section {
        Some(section) => format!("{}/{}/{}/{}", FILES_PATH, id, section, filename),
        None => format!("{}/{}/{}", FILES_PATH, id, filename),
    }
}

async fn check(response: Response, id: Uuid) -> Result<Response> {
    match response.status() {
        StatusCode::NOT_FOUND => Err(Error::RecordNotFound(id.to_string())),
        s if s.is_success() => Ok(response),
        _ => Err(status_error(response).await),
    }
}

async fn blob(response: Response, attachment: bool) -> Result<FileBlob> {
    let mime_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or(DEFAULT_MIME_TYPE)
        .to_string();
    let filename = if attachment {
        response
            .headers()
            .get(CONTENT_DISPOSITION)
            .and_then(|v| v.to_str().ok())
            .and_then(attachment_filename)
    } else {
        None
    };
    let bytes = response.bytes().await?.to_vec();
    Ok(FileBlob {
        bytes,
        mime_type,
        filename,
    })
}

/// Extract `filename` from a `Content-Disposition` header value.
fn attachment_filename(header: &str) -> Option<String> {
    header.split(';').map(str::trim).find_map(|part| {
        let value = part.strip_prefix("filename=")?;
        Some(value.trim_matches('"').to_string())
    })
}
