//! Shared HTTP plumbing for the record and file clients.

use reqwest::{Client, Response};
use std::time::Duration;

use think_core::{Error, Result};

use crate::config::ClientConfig;

/// Build the underlying HTTP client from config.
pub(crate) fn build_client(config: &ClientConfig) -> Result<Client> {
    Client::builder()
        .timeout(Duration::from_secs(config.timeout_seconds))
        .build()
        .map_err(|e| Error::Request(format!("Failed to create HTTP client: {}", e)))
}

/// Join a base URL and a path without doubling the slash.
pub(crate) fn join(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), path)
}

/// Turn a non-success response into [`Error::Status`], keeping the body.
pub(crate) async fn status_error(response: Response) -> Error {
    let status = response.status().as_u16();
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());
    Error::Status { status, body }
}
