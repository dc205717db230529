//! Core traits for think abstractions.
//!
//! Pages talk to the record store through [`RecordStore`] so the REST
//! client can be swapped for an in-memory store in tests.

use async_trait::async_trait;
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::{Record, RecordToBeSaved};

/// Access to the remote record store.
///
/// Ids are taken as strings: validation is part of the contract, and a
/// malformed id must fail with [`Error::RecordNotFound`] without reaching
/// the network.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Fetch every record.
    async fn list_records(&self) -> Result<Vec<Record>>;

    /// Fetch one record by id.
    async fn get_record(&self, id: &str) -> Result<Record>;

    /// Create or overwrite a record. Returns whether the server accepted it.
    async fn save_record(&self, record: &RecordToBeSaved) -> Result<bool>;

    /// Delete a record. Returns whether the server confirmed the deletion.
    async fn delete_record(&self, id: &str) -> Result<bool>;

    /// Whether a record exists.
    ///
    /// Only the not-found kind maps to `false`; transport and server errors
    /// are propagated because a failed request says nothing about existence.
    async fn is_exist_record(&self, id: &str) -> Result<bool> {
        match self.get_record(id).await {
            Ok(_) => Ok(true),
            Err(Error::RecordNotFound(_)) => {
                debug!(record_id = id, "Record does not exist");
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    /// Store whose `get_record` answer is fixed per test.
    struct FixedStore {
        answer: fn(&str) -> Result<Record>,
    }

    #[async_trait]
    impl RecordStore for FixedStore {
        async fn list_records(&self) -> Result<Vec<Record>> {
            Ok(vec![])
        }

        async fn get_record(&self, id: &str) -> Result<Record> {
            (self.answer)(id)
        }

        async fn save_record(&self, _record: &RecordToBeSaved) -> Result<bool> {
            Ok(true)
        }

        async fn delete_record(&self, _id: &str) -> Result<bool> {
            Ok(true)
        }
    }

    #[tokio::test]
    async fn test_is_exist_record_true_when_found() {
        let store = FixedStore {
            answer: |_| {
                Ok(Record {
                    id: Uuid::new_v4(),
                    mime_type: "note".to_string(),
                    body: serde_json::json!({}),
                    updated_at: Utc::now(),
                })
            },
        };
        assert!(store.is_exist_record("any").await.unwrap());
    }

    #[tokio::test]
    async fn test_is_exist_record_false_when_not_found() {
        let store = FixedStore {
            answer: |id| Err(Error::RecordNotFound(id.to_string())),
        };
        assert!(!store.is_exist_record("any").await.unwrap());
    }

    #[tokio::test]
    async fn test_is_exist_record_propagates_request_errors() {
        let store = FixedStore {
            answer: |_| Err(Error::Request("connection refused".to_string())),
        };
        let err = store.is_exist_record("any").await.unwrap_err();
        assert!(matches!(err, Error::Request(_)));
    }

    #[tokio::test]
    async fn test_is_exist_record_propagates_server_errors() {
        let store = FixedStore {
            answer: |_| {
                Err(Error::Status {
                    status: 500,
                    body: String::new(),
                })
            },
        };
        let err = store.is_exist_record("any").await.unwrap_err();
        assert_eq!(err.status(), Some(500));
    }
}
