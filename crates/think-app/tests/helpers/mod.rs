//! In-memory record store shared by the page tests.

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::{json, Value};
use think_core::{is_uuid, Error, Record, RecordStore, RecordToBeSaved, Result};
use uuid::Uuid;

/// Record store kept in a map. Saves answer `true` like a 201 would.
#[derive(Default)]
pub struct MemoryStore {
    records: Mutex<BTreeMap<Uuid, Record>>,
    /// When set, every call fails with this status.
    fail_with: Option<u16>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(status: u16) -> Self {
        Self {
            fail_with: Some(status),
            ..Self::default()
        }
    }

    pub fn insert(&self, id: Uuid, mime_type: &str, body: Value) {
        self.records.lock().unwrap().insert(
            id,
            Record {
                id,
                mime_type: mime_type.to_string(),
                body,
                updated_at: Utc::now(),
            },
        );
    }

    pub fn get(&self, id: Uuid) -> Option<Record> {
        self.records.lock().unwrap().get(&id).cloned()
    }

    pub fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }

    fn check(&self) -> Result<()> {
        match self.fail_with {
            Some(status) => Err(Error::Status {
                status,
                body: "unavailable".to_string(),
            }),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn list_records(&self) -> Result<Vec<Record>> {
        self.check()?;
        Ok(self.records.lock().unwrap().values().cloned().collect())
    }

    async fn get_record(&self, id: &str) -> Result<Record> {
        if !is_uuid(id) {
            return Err(Error::RecordNotFound(id.to_string()));
        }
        self.check()?;
        let uuid = Uuid::parse_str(id).unwrap();
        self.get(uuid)
            .ok_or_else(|| Error::RecordNotFound(id.to_string()))
    }

    async fn save_record(&self, record: &RecordToBeSaved) -> Result<bool> {
        self.check()?;
        self.insert(record.id, &record.mime_type, record.body.clone());
        Ok(true)
    }

    async fn delete_record(&self, id: &str) -> Result<bool> {
        if !is_uuid(id) {
            return Err(Error::RecordNotFound(id.to_string()));
        }
        self.check()?;
        let uuid = Uuid::parse_str(id).unwrap();
        Ok(self.records.lock().unwrap().remove(&uuid).is_some())
    }
}

/// Note body with one paragraph per entry.
pub fn note_body(paragraphs: &[&str]) -> Value {
    let children: Vec<Value> = paragraphs
        .iter()
        .map(|text| {
            json!({
                "type": "paragraph", "direction": "ltr", "format": "", "indent": 0, "version": 1,
                "children": [{"type": "text", "text": text, "format": 0, "detail": 0,
                              "mode": "normal", "style": "", "version": 1}]
            })
        })
        .collect();
    json!({"root": {"type": "root", "direction": "ltr", "format": "", "indent": 0,
                    "version": 1, "children": children}})
}

/// Note body holding one image of the given size.
pub fn image_body(width: u32, height: u32) -> Value {
    json!({"root": {"type": "root", "children": [
        {"type": "image", "src": "/api/file/x/a.png", "altText": "a",
         "width": width, "height": height, "version": 1}
    ]}})
}
