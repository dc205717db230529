//! Core data models for think.
//!
//! A record is an opaque, typed document addressed by a UUID v4. The
//! `mime_type` discriminator is an open string on the wire; consumers
//! classify a record into the closed [`RecordKind`] and match on it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use uuid::Uuid;

use crate::defaults::NOTE_MIME_TYPE;

// =============================================================================
// RECORD TYPES
// =============================================================================

/// A persisted record as returned by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: Uuid,
    pub mime_type: String,
    pub body: JsonValue,
    /// Server-assigned on every write.
    pub updated_at: DateTime<Utc>,
}

/// Create/update payload. The server assigns the timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordToBeSaved {
    pub id: Uuid,
    pub mime_type: String,
    pub body: JsonValue,
}

impl RecordToBeSaved {
    /// Payload saving `body` as a note under `id`.
    pub fn note(id: Uuid, body: JsonValue) -> Self {
        Self {
            id,
            mime_type: NOTE_MIME_TYPE.to_string(),
            body,
        }
    }
}

// =============================================================================
// NOTE TYPES
// =============================================================================

/// A record whose body is a serialized rich-document tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub id: Uuid,
    pub body: JsonValue,
    pub updated_at: DateTime<Utc>,
}

impl Note {
    /// Serialized editor state of the body, unwrapping the export envelope.
    pub fn editor_state(&self) -> &JsonValue {
        editor_state_of(&self.body)
    }

    /// Payload that writes this note back unchanged.
    pub fn to_be_saved(&self) -> RecordToBeSaved {
        RecordToBeSaved::note(self.id, self.body.clone())
    }

    /// Back to the generic record shape.
    pub fn into_record(self) -> Record {
        Record {
            id: self.id,
            mime_type: NOTE_MIME_TYPE.to_string(),
            body: self.body,
            updated_at: self.updated_at,
        }
    }
}

/// Closed classification of a record by mime type.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordKind {
    Note(Note),
    /// Any mime type without a dedicated viewer.
    Other(Record),
}

impl RecordKind {
    pub fn id(&self) -> Uuid {
        match self {
            RecordKind::Note(note) => note.id,
            RecordKind::Other(record) => record.id,
        }
    }
}

impl Record {
    /// Whether this record is a note.
    pub fn is_note(&self) -> bool {
        is_note(self)
    }

    /// Classify into a closed variant for exhaustive matching.
    pub fn classify(self) -> RecordKind {
        if self.is_note() {
            RecordKind::Note(Note {
                id: self.id,
                body: self.body,
                updated_at: self.updated_at,
            })
        } else {
            RecordKind::Other(self)
        }
    }
}

/// Pure discriminator on `mime_type`.
pub fn is_note(record: &Record) -> bool {
    record.mime_type == NOTE_MIME_TYPE
}

/// Unwrap `{"editorState": {...}, "lastSaved": .., ...}` to the editor state.
///
/// Bodies exported from the editor playground carry this envelope; bodies
/// saved by the app are the bare state. Anything else is returned as is.
pub fn editor_state_of(body: &JsonValue) -> &JsonValue {
    match body.get("editorState") {
        Some(state) if state.is_object() => state,
        _ => body,
    }
}
