//! Save and delete actions of the note editor.

use tracing::{info, warn};
use uuid::Uuid;

use think_core::{Error, RecordStore, RecordToBeSaved, Result};
use think_render::EditorSession;

/// Save the session's document as note `id`.
///
/// An empty document is never sent. Returns whether the server accepted
/// the save.
pub async fn save_note(store: &dyn RecordStore, id: Uuid, session: &EditorSession) -> Result<bool> {
    if session.is_empty() {
        return Err(Error::InvalidInput("Note is empty".to_string()));
    }

    let body = session.to_json()?;
    let saved = store.save_record(&RecordToBeSaved::note(id, body)).await?;
    if saved {
        info!(record_id = %id, "Note saved");
    } else {
        warn!(record_id = %id, "Server did not accept note");
    }
    Ok(saved)
}

/// Delete note `id`. Returns whether the server confirmed it.
pub async fn delete_note(store: &dyn RecordStore, id: &str) -> Result<bool> {
    let deleted = store.delete_record(id).await?;
    info!(record_id = id, success = deleted, "Delete requested");
    Ok(deleted)
}
