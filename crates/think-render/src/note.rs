//! Note adapter: rendering a note record's body to HTML.

use think_core::defaults::{IMAGE_MARGIN, NOTE_NAMESPACE_PREFIX};
use think_core::{editor_state_of, Note};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::engine::{EngineConfig, HeadlessEngine};
use crate::transform::ImageWidthClamp;

/// Engine namespace for a note.
pub fn note_namespace(id: Uuid) -> String {
    format!("{}{}", NOTE_NAMESPACE_PREFIX, id)
}

/// Maximum image width inside a container `width` pixels wide, or `None`
/// when the container is too narrow to clamp to anything.
pub fn image_width_limit(width: u32) -> Option<u32> {
    match width.saturating_sub(IMAGE_MARGIN) {
        0 => None,
        limit => Some(limit),
    }
}

/// Render a note to HTML for a container `width` pixels wide.
///
/// Images are clamped to `width - 20` with height scaled to match. The
/// engine is released before returning.
pub fn generate_html_from_note(note: &Note, width: u32) -> think_core::Result<String> {
    let mut engine = HeadlessEngine::new(EngineConfig::headless(note_namespace(note.id)));
    let state = engine.parse_editor_state(editor_state_of(&note.body))?;
    engine.set_editor_state(state);

    if let Some(limit) = image_width_limit(width) {
        engine.register_node_transform(Box::new(ImageWidthClamp::new(limit)))?;
    }

    let html = engine.render_html()?;
    debug!(record_id = %note.id, width, html_len = html.len(), "Generated note HTML");
    Ok(html)
}

/// Outcome of rendering a note for display in a list.
#[derive(Debug, Clone, PartialEq)]
pub enum Preview {
    Html(String),
    /// The body could not be rendered; show it raw instead.
    Fallback { error: String, raw_json: String },
}

/// Like [`generate_html_from_note`] but never fails.
pub fn render_note_preview(note: &Note, width: u32) -> Preview {
    match generate_html_from_note(note, width) {
        Ok(html) => Preview::Html(html),
        Err(e) => {
            warn!(record_id = %note.id, error = %e, "Note preview failed, showing raw body");
            Preview::Fallback {
                error: e.to_string(),
                raw_json: serde_json::to_string_pretty(&note.body)
                    .unwrap_or_else(|_| note.body.to_string()),
            }
        }
    }
}
