//! Page models: data fetching and per-page HTML.

use std::time::Instant;

use tracing::{debug, warn};
use uuid::Uuid;

use think_core::defaults::EMBED_PREVIEW_WIDTH;
use think_core::{generate_uuid, parse_v4, Error, Record, RecordKind, RecordStore};
use think_render::{html_escape, note_namespace, render_note_preview, EditorSession, Preview};

use crate::layout::Masonry;
use crate::view::ViewState;

// =============================================================================
// RECORDS PAGE
// =============================================================================

/// What a card shows below its actions.
#[derive(Debug, Clone, PartialEq)]
pub enum CardContent {
    Note(Preview),
    /// Non-note records are shown as pretty-printed JSON.
    Raw(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecordCard {
    pub id: Uuid,
    pub mime_type: String,
    pub content: CardContent,
}

impl RecordCard {
    fn from_record(record: Record, width: u32) -> Self {
        let mime_type = record.mime_type.clone();
        match record.classify() {
            RecordKind::Note(note) => RecordCard {
                id: note.id,
                mime_type,
                content: CardContent::Note(render_note_preview(&note, width)),
            },
            RecordKind::Other(record) => RecordCard {
                id: record.id,
                mime_type,
                content: CardContent::Raw(pretty_json(&record)),
            },
        }
    }

    /// Rough rendered height used for column placement.
    fn height_estimate(&self) -> u64 {
        let len = match &self.content {
            CardContent::Note(Preview::Html(html)) => html.len(),
            CardContent::Note(Preview::Fallback { raw_json, .. }) => raw_json.len(),
            CardContent::Raw(raw) => raw.len(),
        };
        1 + len as u64 / 40
    }

    pub fn to_html(&self, width: u32) -> String {
        let content = match &self.content {
            CardContent::Note(Preview::Html(html)) => {
                format!(r#"<div class="viewer" style="width: {}px;">{}</div>"#, width, html)
            }
            CardContent::Note(Preview::Fallback { error, raw_json }) => format!(
                r#"<p class="render-error">{}</p><pre>{}</pre>"#,
                html_escape(error),
                html_escape(raw_json)
            ),
            CardContent::Raw(raw) => format!("<pre>{}</pre>", html_escape(raw)),
        };
        format!(
            r#"<div class="card" data-record-id="{id}"><button data-action="delete" data-record-id="{id}">Delete</button><a href="/n/{id}">Go To</a>{content}</div>"#,
            id = self.id,
            content = content
        )
    }
}

/// Cards laid out in masonry columns.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordsView {
    pub columns: Vec<Vec<RecordCard>>,
    pub column_width: u32,
    pub content_width: u32,
}

impl RecordsView {
    pub fn card_count(&self) -> usize {
        self.columns.iter().map(Vec::len).sum()
    }

    pub fn to_html(&self) -> String {
        let mut out = String::from(r#"<div class="masonry">"#);
        for column in &self.columns {
            out.push_str(&format!(
                r#"<div class="masonry-column" style="width: {}px;">"#,
                self.column_width
            ));
            for card in column {
                out.push_str(&card.to_html(self.content_width));
            }
            out.push_str("</div>");
        }
        out.push_str("</div>");
        out
    }
}

/// Every record as a card. Note previews get the column width minus the
/// card chrome; a preview that fails to render only affects its own card.
pub async fn records_page(
    store: &dyn RecordStore,
    masonry: Masonry,
    width: u32,
) -> ViewState<RecordsView> {
    let start = Instant::now();
    let records = match store.list_records().await {
        Ok(records) => records,
        Err(e) => {
            warn!(route = "/r", error = %e, "Failed to list records");
            return ViewState::Error(e.to_string());
        }
    };

    let content_width = masonry.content_width(width);
    let cards: Vec<RecordCard> = records
        .into_iter()
        .map(|record| RecordCard::from_record(record, content_width))
        .collect();

    debug!(
        route = "/r",
        result_count = cards.len(),
        width,
        duration_ms = start.elapsed().as_millis() as u64,
        "Records page ready"
    );

    ViewState::Ready(RecordsView {
        columns: masonry.place(cards, RecordCard::height_estimate),
        column_width: masonry.column_width(width),
        content_width,
    })
}

// =============================================================================
// NOTE PAGE
// =============================================================================

/// A loaded `/n/{id}` page.
pub enum NoteView {
    Editor { id: Uuid, session: EditorSession },
    /// The note body does not parse; shown as raw JSON.
    Unparsed { error: String, raw_json: String },
    /// The id names a record that is not a note.
    Generic(Record),
}

impl NoteView {
    /// Document HTML rendered for `width`, or the raw record.
    pub fn to_html(&self, width: u32) -> String {
        match self {
            NoteView::Editor { id, session } => match session.preview_html(width) {
                Ok(html) => format!(
                    r#"<div class="editor" data-note-id="{}">{}</div>"#,
                    id, html
                ),
                Err(e) => format!("<pre>{}</pre>", html_escape(&e.to_string())),
            },
            NoteView::Unparsed { error, raw_json } => format!(
                r#"<p class="render-error">{}</p><pre>{}</pre>"#,
                html_escape(error),
                html_escape(raw_json)
            ),
            NoteView::Generic(record) => format!("<pre>{}</pre>", html_escape(&pretty_json(record))),
        }
    }
}

/// Load a note for editing.
pub async fn note_page(store: &dyn RecordStore, id: &str) -> ViewState<NoteView> {
    let Some(uuid) = parse_v4(id) else {
        debug!(route = "/n/:id", record_id = id, "Malformed note id");
        return ViewState::NotFound(id.to_string());
    };

    let record = match store.get_record(id).await {
        Ok(record) => record,
        Err(e) => return ViewState::from_result(id, Err(e)),
    };

    match record.classify() {
        RecordKind::Note(note) => {
            match EditorSession::mount(note_namespace(uuid), Some(note.editor_state())) {
                Ok(session) => ViewState::Ready(NoteView::Editor { id: uuid, session }),
                Err(e) => {
                    let e: Error = e.into();
                    warn!(record_id = id, error = %e, "Note body does not parse, showing raw JSON");
                    ViewState::Ready(NoteView::Unparsed {
                        error: e.to_string(),
                        raw_json: serde_json::to_string_pretty(&note.body)
                            .unwrap_or_else(|_| note.body.to_string()),
                    })
                }
            }
        }
        RecordKind::Other(record) => ViewState::Ready(NoteView::Generic(record)),
    }
}

/// A fresh note with a newly generated id.
pub struct NewNote {
    pub id: Uuid,
    pub session: EditorSession,
}

pub fn new_note_page() -> think_core::Result<NewNote> {
    let id = generate_uuid();
    let session = EditorSession::mount(note_namespace(id), None)?;
    debug!(record_id = %id, "New note");
    Ok(NewNote { id, session })
}

// =============================================================================
// EMBEDDED RECORDS
// =============================================================================

/// Display content for one embedded record.
#[derive(Debug, Clone, PartialEq)]
pub enum EmbedContent {
    Note(Preview),
    Raw(String),
    /// The record could not be fetched.
    Failed,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EmbeddedRecord {
    pub id: String,
    pub content: EmbedContent,
}

impl EmbeddedRecord {
    pub fn to_html(&self) -> String {
        match &self.content {
            EmbedContent::Note(Preview::Html(html)) => format!("<div>{}</div>", html),
            EmbedContent::Note(Preview::Fallback { raw_json, .. }) => {
                format!("<pre>{}</pre>", html_escape(raw_json))
            }
            EmbedContent::Raw(raw) => format!("<pre>{}</pre>", html_escape(raw)),
            EmbedContent::Failed => format!(
                "<p>Error during fetch record &quot;{}&quot;</p>",
                html_escape(&self.id)
            ),
        }
    }
}

/// Fetch and render every record embedded in `session`, in document order.
pub async fn embedded_records(
    store: &dyn RecordStore,
    session: &EditorSession,
) -> Vec<EmbeddedRecord> {
    let ids = match session.state() {
        Ok(state) => state.embedded_record_ids(),
        Err(_) => return Vec::new(),
    };

    let mut embeds = Vec::with_capacity(ids.len());
    for id in ids {
        let content = match store.get_record(&id).await {
            Ok(record) => match record.classify() {
                RecordKind::Note(note) => {
                    EmbedContent::Note(render_note_preview(&note, EMBED_PREVIEW_WIDTH))
                }
                RecordKind::Other(record) => EmbedContent::Raw(pretty_json(&record)),
            },
            Err(e) => {
                warn!(record_id = %id, error = %e, "Embedded record fetch failed");
                EmbedContent::Failed
            }
        };
        embeds.push(EmbeddedRecord { id, content });
    }
    embeds
}

/// Fill the record placeholders in `html` with their rendered content.
///
/// `embeds` are in document order. Each search resumes after the previous
/// fragment, so placeholders inside inserted content are left alone.
pub fn expand_embeds(html: &str, embeds: &[EmbeddedRecord]) -> String {
    let mut out = html.to_string();
    let mut from = 0;
    for embed in embeds {
        let marker = format!(r#"data-lexical-record="{}">"#, html_escape(&embed.id));
        let Some(pos) = out[from..].find(&format!("{}</div>", marker)) else {
            continue;
        };
        let at = from + pos + marker.len();
        let fragment = embed.to_html();
        out.insert_str(at, &fragment);
        from = at + fragment.len();
    }
    out
}

fn pretty_json(record: &Record) -> String {
    serde_json::to_string_pretty(record).unwrap_or_else(|_| record.body.to_string())
}
