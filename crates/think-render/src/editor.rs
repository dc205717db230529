//! Interactive editing session over an editable engine.

use serde_json::Value;
use tracing::debug;
use uuid::Uuid;

use crate::document::EditorState;
use crate::engine::{EngineConfig, HeadlessEngine};
use crate::error::{RenderError, RenderResult};
use crate::html;
use crate::node::{Node, NodeType};
use crate::note::image_width_limit;
use crate::transform::{ImageWidthClamp, NodeTransform};

/// A mounted, editable document.
pub struct EditorSession {
    engine: HeadlessEngine,
}

impl EditorSession {
    /// Mount an editor, seeded with `initial` when given. Without a seed
    /// the document is a single empty paragraph.
    pub fn mount(namespace: impl Into<String>, initial: Option<&Value>) -> RenderResult<Self> {
        let config = EngineConfig {
            editable: true,
            ..EngineConfig::headless(namespace)
        };
        let mut engine = HeadlessEngine::new(config);
        let state = match initial {
            Some(value) => engine.parse_editor_state(value)?,
            None => EditorState::empty(),
        };
        engine.set_editor_state(state);
        debug!(namespace = %engine.namespace(), seeded = initial.is_some(), "Editor mounted");
        Ok(Self { engine })
    }

    pub fn namespace(&self) -> &str {
        self.engine.namespace()
    }

    pub fn state(&self) -> RenderResult<&EditorState> {
        self.engine.editor_state().ok_or(RenderError::EmptyState)
    }

    /// Add a paragraph. On an empty document the existing empty paragraph
    /// is filled instead.
    pub fn append_paragraph(&mut self, text: &str) -> RenderResult<()> {
        let empty = self.is_empty();
        self.engine.update(|state| {
            let children = state.root_mut().children_mut();
            if empty {
                if let Some(first) = children.first_mut() {
                    first.children_mut().push(Node::text(text));
                    return;
                }
            }
            children.push(Node::paragraph(vec![Node::text(text)]));
        })
    }

    /// Add a heading; `tag` is `h1` through `h6`.
    pub fn append_heading(&mut self, tag: &str, text: &str) -> RenderResult<()> {
        if !matches!(tag, "h1" | "h2" | "h3" | "h4" | "h5" | "h6") {
            return Err(RenderError::InvalidField {
                node_type: NodeType::Heading.to_string(),
                field: "tag".to_string(),
                expected: "h1..h6".to_string(),
            });
        }
        let empty = self.is_empty();
        self.engine.update(|state| {
            let children = state.root_mut().children_mut();
            if empty {
                children.clear();
            }
            children.push(Node::heading(tag, vec![Node::text(text)]));
        })
    }

    /// Embed another record. The embed is a block and lands at the end of
    /// the root.
    pub fn insert_record(&mut self, id: Uuid) -> RenderResult<()> {
        let id = id.to_string();
        self.engine.update(|state| {
            state.root_mut().children_mut().push(Node::record(&id));
        })
    }

    /// Exactly one root child, and it is a paragraph without children.
    pub fn is_empty(&self) -> bool {
        self.engine
            .read(|state| {
                let children = state.root().children();
                match children {
                    [] => true,
                    [only] => {
                        only.node_type() == NodeType::Paragraph && only.children().is_empty()
                    }
                    _ => false,
                }
            })
            .unwrap_or(true)
    }

    pub fn text_content(&self) -> String {
        self.engine
            .read(EditorState::text_content)
            .unwrap_or_default()
    }

    /// Serialized state, ready to be saved as a note body.
    pub fn to_json(&self) -> RenderResult<Value> {
        self.engine.read(EditorState::to_json)
    }

    /// Render the current document for a container `width` pixels wide
    /// without touching the session's own state.
    pub fn preview_html(&self, width: u32) -> RenderResult<String> {
        let mut state = self.state()?.clone();
        if let Some(limit) = image_width_limit(width) {
            let clamp = ImageWidthClamp::new(limit);
            state.root_mut().walk_mut(&mut |node: &mut Node| {
                if node.node_type() == NodeType::Image {
                    clamp.transform(node);
                }
            });
        }
        Ok(html::generate_html(&state, self.engine.theme()))
    }
}
