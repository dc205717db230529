//! # think-render
//!
//! Document engine for think notes.
//!
//! Parses the serialized rich-document tree stored in note bodies, runs node
//! transforms over it and materializes it to HTML without any browser. The
//! same engine backs the interactive [`EditorSession`].

pub mod document;
pub mod editor;
pub mod engine;
pub mod error;
pub mod html;
pub mod node;
pub mod note;
pub mod registry;
pub mod theme;
pub mod transform;

pub use document::EditorState;
pub use editor::EditorSession;
pub use engine::{EngineConfig, HeadlessEngine};
pub use error::{RenderError, RenderResult};
pub use html::{generate_html, html_escape, sanitize_url};
pub use node::{Node, NodeType, TextFormat};
pub use note::{generate_html_from_note, image_width_limit, note_namespace, render_note_preview, Preview};
pub use registry::NodeRegistry;
pub use theme::Theme;
pub use transform::{ImageWidthClamp, NodeTransform};
