//! Headless document engine.
//!
//! An engine owns one [`EditorState`] plus the configuration it was created
//! with: a namespace, a theme, the registered node types and any node
//! transforms. Engines are cheap to build and meant to be dropped as soon as
//! a render finishes.

use serde_json::Value;
use tracing::{debug, trace};

use crate::document::EditorState;
use crate::error::{RenderError, RenderResult};
use crate::html;
use crate::node::Node;
use crate::registry::NodeRegistry;
use crate::theme::Theme;
use crate::transform::NodeTransform;

/// Engine construction parameters.
#[derive(Debug, Clone, Default)]
pub struct EngineConfig {
    /// Identifies the engine instance in logs.
    pub namespace: String,
    pub theme: Theme,
    pub editable: bool,
    pub nodes: NodeRegistry,
}

impl EngineConfig {
    /// Read-only engine accepting every node type, with the default theme.
    pub fn headless(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            ..Self::default()
        }
    }
}

pub struct HeadlessEngine {
    config: EngineConfig,
    state: Option<EditorState>,
    transforms: Vec<Box<dyn NodeTransform>>,
}

impl HeadlessEngine {
    pub fn new(config: EngineConfig) -> Self {
        trace!(namespace = %config.namespace, editable = config.editable, "Engine created");
        Self {
            config,
            state: None,
            transforms: Vec::new(),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.config.namespace
    }

    pub fn is_editable(&self) -> bool {
        self.config.editable
    }

    pub fn theme(&self) -> &Theme {
        &self.config.theme
    }

    /// Parse a serialized state against this engine's registry.
    pub fn parse_editor_state(&self, value: &Value) -> RenderResult<EditorState> {
        EditorState::parse(value, &self.config.nodes)
    }

    pub fn set_editor_state(&mut self, state: EditorState) {
        self.state = Some(state);
    }

    /// Register a transform. Its node type must be registered on the engine.
    pub fn register_node_transform(
        &mut self,
        transform: Box<dyn NodeTransform>,
    ) -> RenderResult<()> {
        let node_type = transform.node_type();
        if !self.config.nodes.contains(node_type) {
            return Err(RenderError::UnregisteredTransform(node_type.to_string()));
        }
        self.transforms.push(transform);
        Ok(())
    }

    /// Mutate the state, then run the registered transforms.
    pub fn update<F>(&mut self, f: F) -> RenderResult<()>
    where
        F: FnOnce(&mut EditorState),
    {
        let state = self.state.as_mut().ok_or(RenderError::EmptyState)?;
        f(state);
        let transforms = &self.transforms;
        if !transforms.is_empty() {
            state.root_mut().walk_mut(&mut |node: &mut Node| {
                for transform in transforms {
                    if transform.node_type() == node.node_type() {
                        transform.transform(node);
                    }
                }
            });
        }
        Ok(())
    }

    /// Read-only access to the state.
    pub fn read<T, F>(&self, f: F) -> RenderResult<T>
    where
        F: FnOnce(&EditorState) -> T,
    {
        self.state.as_ref().map(f).ok_or(RenderError::EmptyState)
    }

    pub fn editor_state(&self) -> Option<&EditorState> {
        self.state.as_ref()
    }

    /// Materialize the current state to HTML.
    pub fn generate_html(&self) -> RenderResult<String> {
        let theme = &self.config.theme;
        self.read(|state| html::generate_html(state, theme))
    }

    /// Run transforms over the current state and render it, consuming the
    /// engine.
    pub fn render_html(mut self) -> RenderResult<String> {
        self.update(|_| {})?;
        let html = self.generate_html()?;
        debug!(namespace = %self.config.namespace, html_len = html.len(), "Rendered HTML");
        Ok(html)
    }

    /// Take the state out of the engine.
    pub fn into_state(mut self) -> Option<EditorState> {
        self.state.take()
    }
}

impl Drop for HeadlessEngine {
    fn drop(&mut self) {
        trace!(namespace = %self.config.namespace, "Engine released");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::NodeType;
    use crate::transform::ImageWidthClamp;
    use serde_json::json;

    fn body() -> Value {
        json!({"root": {"type": "root", "children": [
            {"type": "paragraph", "children": [
                {"type": "text", "text": "hi", "format": 0}
            ]},
            {"type": "image", "src": "/a.png", "width": 1000, "height": 400}
        ]}})
    }

    fn plain(namespace: &str) -> EngineConfig {
        EngineConfig {
            theme: Theme::plain(),
            ..EngineConfig::headless(namespace)
        }
    }

    #[test]
    fn test_generate_without_state_fails() {
        let engine = HeadlessEngine::new(plain("t"));
        assert_eq!(engine.generate_html(), Err(RenderError::EmptyState));
    }

    #[test]
    fn test_update_runs_transforms() {
        let mut engine = HeadlessEngine::new(plain("t"));
        let state = engine.parse_editor_state(&body()).unwrap();
        engine.set_editor_state(state);
        engine
            .register_node_transform(Box::new(ImageWidthClamp::new(300)))
            .unwrap();
        engine.update(|_| {}).unwrap();

        let width = engine
            .read(|state| state.root().children()[1].u32_field("width"))
            .unwrap();
        assert_eq!(width, Some(300));
    }

    #[test]
    fn test_transform_for_unregistered_type_rejected() {
        let config = EngineConfig {
            nodes: NodeRegistry::core(),
            ..plain("t")
        };
        let mut engine = HeadlessEngine::new(config);
        let err = engine
            .register_node_transform(Box::new(ImageWidthClamp::new(300)))
            .unwrap_err();
        assert_eq!(err, RenderError::UnregisteredTransform("image".to_string()));
    }

    #[test]
    fn test_render_html_applies_transforms() {
        let mut engine = HeadlessEngine::new(plain("t"));
        let state = engine.parse_editor_state(&body()).unwrap();
        engine.set_editor_state(state);
        engine
            .register_node_transform(Box::new(ImageWidthClamp::new(300)))
            .unwrap();
        let html = engine.render_html().unwrap();
        assert_eq!(
            html,
            r#"<p><span style="white-space: pre-wrap;">hi</span></p><img src="/a.png" alt="" width="300" height="120">"#
        );
    }

    #[test]
    fn test_update_mutates_state() {
        let mut engine = HeadlessEngine::new(plain("t"));
        engine.set_editor_state(EditorState::empty());
        engine
            .update(|state| {
                state
                    .root_mut()
                    .children_mut()
                    .push(Node::heading("h1", vec![Node::text("T")]));
            })
            .unwrap();
        let count = engine.read(|s| s.root().children().len()).unwrap();
        assert_eq!(count, 2);
        assert_eq!(
            engine.editor_state().unwrap().root().children()[1].node_type(),
            NodeType::Heading
        );
    }
}
