//! Serialized editor state: parsing and serialization.
//!
//! Wire format:
//!
//! ```json
//! {"root": {"type": "root", "version": 1, "direction": "ltr", "format": "",
//!           "indent": 0, "children": [ ... ]}}
//! ```
//!
//! Every node carries a `type` discriminator; element nodes carry a
//! `children` array. Fields the engine does not interpret are preserved.

use serde_json::{Map, Value};

use crate::error::{RenderError, RenderResult};
use crate::node::{Node, NodeType};
use crate::registry::NodeRegistry;

/// A parsed document tree.
#[derive(Debug, Clone, PartialEq)]
pub struct EditorState {
    root: Node,
}

impl EditorState {
    /// Document holding one empty paragraph, which is what a fresh editor
    /// shows.
    pub fn empty() -> Self {
        Self {
            root: Node::element(NodeType::Root, vec![Node::paragraph(vec![])]),
        }
    }

    /// Parse a serialized state against a registry.
    ///
    /// Accepts the state object itself or a JSON string holding it.
    pub fn parse(value: &Value, registry: &NodeRegistry) -> RenderResult<Self> {
        if let Value::String(raw) = value {
            let parsed: Value =
                serde_json::from_str(raw).map_err(|e| RenderError::InvalidJson(e.to_string()))?;
            return Self::parse(&parsed, registry);
        }

        let object = value.as_object().ok_or(RenderError::NotAnObject)?;
        let root_value = object.get("root").ok_or(RenderError::MissingRoot)?;
        let root_object = root_value.as_object().ok_or(RenderError::MissingRoot)?;

        match root_object.get("type").and_then(Value::as_str) {
            Some("root") => {}
            Some(other) => return Err(RenderError::RootType(other.to_string())),
            None => return Err(RenderError::MissingType),
        }

        let children = parse_children(root_object, "root", registry)?;
        let root = Node::from_parts(NodeType::Root, children, strip(root_object));
        Ok(Self { root })
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut Node {
        &mut self.root
    }

    /// Serialize to `{"root": {...}}`.
    pub fn to_json(&self) -> Value {
        let mut map = Map::new();
        map.insert("root".to_string(), self.root.to_json());
        Value::Object(map)
    }

    /// Plain text of the whole document.
    pub fn text_content(&self) -> String {
        self.root.text_content()
    }

    /// Ids of records embedded in this document, in document order.
    pub fn embedded_record_ids(&self) -> Vec<String> {
        let mut ids = Vec::new();
        self.root.walk(&mut |node| {
            if node.node_type() == NodeType::Record {
                if let Some(id) = node.str_field("recordId") {
                    ids.push(id.to_string());
                }
            }
        });
        ids
    }
}

impl Default for EditorState {
    fn default() -> Self {
        Self::empty()
    }
}

fn strip(object: &Map<String, Value>) -> Map<String, Value> {
    object
        .iter()
        .filter(|(k, _)| k.as_str() != "type" && k.as_str() != "children")
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}

fn parse_children(
    object: &Map<String, Value>,
    type_name: &str,
    registry: &NodeRegistry,
) -> RenderResult<Vec<Node>> {
    let children = object
        .get("children")
        .and_then(Value::as_array)
        .ok_or_else(|| RenderError::MissingChildren(type_name.to_string()))?;
    children
        .iter()
        .map(|child| parse_node(child, registry))
        .collect()
}

fn parse_node(value: &Value, registry: &NodeRegistry) -> RenderResult<Node> {
    let object = value.as_object().ok_or(RenderError::MissingType)?;
    let type_name = object
        .get("type")
        .and_then(Value::as_str)
        .ok_or(RenderError::MissingType)?;
    let node_type = registry
        .resolve(type_name)
        .ok_or_else(|| RenderError::UnknownNodeType(type_name.to_string()))?;

    if node_type == NodeType::Root {
        return Err(RenderError::NestedRoot);
    }

    validate_fields(node_type, object)?;

    if node_type.is_element() {
        let children = parse_children(object, type_name, registry)?;
        Ok(Node::from_parts(node_type, children, strip(object)))
    } else {
        // Leaves keep any stray `children` value verbatim.
        let fields = object
            .iter()
            .filter(|(k, _)| k.as_str() != "type")
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        Ok(Node::from_parts(node_type, Vec::new(), fields))
    }
}

fn require_str(object: &Map<String, Value>, node_type: NodeType, field: &str) -> RenderResult<()> {
    match object.get(field) {
        Some(Value::String(_)) => Ok(()),
        _ => Err(RenderError::invalid_field(node_type.as_str(), field, "string")),
    }
}

fn optional_number(
    object: &Map<String, Value>,
    node_type: NodeType,
    field: &str,
) -> RenderResult<()> {
    match object.get(field) {
        None | Some(Value::Null) | Some(Value::Number(_)) => Ok(()),
        // The editor writes "inherit" for unconstrained image sizes.
        Some(Value::String(s)) if s == "inherit" => Ok(()),
        Some(_) => Err(RenderError::invalid_field(node_type.as_str(), field, "number")),
    }
}

fn validate_fields(node_type: NodeType, object: &Map<String, Value>) -> RenderResult<()> {
    match node_type {
        NodeType::Tab => {}
        t if t.is_text_like() => {
            require_str(object, t, "text")?;
            match object.get("format") {
                None | Some(Value::Number(_)) => {}
                Some(_) => {
                    return Err(RenderError::invalid_field(t.as_str(), "format", "integer"))
                }
            }
        }
        NodeType::Heading => {
            let tag = object.get("tag").and_then(Value::as_str);
            if !matches!(tag, Some("h1" | "h2" | "h3" | "h4" | "h5" | "h6")) {
                return Err(RenderError::invalid_field("heading", "tag", "h1..h6"));
            }
        }
        NodeType::List => {
            let list_type = object.get("listType").and_then(Value::as_str);
            if !matches!(list_type, Some("bullet" | "number" | "check")) {
                return Err(RenderError::invalid_field(
                    "list",
                    "listType",
                    "bullet, number or check",
                ));
            }
        }
        NodeType::Link | NodeType::AutoLink => require_str(object, node_type, "url")?,
        NodeType::Image => {
            require_str(object, node_type, "src")?;
            optional_number(object, node_type, "width")?;
            optional_number(object, node_type, "height")?;
            optional_number(object, node_type, "maxWidth")?;
        }
        NodeType::Record => require_str(object, node_type, "recordId")?,
        NodeType::YouTube => require_str(object, node_type, "videoID")?,
        NodeType::Equation => require_str(object, node_type, "equation")?,
        _ => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn registry() -> NodeRegistry {
        NodeRegistry::all()
    }

    fn sample() -> Value {
        json!({
            "root": {
                "children": [
                    {
                        "children": [
                            {"detail": 0, "format": 1, "mode": "normal", "style": "",
                             "text": "Hello", "type": "text", "version": 1}
                        ],
                        "direction": "ltr", "format": "", "indent": 0,
                        "type": "paragraph", "version": 1
                    }
                ],
                "direction": "ltr", "format": "", "indent": 0,
                "type": "root", "version": 1
            }
        })
    }

    #[test]
    fn test_parse_and_serialize_round_trip() {
        let body = sample();
        let state = EditorState::parse(&body, &registry()).unwrap();
        assert_eq!(state.to_json(), body);
    }

    #[test]
    fn test_parse_from_json_string() {
        let raw = sample().to_string();
        let state = EditorState::parse(&Value::String(raw), &registry()).unwrap();
        assert_eq!(state.text_content(), "Hello");
    }

    #[test]
    fn test_invalid_json_string() {
        let err = EditorState::parse(&json!("{not json"), &registry()).unwrap_err();
        assert!(matches!(err, RenderError::InvalidJson(_)));
    }

    #[test]
    fn test_not_an_object() {
        let err = EditorState::parse(&json!([1, 2]), &registry()).unwrap_err();
        assert_eq!(err, RenderError::NotAnObject);
    }

    #[test]
    fn test_missing_root() {
        let err = EditorState::parse(&json!({"editor": {}}), &registry()).unwrap_err();
        assert_eq!(err, RenderError::MissingRoot);
    }

    #[test]
    fn test_root_of_wrong_type() {
        let body = json!({"root": {"type": "paragraph", "children": []}});
        let err = EditorState::parse(&body, &registry()).unwrap_err();
        assert_eq!(err, RenderError::RootType("paragraph".to_string()));
    }

    #[test]
    fn test_nested_root() {
        let body = json!({"root": {"type": "root", "children": [
            {"type": "root", "children": []}
        ]}});
        let err = EditorState::parse(&body, &registry()).unwrap_err();
        assert_eq!(err, RenderError::NestedRoot);
    }

    #[test]
    fn test_unknown_node_type() {
        let body = json!({"root": {"type": "root", "children": [
            {"type": "tablesheet", "rows": []}
        ]}});
        let err = EditorState::parse(&body, &registry()).unwrap_err();
        assert_eq!(err, RenderError::UnknownNodeType("tablesheet".to_string()));
    }

    #[test]
    fn test_unregistered_node_type() {
        let body = json!({"root": {"type": "root", "children": [
            {"type": "image", "src": "/a.png"}
        ]}});
        let err = EditorState::parse(&body, &NodeRegistry::core()).unwrap_err();
        assert_eq!(err, RenderError::UnknownNodeType("image".to_string()));
    }

    #[test]
    fn test_element_without_children() {
        let body = json!({"root": {"type": "root", "children": [
            {"type": "paragraph"}
        ]}});
        let err = EditorState::parse(&body, &registry()).unwrap_err();
        assert_eq!(err, RenderError::MissingChildren("paragraph".to_string()));
    }

    #[test]
    fn test_text_without_text() {
        let body = json!({"root": {"type": "root", "children": [
            {"type": "paragraph", "children": [{"type": "text", "format": 0}]}
        ]}});
        let err = EditorState::parse(&body, &registry()).unwrap_err();
        assert!(matches!(err, RenderError::InvalidField { .. }));
    }

    #[test]
    fn test_heading_requires_known_tag() {
        let body = json!({"root": {"type": "root", "children": [
            {"type": "heading", "tag": "h9", "children": []}
        ]}});
        assert!(EditorState::parse(&body, &registry()).is_err());
    }

    #[test]
    fn test_image_accepts_inherit_width() {
        let body = json!({"root": {"type": "root", "children": [
            {"type": "image", "src": "/a.png", "width": "inherit", "height": "inherit"}
        ]}});
        assert!(EditorState::parse(&body, &registry()).is_ok());
    }

    #[test]
    fn test_image_rejects_boolean_width() {
        let body = json!({"root": {"type": "root", "children": [
            {"type": "image", "src": "/a.png", "width": true}
        ]}});
        assert!(EditorState::parse(&body, &registry()).is_err());
    }

    #[test]
    fn test_embedded_record_ids() {
        let body = json!({"root": {"type": "root", "children": [
            {"type": "record", "recordId": "a", "format": "", "version": 1},
            {"type": "paragraph", "children": []},
            {"type": "record", "recordId": "b", "format": "", "version": 1}
        ]}});
        let state = EditorState::parse(&body, &registry()).unwrap();
        assert_eq!(state.embedded_record_ids(), vec!["a", "b"]);
    }

    #[test]
    fn test_empty_state_shape() {
        let value = EditorState::empty().to_json();
        assert_eq!(value["root"]["type"], "root");
        assert_eq!(value["root"]["children"][0]["type"], "paragraph");
    }
}
