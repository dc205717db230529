//! Render error types.

use thiserror::Error;

/// Result type alias for parsing and rendering.
pub type RenderResult<T> = Result<T, RenderError>;

/// A serialized document that does not conform to the expected tree shape,
/// or an engine used out of order.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RenderError {
    #[error("Body is not valid JSON: {0}")]
    InvalidJson(String),

    #[error("Editor state must be a JSON object")]
    NotAnObject,

    #[error("Editor state has no root node")]
    MissingRoot,

    #[error("Root node has type '{0}', expected 'root'")]
    RootType(String),

    #[error("Root node nested inside the document")]
    NestedRoot,

    #[error("Node without a string 'type'")]
    MissingType,

    #[error("Node type '{0}' is not registered on this engine")]
    UnknownNodeType(String),

    #[error("Element '{0}' has no 'children' array")]
    MissingChildren(String),

    #[error("Node '{node_type}' has invalid field '{field}': expected {expected}")]
    InvalidField {
        node_type: String,
        field: String,
        expected: String,
    },

    #[error("Engine has no editor state")]
    EmptyState,

    #[error("Transform targets node type '{0}' which is not registered")]
    UnregisteredTransform(String),
}

impl RenderError {
    pub(crate) fn invalid_field(node_type: &str, field: &str, expected: &str) -> Self {
        Self::InvalidField {
            node_type: node_type.to_string(),
            field: field.to_string(),
            expected: expected.to_string(),
        }
    }
}

impl From<RenderError> for think_core::Error {
    fn from(e: RenderError) -> Self {
        think_core::Error::Render(e.to_string())
    }
}
