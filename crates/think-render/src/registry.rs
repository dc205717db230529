//! Node registry.
//!
//! An engine only parses node types registered on it, the same way an
//! editor instance refuses node classes it was not configured with.

use std::collections::HashSet;

use crate::node::NodeType;

/// Set of node types an engine accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeRegistry {
    types: HashSet<NodeType>,
}

impl NodeRegistry {
    /// Types every document needs: root, paragraph, text, line break, tab.
    pub fn core() -> Self {
        Self {
            types: [
                NodeType::Root,
                NodeType::Paragraph,
                NodeType::Text,
                NodeType::LineBreak,
                NodeType::Tab,
            ]
            .into_iter()
            .collect(),
        }
    }

    /// Every node type the note editor is configured with.
    pub fn all() -> Self {
        Self {
            types: NodeType::ALL.into_iter().collect(),
        }
    }

    /// Add a node type.
    pub fn with(mut self, node_type: NodeType) -> Self {
        self.types.insert(node_type);
        self
    }

    pub fn contains(&self, node_type: NodeType) -> bool {
        self.types.contains(&node_type)
    }

    /// Resolve a serialized `type` discriminator against this registry.
    pub fn resolve(&self, type_name: &str) -> Option<NodeType> {
        type_name
            .parse::<NodeType>()
            .ok()
            .filter(|t| self.contains(*t))
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl Default for NodeRegistry {
    fn default() -> Self {
        Self::all()
    }
}
