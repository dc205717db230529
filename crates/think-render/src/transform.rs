//! Node transforms run after every engine update.

use serde_json::Value;

use crate::node::{Node, NodeType};

/// A rewrite applied to every node of one type after an update.
pub trait NodeTransform: Send + Sync {
    /// Node type this transform applies to.
    fn node_type(&self) -> NodeType;

    /// Rewrite `node` in place.
    fn transform(&self, node: &mut Node);
}

/// Clamp image widths to `max_width`.
///
/// Unsized images (width 0 or `"inherit"`) and images wider than the limit
/// get `max_width`. A known height is scaled by the same ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageWidthClamp {
    max_width: u32,
}

impl ImageWidthClamp {
    pub fn new(max_width: u32) -> Self {
        Self { max_width }
    }

    pub fn max_width(&self) -> u32 {
        self.max_width
    }
}

impl NodeTransform for ImageWidthClamp {
    fn node_type(&self) -> NodeType {
        NodeType::Image
    }

    fn transform(&self, node: &mut Node) {
        if node.node_type() != NodeType::Image || self.max_width == 0 {
            return;
        }

        let width = node.u32_field("width").unwrap_or(0);
        if width != 0 && width <= self.max_width {
            return;
        }

        let height = node.u32_field("height").unwrap_or(0);
        if width > 0 && height > 0 {
            let scaled = (u64::from(height) * u64::from(self.max_width) / u64::from(width)).max(1);
            node.set_u32_field("height", scaled as u32);
        }
        node.set_u32_field("width", self.max_width);

        if let Some(max) = node.field("maxWidth") {
            let capped = match max {
                Value::Number(_) => node
                    .u32_field("maxWidth")
                    .map(|m| m > self.max_width)
                    .unwrap_or(true),
                _ => true,
            };
            if capped {
                node.set_u32_field("maxWidth", self.max_width);
            }
        }
    }
}
