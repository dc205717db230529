//! Document nodes.
//!
//! A [`Node`] keeps every serialized field it was parsed from, so writing a
//! parsed tree back out yields the same JSON for content nobody touched.
//! Rendering and transforms read typed values through accessors and write
//! through [`Node::set_field`].

use serde_json::{Map, Number, Value};
use std::fmt;
use std::str::FromStr;

/// Node types the engine knows how to parse and render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeType {
    Root,
    Paragraph,
    Heading,
    Quote,
    List,
    ListItem,
    Code,
    CodeHighlight,
    Text,
    LineBreak,
    Tab,
    Link,
    AutoLink,
    Image,
    HorizontalRule,
    Table,
    TableRow,
    TableCell,
    Hashtag,
    Mention,
    Emoji,
    Keyword,
    Autocomplete,
    Equation,
    YouTube,
    Record,
    CollapsibleContainer,
    CollapsibleTitle,
    CollapsibleContent,
    Sticky,
    Mark,
    Overflow,
}

impl NodeType {
    pub const ALL: [NodeType; 32] = [
        NodeType::Root,
        NodeType::Paragraph,
        NodeType::Heading,
        NodeType::Quote,
        NodeType::List,
        NodeType::ListItem,
        NodeType::Code,
        NodeType::CodeHighlight,
        NodeType::Text,
        NodeType::LineBreak,
        NodeType::Tab,
        NodeType::Link,
        NodeType::AutoLink,
        NodeType::Image,
        NodeType::HorizontalRule,
        NodeType::Table,
        NodeType::TableRow,
        NodeType::TableCell,
        NodeType::Hashtag,
        NodeType::Mention,
        NodeType::Emoji,
        NodeType::Keyword,
        NodeType::Autocomplete,
        NodeType::Equation,
        NodeType::YouTube,
        NodeType::Record,
        NodeType::CollapsibleContainer,
        NodeType::CollapsibleTitle,
        NodeType::CollapsibleContent,
        NodeType::Sticky,
        NodeType::Mark,
        NodeType::Overflow,
    ];

    /// The `type` discriminator used in serialized documents.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Root => "root",
            Self::Paragraph => "paragraph",
            Self::Heading => "heading",
            Self::Quote => "quote",
            Self::List => "list",
            Self::ListItem => "listitem",
            Self::Code => "code",
            Self::CodeHighlight => "code-highlight",
            Self::Text => "text",
            Self::LineBreak => "linebreak",
            Self::Tab => "tab",
            Self::Link => "link",
            Self::AutoLink => "autolink",
            Self::Image => "image",
            Self::HorizontalRule => "horizontalrule",
            Self::Table => "table",
            Self::TableRow => "tablerow",
            Self::TableCell => "tablecell",
            Self::Hashtag => "hashtag",
            Self::Mention => "mention",
            Self::Emoji => "emoji",
            Self::Keyword => "keyword",
            Self::Autocomplete => "autocomplete",
            Self::Equation => "equation",
            Self::YouTube => "youtube",
            Self::Record => "record",
            Self::CollapsibleContainer => "collapsible-container",
            Self::CollapsibleTitle => "collapsible-title",
            Self::CollapsibleContent => "collapsible-content",
            Self::Sticky => "sticky",
            Self::Mark => "mark",
            Self::Overflow => "overflow",
        }
    }

    /// Element nodes own a `children` array.
    pub fn is_element(&self) -> bool {
        matches!(
            self,
            Self::Root
                | Self::Paragraph
                | Self::Heading
                | Self::Quote
                | Self::List
                | Self::ListItem
                | Self::Code
                | Self::Link
                | Self::AutoLink
                | Self::Table
                | Self::TableRow
                | Self::TableCell
                | Self::CollapsibleContainer
                | Self::CollapsibleTitle
                | Self::CollapsibleContent
                | Self::Mark
                | Self::Overflow
        )
    }

    /// Leaf nodes whose content is a `text` field.
    pub fn is_text_like(&self) -> bool {
        matches!(
            self,
            Self::Text
                | Self::CodeHighlight
                | Self::Tab
                | Self::Hashtag
                | Self::Mention
                | Self::Emoji
                | Self::Keyword
                | Self::Autocomplete
        )
    }

    /// Block-level nodes are separated by a blank line in text content.
    pub fn is_block(&self) -> bool {
        self.is_element()
            && !matches!(
                self,
                Self::Link | Self::AutoLink | Self::Mark | Self::Overflow
            )
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NodeType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NodeType::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| s.to_string())
    }
}

/// Text format bitmask as stored in the `format` field of text nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextFormat(pub u32);

impl TextFormat {
    pub const BOLD: u32 = 1;
    pub const ITALIC: u32 = 1 << 1;
    pub const STRIKETHROUGH: u32 = 1 << 2;
    pub const UNDERLINE: u32 = 1 << 3;
    pub const CODE: u32 = 1 << 4;
    pub const SUBSCRIPT: u32 = 1 << 5;
    pub const SUPERSCRIPT: u32 = 1 << 6;
    pub const HIGHLIGHT: u32 = 1 << 7;

    #[inline]
    pub fn has(&self, flag: u32) -> bool {
        self.0 & flag != 0
    }
}

/// A parsed document node.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    node_type: NodeType,
    children: Vec<Node>,
    /// Serialized fields other than `type` and `children`.
    fields: Map<String, Value>,
}

impl Node {
    pub(crate) fn from_parts(node_type: NodeType, children: Vec<Node>, fields: Map<String, Value>) -> Self {
        Self {
            node_type,
            children,
            fields,
        }
    }

    /// A fresh element with the fields the editor writes for new blocks.
    pub fn element(node_type: NodeType, children: Vec<Node>) -> Self {
        let mut fields = Map::new();
        fields.insert("direction".to_string(), Value::String("ltr".to_string()));
        fields.insert("format".to_string(), Value::String(String::new()));
        fields.insert("indent".to_string(), Value::from(0));
        fields.insert("version".to_string(), Value::from(1));
        Self::from_parts(node_type, children, fields)
    }

    pub fn paragraph(children: Vec<Node>) -> Self {
        Self::element(NodeType::Paragraph, children)
    }

    /// Heading; `tag` is `h1` through `h6`.
    pub fn heading(tag: &str, children: Vec<Node>) -> Self {
        let mut node = Self::element(NodeType::Heading, children);
        node.set_field("tag", Value::String(tag.to_string()));
        node
    }

    /// Unformatted text.
    pub fn text(text: &str) -> Self {
        let mut fields = Map::new();
        fields.insert("detail".to_string(), Value::from(0));
        fields.insert("format".to_string(), Value::from(0));
        fields.insert("mode".to_string(), Value::String("normal".to_string()));
        fields.insert("style".to_string(), Value::String(String::new()));
        fields.insert("text".to_string(), Value::String(text.to_string()));
        fields.insert("version".to_string(), Value::from(1));
        Self::from_parts(NodeType::Text, Vec::new(), fields)
    }

    /// Block embedding another record by id.
    pub fn record(record_id: &str) -> Self {
        let mut fields = Map::new();
        fields.insert("format".to_string(), Value::String(String::new()));
        fields.insert("recordId".to_string(), Value::String(record_id.to_string()));
        fields.insert("version".to_string(), Value::from(1));
        Self::from_parts(NodeType::Record, Vec::new(), fields)
    }

    pub fn node_type(&self) -> NodeType {
        self.node_type
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn children_mut(&mut self) -> &mut Vec<Node> {
        &mut self.children
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    pub fn set_field(&mut self, name: &str, value: Value) {
        self.fields.insert(name.to_string(), value);
    }

    pub fn str_field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).and_then(Value::as_str)
    }

    /// Numeric field as a non-negative integer. Floats are truncated.
    pub fn u32_field(&self, name: &str) -> Option<u32> {
        let value = self.fields.get(name)?;
        value
            .as_u64()
            .or_else(|| value.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64))
            .map(|n| n.min(u32::MAX as u64) as u32)
    }

    pub fn bool_field(&self, name: &str) -> Option<bool> {
        self.fields.get(name).and_then(Value::as_bool)
    }

    pub fn set_u32_field(&mut self, name: &str, value: u32) {
        self.fields
            .insert(name.to_string(), Value::Number(Number::from(value)));
    }

    /// Leaf text for text-like nodes.
    pub fn text_value(&self) -> &str {
        match self.node_type {
            NodeType::Tab => self.str_field("text").unwrap_or("\t"),
            _ => self.str_field("text").unwrap_or(""),
        }
    }

    pub fn text_format(&self) -> TextFormat {
        TextFormat(self.u32_field("format").unwrap_or(0))
    }

    /// Plain text of this subtree.
    ///
    /// Block children are separated by a blank line, a line break becomes
    /// `\n` and an embedded record becomes its `/r/{id}` path.
    pub fn text_content(&self) -> String {
        match self.node_type {
            NodeType::LineBreak => "\n".to_string(),
            NodeType::Record => format!("/r/{}", self.str_field("recordId").unwrap_or("")),
            NodeType::Equation => self.str_field("equation").unwrap_or("").to_string(),
            t if t.is_text_like() => self.text_value().to_string(),
            t if t.is_element() => {
                let mut out = String::new();
                for (i, child) in self.children.iter().enumerate() {
                    out.push_str(&child.text_content());
                    if child.node_type.is_block() && i + 1 < self.children.len() {
                        out.push_str("\n\n");
                    }
                }
                out
            }
            _ => String::new(),
        }
    }

    /// Pre-order walk over this subtree.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a Node)) {
        visit(self);
        for child in &self.children {
            child.walk(visit);
        }
    }

    /// Pre-order walk with mutable access. A node is visited before its
    /// children, so children added by `visit` are visited too.
    pub fn walk_mut(&mut self, visit: &mut impl FnMut(&mut Node)) {
        visit(self);
        for child in &mut self.children {
            child.walk_mut(visit);
        }
    }

    /// Serialize back to the document wire format.
    pub fn to_json(&self) -> Value {
        let mut map = self.fields.clone();
        map.insert(
            "type".to_string(),
            Value::String(self.node_type.as_str().to_string()),
        );
        if self.node_type.is_element() {
            map.insert(
                "children".to_string(),
                Value::Array(self.children.iter().map(Node::to_json).collect()),
            );
        }
        Value::Object(map)
    }
}
