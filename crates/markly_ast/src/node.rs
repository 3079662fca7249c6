//! Node storage and per-type attribute data.

use serde::{Deserialize, Serialize};

use crate::{NodeId, NodeType, SourcePosition};

/// A node stored in an [`Arena`](crate::Arena).
///
/// The tree links are arena identifiers, never owning references, so a node
/// can be navigated in every direction without reference cycles.
#[derive(Debug, Clone)]
pub struct Node {
    pub(crate) node_type: NodeType,
    pub(crate) data: NodeData,
    pub(crate) literal: Option<String>,
    pub(crate) position: SourcePosition,
    pub(crate) links: Links,
}

#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct Links {
    pub(crate) parent: Option<NodeId>,
    pub(crate) first_child: Option<NodeId>,
    pub(crate) last_child: Option<NodeId>,
    pub(crate) prev: Option<NodeId>,
    pub(crate) next: Option<NodeId>,
}

impl Node {
    /// Creates a detached node with the default attributes of its type.
    pub fn new(node_type: NodeType) -> Self {
        Self {
            node_type,
            data: NodeData::default_for(node_type),
            literal: node_type.has_literal().then(String::new),
            position: SourcePosition::default(),
            links: Links::default(),
        }
    }

    /// Replaces the attribute data.
    pub fn with_data(mut self, data: NodeData) -> Self {
        self.data = data;
        self
    }

    /// Sets the literal content.
    pub fn with_literal(mut self, literal: impl Into<String>) -> Self {
        self.literal = Some(literal.into());
        self
    }

    /// Sets the source position.
    pub fn with_position(mut self, position: SourcePosition) -> Self {
        self.position = position;
        self
    }

    #[inline]
    pub fn node_type(&self) -> NodeType {
        self.node_type
    }

    #[inline]
    pub fn data(&self) -> &NodeData {
        &self.data
    }

    #[inline]
    pub fn literal(&self) -> Option<&str> {
        self.literal.as_deref()
    }

    #[inline]
    pub fn position(&self) -> SourcePosition {
        self.position
    }

    /// Copies the content of this node without its tree links.
    pub(crate) fn detached_copy(&self) -> Self {
        Self {
            node_type: self.node_type,
            data: self.data.clone(),
            literal: self.literal.clone(),
            position: self.position,
            links: Links::default(),
        }
    }
}

/// Type-dependent node attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NodeData {
    #[default]
    None,
    Header(HeaderData),
    List(ListData),
    Item(ItemData),
    CodeBlock(CodeBlockData),
    Link(LinkData),
    Table(TableData),
    TableRow(TableRowData),
    FootnoteDefinition(FootnoteDefinitionData),
    FootnoteReference(FootnoteReferenceData),
    Custom(CustomData),
}

impl NodeData {
    /// Returns the default attributes for a freshly created node of `node_type`.
    pub fn default_for(node_type: NodeType) -> Self {
        match node_type {
            NodeType::Header => NodeData::Header(HeaderData { level: 1 }),
            NodeType::List => NodeData::List(ListData::default()),
            NodeType::Item => NodeData::Item(ItemData::default()),
            NodeType::CodeBlock => NodeData::CodeBlock(CodeBlockData::default()),
            NodeType::Link | NodeType::Image => NodeData::Link(LinkData::default()),
            NodeType::Table => NodeData::Table(TableData::default()),
            NodeType::TableRow => NodeData::TableRow(TableRowData::default()),
            NodeType::FootnoteDefinition => {
                NodeData::FootnoteDefinition(FootnoteDefinitionData::default())
            }
            NodeType::FootnoteReference => {
                NodeData::FootnoteReference(FootnoteReferenceData::default())
            }
            NodeType::CustomBlock | NodeType::CustomInline => {
                NodeData::Custom(CustomData::default())
            }
            _ => NodeData::None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderData {
    /// Heading level, 1 through 6.
    pub level: u8,
}

/// Kind of list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListType {
    #[default]
    Bullet,
    Ordered,
}

/// Delimiter following an ordered list marker.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListDelimiter {
    #[default]
    Period,
    Paren,
}

impl ListDelimiter {
    pub const fn as_char(&self) -> char {
        match self {
            ListDelimiter::Period => '.',
            ListDelimiter::Paren => ')',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListData {
    pub list_type: ListType,
    /// Literal start number. Bullet lists carry 0.
    pub start: u32,
    pub tight: bool,
    pub delimiter: ListDelimiter,
    pub bullet_char: char,
}

impl Default for ListData {
    fn default() -> Self {
        Self {
            list_type: ListType::Bullet,
            start: 0,
            tight: false,
            delimiter: ListDelimiter::Period,
            bullet_char: '-',
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemData {
    /// The number written in the item's marker, for ordered list items
    /// produced by a parser.
    pub number: Option<u32>,
    /// Task list state, when the item is a task.
    pub checked: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeBlockData {
    /// Full info string after the opening fence.
    pub info: String,
    pub fenced: bool,
    pub fence_char: Option<char>,
}

/// Target of a link or image.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkData {
    pub url: String,
    pub title: String,
}

/// Column alignment of a table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Alignment {
    #[default]
    None,
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableData {
    pub alignments: Vec<Alignment>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRowData {
    pub header: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FootnoteDefinitionData {
    /// Label as written in the source, used for element ids.
    pub label: String,
    /// Number of references pointing at this definition.
    pub reference_count: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FootnoteReferenceData {
    /// Label of the referenced definition.
    pub label: String,
    /// Number of the referenced definition, by order of first reference.
    pub ordinal: u32,
    /// 1-based index of this reference among references to the same definition.
    pub ref_index: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomData {
    pub on_enter: String,
    pub on_exit: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_node_has_type_defaults() {
        let header = Node::new(NodeType::Header);
        assert_eq!(header.data(), &NodeData::Header(HeaderData { level: 1 }));
        assert!(header.literal().is_none());

        let list = Node::new(NodeType::List);
        match list.data() {
            NodeData::List(list) => {
                assert_eq!(list.list_type, ListType::Bullet);
                assert_eq!(list.start, 0);
                assert!(!list.tight);
            }
            other => panic!("Expected List data, got {other:?}"),
        }
    }

    #[test]
    fn test_literal_types_start_empty() {
        let text = Node::new(NodeType::Text);
        assert_eq!(text.literal(), Some(""));

        let paragraph = Node::new(NodeType::Paragraph);
        assert_eq!(paragraph.literal(), None);
        assert_eq!(paragraph.data(), &NodeData::None);
    }

    #[test]
    fn test_image_shares_link_data() {
        let image = Node::new(NodeType::Image);
        assert!(matches!(image.data(), NodeData::Link(_)));
    }

    #[test]
    fn test_builder() {
        let node = Node::new(NodeType::Text)
            .with_literal("hello")
            .with_position(SourcePosition::from_lines(1, 1, 1, 5));

        assert_eq!(node.literal(), Some("hello"));
        assert_eq!(node.position().end_column(), 5);
    }

    #[test]
    fn test_delimiter_char() {
        assert_eq!(ListDelimiter::Period.as_char(), '.');
        assert_eq!(ListDelimiter::Paren.as_char(), ')');
    }

    #[test]
    fn test_data_serialization_is_tagged() {
        let data = NodeData::Header(HeaderData { level: 2 });
        let json = serde_json::to_value(&data).unwrap();
        assert_eq!(json["kind"], "header");
        assert_eq!(json["level"], 2);
    }
}
