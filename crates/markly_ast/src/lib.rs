//! # markly_ast
//!
//! Markdown document tree for markly.
//!
//! This crate provides the mutable document model shared by the parser and
//! the renderers. Its node kinds and attributes follow the cmark-gfm
//! document model, so trees built here render exactly like cmark-gfm output.
//!
//! ## Architecture
//!
//! - All nodes live in an [`Arena`] and are addressed by [`NodeId`]
//! - Parent, child and sibling links are identifiers, not references
//! - Structural mutations validate containment and return `false` on failure
//! - Attribute setters validate their domain and return [`AttributeError`]
//!
//! ## Example
//!
//! ```rust
//! use markly_ast::{Arena, Node, NodeType};
//!
//! let mut arena = Arena::new();
//! let doc = arena.new_node(NodeType::Document);
//! let header = arena.new_node(NodeType::Header);
//! let text = arena.alloc(Node::new(NodeType::Text).with_literal("Install"));
//!
//! assert!(arena.append_child(doc, header));
//! assert!(arena.append_child(header, text));
//! arena.set_header_level(header, 2).unwrap();
//!
//! assert_eq!(arena.find_header(doc, "Install"), Some(header));
//! ```

mod arena;
mod attrs;
mod error;
mod extensions;
mod node;
mod node_type;
mod section;
mod span;
mod tree;
mod view;
pub mod walker;

pub use arena::{Ancestors, Arena, Children, NodeId};
pub use attrs::MAX_LIST_START;
pub use error::AttributeError;
pub use extensions::{Extension, Extensions};
pub use node::{
    Alignment, CodeBlockData, CustomData, FootnoteDefinitionData, FootnoteReferenceData,
    HeaderData, ItemData, LinkData, ListData, ListDelimiter, ListType, Node, NodeData, TableData,
    TableRowData,
};
pub use node_type::NodeType;
pub use span::{Position, SourcePosition};
pub use view::NodeView;
pub use walker::{Traverse, WalkEvent, Walker};
