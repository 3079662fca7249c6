//! # markly_render
//!
//! Renderers for markly document trees.
//!
//! Every renderer produces the same bytes cmark-gfm produces for an
//! equivalent tree:
//!
//! - [`HtmlRenderer`] - HTML, with GFM tables, task lists, footnotes and
//!   optional heading sections
//! - [`CommonMarkRenderer`] - Markdown that parses back to the same tree
//! - [`PlaintextRenderer`] - text with block layout but no markup
//!
//! [`Headings`] lists a document's headings with collision-free anchors;
//! the HTML renderer uses the same anchors for its `ids` sections.
//!
//! ## Architecture
//!
//! Renderers consume the enter/exit events of
//! [`Arena::traverse`](markly_ast::Arena::traverse) and match exhaustively on
//! the node type. The Markdown and plaintext renderers share a line writer
//! that handles line prefixes, deferred blank lines and wrapping.
//!
//! ## Example
//!
//! ```rust
//! use markly_ast::{Arena, Node, NodeType};
//! use markly_render::{HtmlRenderer, Render};
//!
//! let mut arena = Arena::new();
//! let doc = arena.new_node(NodeType::Document);
//! let para = arena.new_node(NodeType::Paragraph);
//! let text = arena.alloc(Node::new(NodeType::Text).with_literal("Hi & bye"));
//! arena.append_child(doc, para);
//! arena.append_child(para, text);
//!
//! assert_eq!(HtmlRenderer::new().render(&arena, doc), "<p>Hi &amp; bye</p>\n");
//! ```

mod commonmark;
mod escape;
mod headings;
mod html;
mod options;
mod plaintext;
pub mod slug;
mod traits;
mod writer;

pub use commonmark::CommonMarkRenderer;
pub use headings::{Heading, Headings};
pub use html::HtmlRenderer;
pub use options::RenderOptions;
pub use plaintext::PlaintextRenderer;
pub use traits::Render;
