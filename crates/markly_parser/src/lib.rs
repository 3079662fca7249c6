//! # markly_parser
//!
//! Parser layer for markly.
//!
//! This crate provides:
//! - A `Parser` trait for building document trees from source text
//! - `MarkdownParser`, an adapter over `markdown-rs` that normalises its
//!   mdast output to the cmark-gfm tree shape
//! - `ParseOptions`, including smart punctuation and footnotes
//!
//! ## Example
//!
//! ```rust
//! use markly_ast::{Arena, NodeType};
//! use markly_parser::{MarkdownParser, ParseOptions, Parser};
//!
//! let mut arena = Arena::new();
//! let parser = MarkdownParser::with_options(ParseOptions::gfm());
//! let source = "# Hello\n\nThis is a paragraph.";
//!
//! let doc = parser.parse(&mut arena, source).unwrap();
//! assert_eq!(arena.node_type(doc), NodeType::Document);
//! ```

mod error;
mod footnotes;
mod markdown;
mod options;
mod smart;
mod traits;

pub use error::ParseError;
pub use markdown::MarkdownParser;
pub use options::ParseOptions;
pub use traits::Parser;
