//! Parser trait definition.

use markly_ast::{Arena, NodeId};

use crate::ParseError;

/// Trait for turning source text into a document tree.
///
/// The tree is built in the caller's arena so that several documents can
/// share one arena and be grafted onto each other.
///
/// # Example
///
/// ```rust
/// use markly_ast::{Arena, NodeId, NodeType};
/// use markly_parser::{ParseError, Parser};
///
/// struct EmptyParser;
///
/// impl Parser for EmptyParser {
///     fn name(&self) -> &str {
///         "empty"
///     }
///
///     fn extensions(&self) -> &[&str] {
///         &["empty"]
///     }
///
///     fn parse(&self, arena: &mut Arena, _source: &str) -> Result<NodeId, ParseError> {
///         Ok(arena.new_node(NodeType::Document))
///     }
/// }
///
/// let mut arena = Arena::new();
/// let doc = EmptyParser.parse(&mut arena, "anything").unwrap();
/// assert_eq!(arena.node_type(doc), NodeType::Document);
/// ```
pub trait Parser {
    /// Returns the name of this parser.
    fn name(&self) -> &str;

    /// Returns the file extensions this parser handles, without the leading
    /// dot.
    fn extensions(&self) -> &[&str];

    /// Parses `source` into `arena` and returns the document node.
    fn parse(&self, arena: &mut Arena, source: &str) -> Result<NodeId, ParseError>;

    /// Returns true if this parser can handle the given file extension.
    fn can_parse(&self, extension: &str) -> bool {
        self.extensions()
            .iter()
            .any(|ext| ext.eq_ignore_ascii_case(extension))
    }
}
