//! Renderer trait definition.

use markly_ast::{Arena, NodeId};

use crate::RenderOptions;

/// Trait for turning a document tree into text.
///
/// Rendering never fails and never mutates the tree. Any node can be the
/// root; rendering a subtree produces the same text it contributes to the
/// whole document.
///
/// # Example
///
/// ```rust
/// use markly_ast::{Arena, NodeId, NodeType};
/// use markly_render::{Render, RenderOptions};
///
/// struct TypeNames(RenderOptions);
///
/// impl Render for TypeNames {
///     fn name(&self) -> &str {
///         "types"
///     }
///
///     fn options(&self) -> &RenderOptions {
///         &self.0
///     }
///
///     fn render(&self, arena: &Arena, root: NodeId) -> String {
///         arena
///             .walk(root)
///             .map(|node| arena.node_type(node).as_str())
///             .collect::<Vec<_>>()
///             .join(" ")
///     }
/// }
///
/// let mut arena = Arena::new();
/// let doc = arena.new_node(NodeType::Document);
/// let rule = arena.new_node(NodeType::ThematicBreak);
/// arena.append_child(doc, rule);
///
/// let renderer = TypeNames(RenderOptions::default());
/// assert_eq!(renderer.render(&arena, doc), "document thematic_break");
/// ```
pub trait Render {
    /// Returns the name of the output format.
    fn name(&self) -> &str;

    fn options(&self) -> &RenderOptions;

    /// Renders the subtree rooted at `root`.
    fn render(&self, arena: &Arena, root: NodeId) -> String;
}
