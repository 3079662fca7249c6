//! JSON view of a subtree.

use serde::Serialize;
use serde::ser::{SerializeSeq, SerializeStruct};

use crate::{Arena, NodeData, NodeId};

/// Borrowed view of a node that serializes its whole subtree.
///
/// ```rust
/// use markly_ast::{Arena, NodeType};
///
/// let mut arena = Arena::new();
/// let doc = arena.new_node(NodeType::Document);
/// let json = serde_json::to_value(arena.view(doc)).unwrap();
/// assert_eq!(json["type"], "document");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct NodeView<'a> {
    arena: &'a Arena,
    id: NodeId,
}

impl<'a> NodeView<'a> {
    pub fn new(arena: &'a Arena, id: NodeId) -> Self {
        Self { arena, id }
    }
}

impl Serialize for NodeView<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let node = self.arena.get(self.id);
        let node_type = node.node_type();
        let has_data = !matches!(node.data(), NodeData::None);
        let has_children = !node_type.is_leaf();

        let mut len = 2; // type, sourcepos
        if has_data {
            len += 1;
        }
        if node.literal().is_some() {
            len += 1;
        }
        if has_children {
            len += 1;
        }

        let mut state = serializer.serialize_struct("Node", len)?;
        state.serialize_field("type", &node_type)?;
        state.serialize_field("sourcepos", &node.position().to_string())?;
        if has_data {
            state.serialize_field("data", node.data())?;
        }
        if let Some(literal) = node.literal() {
            state.serialize_field("literal", literal)?;
        }
        if has_children {
            state.serialize_field("children", &ChildrenView(*self))?;
        }
        state.end()
    }
}

struct ChildrenView<'a>(NodeView<'a>);

impl Serialize for ChildrenView<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let NodeView { arena, id } = self.0;
        let mut seq = serializer.serialize_seq(None)?;
        for child in arena.children(id) {
            seq.serialize_element(&NodeView::new(arena, child))?;
        }
        seq.end()
    }
}

impl Arena {
    /// Returns a serializable view of the subtree rooted at `id`.
    #[inline]
    pub fn view(&self, id: NodeId) -> NodeView<'_> {
        NodeView::new(self, id)
    }
}
