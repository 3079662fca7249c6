//! Node arena.
//!
//! Every node lives in an [`Arena`] and is addressed by a copyable [`NodeId`].
//! Tree links are stored as identifiers, so parents and siblings can be
//! reached from any node without owning back-references. Several documents
//! may share one arena, which is what allows nodes to be moved between them.
//!
//! Detached nodes are never reclaimed; they stay in storage until the arena
//! is dropped.
//!
//! # Example
//!
//! ```rust
//! use markly_ast::{Arena, NodeType};
//!
//! let mut arena = Arena::new();
//! let doc = arena.new_node(NodeType::Document);
//! let para = arena.new_node(NodeType::Paragraph);
//!
//! assert!(arena.append_child(doc, para));
//! assert_eq!(arena.parent(para), Some(doc));
//! assert_eq!(arena.children(doc).collect::<Vec<_>>(), vec![para]);
//! ```

use crate::node::Links;
use crate::{Node, NodeType};

/// Identifier of a node inside an [`Arena`].
///
/// Identifiers are only meaningful for the arena that issued them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Storage for the nodes of one or more documents.
#[derive(Debug, Clone, Default)]
pub struct Arena {
    nodes: Vec<Node>,
}

impl Arena {
    /// Creates an empty arena.
    #[inline]
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Creates an empty arena with room for `capacity` nodes.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
        }
    }

    /// Number of nodes ever allocated, including detached ones.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Moves a node into the arena. Any links it carries are discarded.
    pub fn alloc(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        let mut node = node;
        node.links = Links::default();
        self.nodes.push(node);
        id
    }

    /// Creates a detached node of `node_type` with default attributes.
    #[inline]
    pub fn new_node(&mut self, node_type: NodeType) -> NodeId {
        self.alloc(Node::new(node_type))
    }

    /// Returns the node stored under `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` was issued by a different arena holding fewer nodes.
    #[inline]
    pub fn get(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.index()]
    }

    #[inline]
    pub(crate) fn links(&self, id: NodeId) -> Links {
        self.nodes[id.index()].links
    }

    #[inline]
    pub(crate) fn links_mut(&mut self, id: NodeId) -> &mut Links {
        &mut self.nodes[id.index()].links
    }

    #[inline]
    pub fn node_type(&self, id: NodeId) -> NodeType {
        self.get(id).node_type
    }

    #[inline]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.links(id).parent
    }

    #[inline]
    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.links(id).first_child
    }

    #[inline]
    pub fn last_child(&self, id: NodeId) -> Option<NodeId> {
        self.links(id).last_child
    }

    #[inline]
    pub fn previous(&self, id: NodeId) -> Option<NodeId> {
        self.links(id).prev
    }

    #[inline]
    pub fn next(&self, id: NodeId) -> Option<NodeId> {
        self.links(id).next
    }

    /// Iterates over the direct children of `id`, first to last.
    pub fn children(&self, id: NodeId) -> Children<'_> {
        Children {
            arena: self,
            next: self.first_child(id),
        }
    }

    /// Iterates over `id` and its ancestors, innermost first.
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            arena: self,
            next: Some(id),
        }
    }

    /// Returns true if `ancestor` is `id` or one of its ancestors.
    pub fn is_ancestor_or_self(&self, ancestor: NodeId, id: NodeId) -> bool {
        self.ancestors(id).any(|node| node == ancestor)
    }

    /// Returns the root of the tree containing `id`.
    pub fn root(&self, id: NodeId) -> NodeId {
        self.ancestors(id).last().unwrap_or(id)
    }

    /// Detaches `id` and its subtree from its parent and siblings.
    ///
    /// Unlinking a node without a parent is a no-op.
    pub fn unlink(&mut self, id: NodeId) {
        let Links { parent, prev, next, .. } = self.links(id);

        if let Some(prev) = prev {
            self.links_mut(prev).next = next;
        } else if let Some(parent) = parent {
            self.links_mut(parent).first_child = next;
        }

        if let Some(next) = next {
            self.links_mut(next).prev = prev;
        } else if let Some(parent) = parent {
            self.links_mut(parent).last_child = prev;
        }

        let links = self.links_mut(id);
        links.parent = None;
        links.prev = None;
        links.next = None;
    }

    /// Deep-copies `id` and its subtree. The copy is detached and shares no
    /// storage with the original.
    pub fn dup(&mut self, id: NodeId) -> NodeId {
        let node = self.get(id).detached_copy();
        let copy = self.alloc(node);
        let children: Vec<NodeId> = self.children(id).collect();
        for child in children {
            let child_copy = self.dup(child);
            self.link_last(copy, child_copy);
        }
        copy
    }

    /// Deep-copies a subtree from another arena into this one.
    pub fn import(&mut self, other: &Arena, id: NodeId) -> NodeId {
        let copy = self.alloc(other.get(id).detached_copy());
        for child in other.children(id) {
            let child_copy = self.import(other, child);
            self.link_last(copy, child_copy);
        }
        copy
    }

    /// Links a detached `child` as the last child of `parent` without any
    /// containment check.
    pub(crate) fn link_last(&mut self, parent: NodeId, child: NodeId) {
        let last = self.last_child(parent);
        {
            let links = self.links_mut(child);
            links.parent = Some(parent);
            links.prev = last;
            links.next = None;
        }
        match last {
            Some(last) => self.links_mut(last).next = Some(child),
            None => self.links_mut(parent).first_child = Some(child),
        }
        self.links_mut(parent).last_child = Some(child);
    }

    /// Links a detached `child` as the first child of `parent` without any
    /// containment check.
    pub(crate) fn link_first(&mut self, parent: NodeId, child: NodeId) {
        let first = self.first_child(parent);
        {
            let links = self.links_mut(child);
            links.parent = Some(parent);
            links.prev = None;
            links.next = first;
        }
        match first {
            Some(first) => self.links_mut(first).prev = Some(child),
            None => self.links_mut(parent).last_child = Some(child),
        }
        self.links_mut(parent).first_child = Some(child);
    }

    /// Links a detached `node` immediately before `target`, which must have a
    /// parent.
    pub(crate) fn link_before(&mut self, target: NodeId, node: NodeId) {
        let Links { parent, prev, .. } = self.links(target);
        {
            let links = self.links_mut(node);
            links.parent = parent;
            links.prev = prev;
            links.next = Some(target);
        }
        self.links_mut(target).prev = Some(node);
        match prev {
            Some(prev) => self.links_mut(prev).next = Some(node),
            None => {
                if let Some(parent) = parent {
                    self.links_mut(parent).first_child = Some(node);
                }
            }
        }
    }

    /// Links a detached `node` immediately after `target`, which must have a
    /// parent.
    pub(crate) fn link_after(&mut self, target: NodeId, node: NodeId) {
        let Links { parent, next, .. } = self.links(target);
        {
            let links = self.links_mut(node);
            links.parent = parent;
            links.prev = Some(target);
            links.next = next;
        }
        self.links_mut(target).next = Some(node);
        match next {
            Some(next) => self.links_mut(next).prev = Some(node),
            None => {
                if let Some(parent) = parent {
                    self.links_mut(parent).last_child = Some(node);
                }
            }
        }
    }
}

/// Iterator over the children of a node.
#[derive(Debug, Clone)]
pub struct Children<'a> {
    arena: &'a Arena,
    next: Option<NodeId>,
}

impl Iterator for Children<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.arena.next(current);
        Some(current)
    }
}

/// Iterator over a node and its ancestors.
#[derive(Debug, Clone)]
pub struct Ancestors<'a> {
    arena: &'a Arena,
    next: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.arena.parent(current);
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NodeData;
    use pretty_assertions::assert_eq;

    fn doc_with_paragraphs(arena: &mut Arena, count: usize) -> (NodeId, Vec<NodeId>) {
        let doc = arena.new_node(NodeType::Document);
        let paras: Vec<NodeId> = (0..count)
            .map(|_| {
                let para = arena.new_node(NodeType::Paragraph);
                arena.link_last(doc, para);
                para
            })
            .collect();
        (doc, paras)
    }

    #[test]
    fn test_new_node_is_detached() {
        let mut arena = Arena::new();
        let node = arena.new_node(NodeType::Paragraph);

        assert_eq!(arena.parent(node), None);
        assert_eq!(arena.first_child(node), None);
        assert_eq!(arena.previous(node), None);
        assert_eq!(arena.next(node), None);
        assert_eq!(arena.len(), 1);
    }

    #[test]
    fn test_children_in_order() {
        let mut arena = Arena::new();
        let (doc, paras) = doc_with_paragraphs(&mut arena, 3);

        assert_eq!(arena.children(doc).collect::<Vec<_>>(), paras);
        assert_eq!(arena.first_child(doc), Some(paras[0]));
        assert_eq!(arena.last_child(doc), Some(paras[2]));
        assert_eq!(arena.next(paras[0]), Some(paras[1]));
        assert_eq!(arena.previous(paras[2]), Some(paras[1]));
    }

    #[test]
    fn test_unlink_middle() {
        let mut arena = Arena::new();
        let (doc, paras) = doc_with_paragraphs(&mut arena, 3);

        arena.unlink(paras[1]);

        assert_eq!(arena.children(doc).collect::<Vec<_>>(), vec![paras[0], paras[2]]);
        assert_eq!(arena.next(paras[0]), Some(paras[2]));
        assert_eq!(arena.previous(paras[2]), Some(paras[0]));
        assert_eq!(arena.parent(paras[1]), None);
        assert_eq!(arena.next(paras[1]), None);
    }

    #[test]
    fn test_unlink_only_child() {
        let mut arena = Arena::new();
        let (doc, paras) = doc_with_paragraphs(&mut arena, 1);

        arena.unlink(paras[0]);

        assert_eq!(arena.first_child(doc), None);
        assert_eq!(arena.last_child(doc), None);
    }

    #[test]
    fn test_unlink_root_is_noop() {
        let mut arena = Arena::new();
        let (doc, _) = doc_with_paragraphs(&mut arena, 2);

        arena.unlink(doc);
        assert_eq!(arena.children(doc).count(), 2);
    }

    #[test]
    fn test_dup_is_deep_and_detached() {
        let mut arena = Arena::new();
        let (doc, paras) = doc_with_paragraphs(&mut arena, 1);
        let text = arena.alloc(Node::new(NodeType::Text).with_literal("hi"));
        arena.link_last(paras[0], text);

        let copy = arena.dup(paras[0]);

        assert_ne!(copy, paras[0]);
        assert_eq!(arena.parent(copy), None);
        let copied_text = arena.first_child(copy).unwrap();
        assert_ne!(copied_text, text);
        assert_eq!(arena.get(copied_text).literal(), Some("hi"));
        assert_eq!(arena.parent(copied_text), Some(copy));
        assert_eq!(arena.children(doc).count(), 1);
    }

    #[test]
    fn test_import_from_other_arena() {
        let mut source = Arena::new();
        let (doc, paras) = doc_with_paragraphs(&mut source, 2);
        let header = source.alloc(
            Node::new(NodeType::Header).with_data(NodeData::Header(crate::HeaderData { level: 3 })),
        );
        source.link_last(paras[1], header);

        let mut target = Arena::new();
        target.new_node(NodeType::Document);
        let imported = target.import(&source, doc);

        let children: Vec<_> = target.children(imported).collect();
        assert_eq!(children.len(), 2);
        let nested = target.first_child(children[1]).unwrap();
        assert_eq!(target.node_type(nested), NodeType::Header);
        assert_eq!(target.get(nested).data(), source.get(header).data());
    }

    #[test]
    fn test_ancestors_and_root() {
        let mut arena = Arena::new();
        let (doc, paras) = doc_with_paragraphs(&mut arena, 1);
        let emph = arena.new_node(NodeType::Emph);
        arena.link_last(paras[0], emph);

        assert_eq!(arena.ancestors(emph).collect::<Vec<_>>(), vec![emph, paras[0], doc]);
        assert_eq!(arena.root(emph), doc);
        assert!(arena.is_ancestor_or_self(doc, emph));
        assert!(!arena.is_ancestor_or_self(emph, doc));
    }

    #[test]
    fn test_link_first_and_around() {
        let mut arena = Arena::new();
        let (doc, paras) = doc_with_paragraphs(&mut arena, 1);

        let first = arena.new_node(NodeType::ThematicBreak);
        arena.link_first(doc, first);
        let before = arena.new_node(NodeType::Html);
        arena.link_before(paras[0], before);
        let after = arena.new_node(NodeType::CodeBlock);
        arena.link_after(paras[0], after);

        assert_eq!(
            arena.children(doc).collect::<Vec<_>>(),
            vec![first, before, paras[0], after]
        );
        assert_eq!(arena.last_child(doc), Some(after));
    }
}
