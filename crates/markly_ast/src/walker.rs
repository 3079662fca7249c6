//! Tree traversal.
//!
//! - [`Traverse`] - enter/exit events in document order, the form renderers
//!   consume
//! - [`Walker`] - plain pre-order sequence of nodes, with subtree skipping
//!
//! Both borrow the arena immutably, so a tree cannot be mutated while a walk
//! over it is alive.
//!
//! # Example
//!
//! ```rust
//! use markly_ast::{Arena, NodeType, WalkEvent};
//!
//! let mut arena = Arena::new();
//! let doc = arena.new_node(NodeType::Document);
//! let para = arena.new_node(NodeType::Paragraph);
//! let text = arena.new_node(NodeType::Text);
//! arena.append_child(doc, para);
//! arena.append_child(para, text);
//!
//! let events: Vec<_> = arena.traverse(doc).collect();
//! assert_eq!(
//!     events,
//!     vec![
//!         WalkEvent::Enter(doc),
//!         WalkEvent::Enter(para),
//!         WalkEvent::Enter(text),
//!         WalkEvent::Exit(para),
//!         WalkEvent::Exit(doc),
//!     ]
//! );
//! ```

use crate::{Arena, NodeId};

/// A traversal event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WalkEvent {
    /// The walk reached the node before any of its children.
    Enter(NodeId),
    /// The walk finished the node's children. Never emitted for leaf types.
    Exit(NodeId),
}

impl WalkEvent {
    #[inline]
    pub fn node(&self) -> NodeId {
        match *self {
            WalkEvent::Enter(id) | WalkEvent::Exit(id) => id,
        }
    }

    #[inline]
    pub fn is_enter(&self) -> bool {
        matches!(self, WalkEvent::Enter(_))
    }
}

/// Enter/exit traversal of the subtree rooted at a node.
#[derive(Debug, Clone)]
pub struct Traverse<'a> {
    arena: &'a Arena,
    root: NodeId,
    next: Option<WalkEvent>,
}

impl<'a> Traverse<'a> {
    pub fn new(arena: &'a Arena, root: NodeId) -> Self {
        Self {
            arena,
            root,
            next: Some(WalkEvent::Enter(root)),
        }
    }

    /// The node the traversal started from.
    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Repositions the traversal so that `event` is the next item produced.
    pub fn reset_to(&mut self, event: WalkEvent) {
        self.next = Some(event);
    }

    /// Computes the event following `event`.
    fn successor(&self, event: WalkEvent) -> Option<WalkEvent> {
        let arena = self.arena;
        let node = match event {
            WalkEvent::Enter(node) if !arena.node_type(node).is_leaf() => {
                return Some(match arena.first_child(node) {
                    Some(child) => WalkEvent::Enter(child),
                    None => WalkEvent::Exit(node),
                });
            }
            WalkEvent::Enter(node) | WalkEvent::Exit(node) => node,
        };

        if node == self.root {
            return None;
        }
        match arena.next(node) {
            Some(next) => Some(WalkEvent::Enter(next)),
            None => arena.parent(node).map(WalkEvent::Exit),
        }
    }
}

impl Iterator for Traverse<'_> {
    type Item = WalkEvent;

    fn next(&mut self) -> Option<WalkEvent> {
        let current = self.next?;
        self.next = self.successor(current);
        Some(current)
    }
}

/// Lazy pre-order walk of a subtree, root first.
///
/// The walk can be restarted with [`Walker::reset`], and the descendants of
/// the most recently produced node can be skipped with
/// [`Walker::skip_subtree`].
#[derive(Debug, Clone)]
pub struct Walker<'a> {
    events: Traverse<'a>,
    last: Option<NodeId>,
}

impl<'a> Walker<'a> {
    pub fn new(arena: &'a Arena, root: NodeId) -> Self {
        Self {
            events: Traverse::new(arena, root),
            last: None,
        }
    }

    /// Skips the descendants of the node returned by the last call to
    /// `next`. The walk continues with that node's following sibling.
    pub fn skip_subtree(&mut self) {
        let Some(last) = self.last else {
            return;
        };
        if !self.events.arena.node_type(last).is_leaf() {
            self.events.reset_to(WalkEvent::Exit(last));
        }
    }

    /// Restarts the walk from its root.
    pub fn reset(&mut self) {
        let root = self.events.root;
        self.events.reset_to(WalkEvent::Enter(root));
        self.last = None;
    }
}

impl Iterator for Walker<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let node = self.events.find_map(|event| match event {
            WalkEvent::Enter(node) => Some(node),
            WalkEvent::Exit(_) => None,
        });
        self.last = node;
        node
    }
}

impl Arena {
    /// Enter/exit events over the subtree rooted at `root`.
    #[inline]
    pub fn traverse(&self, root: NodeId) -> Traverse<'_> {
        Traverse::new(self, root)
    }

    /// Pre-order walk over the subtree rooted at `root`.
    #[inline]
    pub fn walk(&self, root: NodeId) -> Walker<'_> {
        Walker::new(self, root)
    }

    /// Iterates over the strict descendants of `root` in pre-order.
    pub fn descendants(&self, root: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.walk(root).skip(1)
    }
}
