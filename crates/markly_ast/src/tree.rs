//! Structural mutation.
//!
//! Every operation here checks the containment rules of [`NodeType::can_contain`]
//! before touching the tree and reports a violation by returning `false`, in
//! which case the tree is left exactly as it was.

use tracing::debug;

use crate::{Arena, NodeId, NodeType};

impl Arena {
    /// Returns true if `node` may be linked under `parent`.
    fn can_attach(&self, parent: NodeId, node: NodeId) -> bool {
        let parent_type = self.node_type(parent);
        let node_type = self.node_type(node);
        if !parent_type.can_contain(node_type) {
            debug!("{parent_type} cannot contain {node_type}");
            return false;
        }
        if self.is_ancestor_or_self(node, parent) {
            debug!("refusing to attach {node} under its own descendant {parent}");
            return false;
        }
        true
    }

    /// Inserts `node` as the previous sibling of `target`.
    ///
    /// Returns false if `target` has no parent, or if the parent cannot hold
    /// `node`.
    pub fn insert_before(&mut self, target: NodeId, node: NodeId) -> bool {
        let Some(parent) = self.parent(target) else {
            debug!("insert_before: {target} has no parent");
            return false;
        };
        if target == node || !self.can_attach(parent, node) {
            return false;
        }
        self.unlink(node);
        self.link_before(target, node);
        true
    }

    /// Inserts `node` as the next sibling of `target`.
    ///
    /// Returns false if `target` has no parent, or if the parent cannot hold
    /// `node`.
    pub fn insert_after(&mut self, target: NodeId, node: NodeId) -> bool {
        let Some(parent) = self.parent(target) else {
            debug!("insert_after: {target} has no parent");
            return false;
        };
        if target == node || !self.can_attach(parent, node) {
            return false;
        }
        self.unlink(node);
        self.link_after(target, node);
        true
    }

    /// Makes `child` the first child of `parent`.
    pub fn prepend_child(&mut self, parent: NodeId, child: NodeId) -> bool {
        if !self.can_attach(parent, child) {
            return false;
        }
        self.unlink(child);
        self.link_first(parent, child);
        true
    }

    /// Makes `child` the last child of `parent`.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> bool {
        if !self.can_attach(parent, child) {
            return false;
        }
        self.unlink(child);
        self.link_last(parent, child);
        true
    }

    /// Moves every child of `node` into a new fragment node and returns it.
    ///
    /// The fragment is a `custom_inline` when the children are all inline (or
    /// there are none) and a `custom_block` otherwise. `node` is left without
    /// children.
    pub fn extract_children(&mut self, node: NodeId) -> NodeId {
        let children: Vec<NodeId> = self.children(node).collect();
        let fragment_type = if children.iter().all(|&c| self.node_type(c).is_inline()) {
            NodeType::CustomInline
        } else {
            NodeType::CustomBlock
        };

        let fragment = self.new_node(fragment_type);
        for child in children {
            self.unlink(child);
            self.link_last(fragment, child);
        }
        fragment
    }

    /// Moves the top-level children of `subtree` in front of `node`, keeping
    /// their order.
    ///
    /// Nothing is moved unless every child can be placed.
    pub fn append_before(&mut self, node: NodeId, subtree: NodeId) -> bool {
        let Some(children) = self.graftable_children(node, subtree) else {
            return false;
        };
        for child in children {
            self.unlink(child);
            self.link_before(node, child);
        }
        true
    }

    /// Moves the top-level children of `subtree` after `node`, keeping their
    /// order.
    ///
    /// Nothing is moved unless every child can be placed.
    pub fn append_after(&mut self, node: NodeId, subtree: NodeId) -> bool {
        let Some(children) = self.graftable_children(node, subtree) else {
            return false;
        };
        let mut anchor = node;
        for child in children {
            self.unlink(child);
            self.link_after(anchor, child);
            anchor = child;
        }
        true
    }

    fn graftable_children(&self, node: NodeId, subtree: NodeId) -> Option<Vec<NodeId>> {
        let Some(parent) = self.parent(node) else {
            debug!("cannot graft next to {node}: it has no parent");
            return None;
        };
        if self.is_ancestor_or_self(subtree, node) {
            debug!("cannot graft {subtree} next to its own descendant {node}");
            return None;
        }
        let children: Vec<NodeId> = self.children(subtree).collect();
        children
            .iter()
            .all(|&child| self.can_attach(parent, child))
            .then_some(children)
    }

    /// Replaces the section introduced by `header` with `new_header`.
    ///
    /// The section runs from `header` up to, but excluding, the next sibling
    /// header of the same or a higher level. Subsections (the part of the run
    /// from its first deeper header onwards) are moved after `new_header`
    /// unless `remove_subsections` is set, in which case they are dropped
    /// together with the rest of the section.
    pub fn replace_section(
        &mut self,
        header: NodeId,
        new_header: NodeId,
        remove_subsections: bool,
    ) -> bool {
        let Some(level) = self.header_level(header) else {
            debug!("replace_section: {header} is not a header");
            return false;
        };
        if self.parent(header).is_none() {
            debug!("replace_section: {header} has no parent");
            return false;
        }

        let mut run = Vec::new();
        let mut cursor = self.next(header);
        while let Some(sibling) = cursor {
            if self.header_level(sibling).is_some_and(|l| l <= level) {
                break;
            }
            run.push(sibling);
            cursor = self.next(sibling);
        }

        let keep_from = if remove_subsections {
            run.len()
        } else {
            run.iter()
                .position(|&n| self.header_level(n).is_some())
                .unwrap_or(run.len())
        };

        if !self.insert_before(header, new_header) {
            return false;
        }
        self.unlink(header);

        let (dropped, kept) = run.split_at(keep_from);
        for &node in dropped {
            self.unlink(node);
        }
        // The kept subsections already follow new_header once the rest of
        // the run is gone.
        debug_assert!(kept.is_empty() || self.next(new_header) == kept.first().copied());
        true
    }
}
