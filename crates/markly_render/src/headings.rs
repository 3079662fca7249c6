//! Heading extraction with collision-free anchors.

use std::collections::HashMap;

use markly_ast::{Arena, NodeId};

use crate::slug::base_anchor;

/// A heading found by [`Headings::extract`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heading {
    pub node: NodeId,
    pub level: u8,
    /// Flattened heading text.
    pub text: String,
    /// Anchor, unique among the anchors issued by the same [`Headings`].
    pub anchor: String,
}

/// Issues heading anchors, numbering repeated slugs.
///
/// The first heading with a given slug gets the bare slug; later ones get
/// `slug-2`, `slug-3` and so on. The counters live as long as the instance,
/// so anchors stay unique across several calls.
#[derive(Debug, Clone, Default)]
pub struct Headings {
    ids: HashMap<String, usize>,
}

impl Headings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the anchor for the header `node`.
    pub fn anchor_for(&mut self, arena: &Arena, node: NodeId) -> String {
        self.anchor_for_text(&arena.text_content(node))
    }

    /// Returns the anchor for a heading whose flattened text is `text`.
    pub fn anchor_for_text(&mut self, text: &str) -> String {
        let base = base_anchor(text);
        let count = self.ids.entry(base.clone()).or_insert(0);
        *count += 1;
        if *count == 1 {
            base
        } else {
            format!("{base}-{count}")
        }
    }

    /// Collects the headers under `root` whose level lies in
    /// `min_level..=max_level`, in document order.
    pub fn extract(
        &mut self,
        arena: &Arena,
        root: NodeId,
        min_level: u8,
        max_level: u8,
    ) -> Vec<Heading> {
        arena
            .walk(root)
            .filter_map(|node| {
                let level = arena.header_level(node)?;
                (min_level..=max_level).contains(&level).then_some((node, level))
            })
            .map(|(node, level)| {
                let text = arena.text_content(node);
                let anchor = self.anchor_for_text(&text);
                Heading {
                    node,
                    level,
                    text,
                    anchor,
                }
            })
            .collect()
    }

    /// [`Headings::extract`] with a fresh set of counters.
    pub fn extract_from(arena: &Arena, root: NodeId, min_level: u8, max_level: u8) -> Vec<Heading> {
        Self::new().extract(arena, root, min_level, max_level)
    }
}
