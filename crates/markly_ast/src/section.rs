//! Text flattening and header lookup.

use crate::{Arena, NodeData, NodeId, NodeType};

impl Arena {
    /// Flattens the subtree under `id` into plain text.
    ///
    /// Text and code spans contribute their literal, line breaks become
    /// `\n` and footnote references become `[^n]`. Raw HTML and markup are
    /// dropped.
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        for node in self.walk(id) {
            match self.node_type(node) {
                NodeType::Text | NodeType::Code => {
                    out.push_str(self.literal(node).unwrap_or_default());
                }
                NodeType::SoftBreak | NodeType::LineBreak => out.push('\n'),
                NodeType::FootnoteReference => {
                    if let NodeData::FootnoteReference(reference) = self.data(node) {
                        out.push_str(&format!("[^{}]", reference.ordinal));
                    }
                }
                _ => {}
            }
        }
        out
    }

    /// Returns the first header under `root`, in document order, whose
    /// flattened text equals `text`.
    pub fn find_header(&self, root: NodeId, text: &str) -> Option<NodeId> {
        self.walk(root)
            .find(|&node| self.is_header(node) && self.text_content(node) == text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FootnoteReferenceData, HeaderData, Node};

    fn heading(arena: &mut Arena, parent: NodeId, level: u8, parts: &[(NodeType, &str)]) -> NodeId {
        let header = arena
            .alloc(Node::new(NodeType::Header).with_data(NodeData::Header(HeaderData { level })));
        arena.append_child(parent, header);
        for &(ty, literal) in parts {
            let node = arena.alloc(Node::new(ty).with_literal(literal));
            arena.append_child(header, node);
        }
        header
    }

    #[test]
    fn test_text_content_flattens_markup() {
        let mut arena = Arena::new();
        let para = arena.new_node(NodeType::Paragraph);
        let text = arena.alloc(Node::new(NodeType::Text).with_literal("Hi "));
        let strong = arena.new_node(NodeType::Strong);
        let inner = arena.alloc(Node::new(NodeType::Text).with_literal("there"));
        let brk = arena.new_node(NodeType::SoftBreak);
        let html = arena.alloc(Node::new(NodeType::HtmlInline).with_literal("<b>"));
        let code = arena.alloc(Node::new(NodeType::Code).with_literal("x"));
        arena.append_child(para, text);
        arena.append_child(para, strong);
        arena.append_child(strong, inner);
        arena.append_child(para, brk);
        arena.append_child(para, html);
        arena.append_child(para, code);

        assert_eq!(arena.text_content(para), "Hi there\nx");
    }

    #[test]
    fn test_text_content_footnote_reference() {
        let mut arena = Arena::new();
        let para = arena.new_node(NodeType::Paragraph);
        let text = arena.alloc(Node::new(NodeType::Text).with_literal("See"));
        let reference = arena.alloc(Node::new(NodeType::FootnoteReference).with_data(
            NodeData::FootnoteReference(FootnoteReferenceData {
                label: "note".into(),
                ordinal: 2,
                ref_index: 1,
            }),
        ));
        arena.append_child(para, text);
        arena.append_child(para, reference);

        assert_eq!(arena.text_content(para), "See[^2]");
    }

    #[test]
    fn test_find_header() {
        let mut arena = Arena::new();
        let doc = arena.new_node(NodeType::Document);
        heading(&mut arena, doc, 1, &[(NodeType::Text, "Intro")]);
        let target = heading(
            &mut arena,
            doc,
            2,
            &[(NodeType::Text, "Hello "), (NodeType::Code, "World")],
        );
        heading(&mut arena, doc, 3, &[(NodeType::Text, "Hello World")]);

        assert_eq!(arena.find_header(doc, "Hello World"), Some(target));
        assert_eq!(arena.find_header(doc, "hello world"), None);
        assert_eq!(arena.find_header(doc, "Missing"), None);
    }
}
