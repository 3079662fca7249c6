//! Parsed documents.

use markly_ast::{Arena, NodeId, NodeView};
use markly_parser::{MarkdownParser, ParseOptions, Parser};
use markly_render::{
    CommonMarkRenderer, Heading, Headings, HtmlRenderer, PlaintextRenderer, Render, RenderOptions,
};
use tracing::debug;

use crate::Result;

/// A parsed document together with the arena that holds its nodes.
///
/// Fragments parsed with [`Document::parse_fragment`] and subtrees brought
/// in with [`Document::import`] land in the same arena, so they can be
/// grafted into the document with the [`Arena`] mutation methods.
#[derive(Debug, Clone)]
pub struct Document {
    arena: Arena,
    root: NodeId,
    options: ParseOptions,
}

impl Document {
    /// Parses `text` into a new document.
    pub fn parse(text: &str, options: &ParseOptions) -> Result<Self> {
        let mut arena = Arena::new();
        let root = MarkdownParser::with_options(*options).parse(&mut arena, text)?;
        debug!("Parsed document with {} nodes", arena.len());
        Ok(Self {
            arena,
            root,
            options: *options,
        })
    }

    /// Returns the document node.
    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    pub fn arena_mut(&mut self) -> &mut Arena {
        &mut self.arena
    }

    /// Returns the options the document was parsed with.
    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Parses `text` with this document's options into this document's
    /// arena and returns the fragment's own document node.
    ///
    /// The fragment is not attached; use [`Arena::append_before`] or
    /// [`Arena::append_after`] to move its children into place.
    pub fn parse_fragment(&mut self, text: &str) -> Result<NodeId> {
        let fragment = MarkdownParser::with_options(self.options).parse(&mut self.arena, text)?;
        Ok(fragment)
    }

    /// Copies `node` and its subtree from `other` into this document's
    /// arena. The copy is detached.
    pub fn import(&mut self, other: &Document, node: NodeId) -> NodeId {
        self.arena.import(&other.arena, node)
    }

    /// Renders the whole document with `renderer`.
    pub fn render(&self, renderer: &impl Render) -> String {
        renderer.render(&self.arena, self.root)
    }

    /// Renders the subtree rooted at `node` with `renderer`.
    pub fn render_node(&self, node: NodeId, renderer: &impl Render) -> String {
        renderer.render(&self.arena, node)
    }

    pub fn to_html(&self, options: &RenderOptions) -> String {
        self.render(&HtmlRenderer::with_options(*options))
    }

    pub fn to_commonmark(&self, options: &RenderOptions) -> String {
        self.render(&CommonMarkRenderer::with_options(*options))
    }

    pub fn to_plaintext(&self, options: &RenderOptions) -> String {
        self.render(&PlaintextRenderer::with_options(*options))
    }

    /// Lists the headings whose level lies in `min_level..=max_level`, with
    /// anchors numbered the way the HTML `ids` sections number them.
    pub fn headings(&self, min_level: u8, max_level: u8) -> Vec<Heading> {
        Headings::extract_from(&self.arena, self.root, min_level, max_level)
    }

    /// Finds the first header whose flattened text is `text`.
    pub fn find_header(&self, text: &str) -> Option<NodeId> {
        self.arena.find_header(self.root, text)
    }

    /// Returns a serializable view of the whole tree.
    pub fn view(&self) -> NodeView<'_> {
        self.arena.view(self.root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use markly_ast::NodeType;
    use pretty_assertions::assert_eq;

    fn document(text: &str) -> Document {
        Document::parse(text, &ParseOptions::default()).unwrap()
    }

    #[test]
    fn test_parse_and_render() {
        let doc = document("Hi *there*");

        assert_eq!(doc.to_html(&RenderOptions::default()), "<p>Hi <em>there</em></p>\n");
        assert_eq!(doc.to_commonmark(&RenderOptions::default()), "Hi *there*\n");
        assert_eq!(doc.to_plaintext(&RenderOptions::default()), "Hi there\n");
    }

    #[test]
    fn test_fragment_shares_the_arena() {
        let mut doc = document("# Hello\n\nWorld\n");
        let fragment = doc.parse_fragment("Goodbye").unwrap();
        let header = doc.find_header("Hello").unwrap();

        assert_eq!(doc.arena().node_type(fragment), NodeType::Document);
        assert!(doc.arena_mut().append_after(header, fragment));
        assert_eq!(
            doc.to_html(&RenderOptions::default()),
            "<h1>Hello</h1>\n<p>Goodbye</p>\n<p>World</p>\n"
        );
    }

    #[test]
    fn test_import_from_other_document() {
        let mut doc = document("First\n");
        let other = document("Second\n");
        let para = other.arena().first_child(other.root()).unwrap();

        let copy = doc.import(&other, para);
        let root = doc.root();
        assert!(doc.arena_mut().append_child(root, copy));

        assert_eq!(
            doc.to_html(&RenderOptions::default()),
            "<p>First</p>\n<p>Second</p>\n"
        );
        assert_eq!(
            other.to_html(&RenderOptions::default()),
            "<p>Second</p>\n"
        );
    }

    #[test]
    fn test_render_node() {
        let doc = document("# Title\n\nBody\n");
        let header = doc.find_header("Title").unwrap();

        assert_eq!(doc.render_node(header, &HtmlRenderer::new()), "<h1>Title</h1>\n");
    }
}
