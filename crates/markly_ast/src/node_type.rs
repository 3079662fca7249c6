//! Node type definitions.
//!
//! The set of node kinds mirrors the cmark-gfm document model, including the
//! GFM extension nodes (tables, strikethrough, footnotes).

use serde::{Deserialize, Serialize};

/// The kind of a node.
///
/// This is a closed set: renderers match on it exhaustively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeType {
    // Block elements
    /// Root document node.
    Document,
    /// Block quote.
    BlockQuote,
    /// Ordered or bullet list.
    List,
    /// Item in a list.
    Item,
    /// Fenced or indented code block.
    CodeBlock,
    /// Raw HTML block.
    Html,
    /// Block with caller-provided enter/exit markup.
    CustomBlock,
    /// Paragraph containing inline content.
    Paragraph,
    /// Heading (H1-H6).
    Header,
    /// Thematic break / horizontal rule.
    ThematicBreak,
    /// Footnote definition (GFM).
    FootnoteDefinition,
    /// Table (GFM).
    Table,
    /// Table row (GFM).
    TableRow,
    /// Table cell (GFM).
    TableCell,

    // Inline elements
    /// Plain text.
    Text,
    /// Line ending inside a paragraph.
    #[serde(rename = "softbreak")]
    SoftBreak,
    /// Hard line break.
    #[serde(rename = "linebreak")]
    LineBreak,
    /// Inline code span.
    Code,
    /// Raw inline HTML.
    HtmlInline,
    /// Inline with caller-provided enter/exit markup.
    CustomInline,
    /// Emphasis.
    Emph,
    /// Strong emphasis.
    Strong,
    /// Strikethrough (GFM).
    Strikethrough,
    /// Hyperlink.
    Link,
    /// Image.
    Image,
    /// Footnote reference (GFM).
    FootnoteReference,
}

impl NodeType {
    /// Every node type, in declaration order.
    pub const ALL: [NodeType; 26] = [
        NodeType::Document,
        NodeType::BlockQuote,
        NodeType::List,
        NodeType::Item,
        NodeType::CodeBlock,
        NodeType::Html,
        NodeType::CustomBlock,
        NodeType::Paragraph,
        NodeType::Header,
        NodeType::ThematicBreak,
        NodeType::FootnoteDefinition,
        NodeType::Table,
        NodeType::TableRow,
        NodeType::TableCell,
        NodeType::Text,
        NodeType::SoftBreak,
        NodeType::LineBreak,
        NodeType::Code,
        NodeType::HtmlInline,
        NodeType::CustomInline,
        NodeType::Emph,
        NodeType::Strong,
        NodeType::Strikethrough,
        NodeType::Link,
        NodeType::Image,
        NodeType::FootnoteReference,
    ];

    /// Returns true if this node type is a block element.
    #[inline]
    pub const fn is_block(&self) -> bool {
        matches!(
            self,
            NodeType::Document
                | NodeType::BlockQuote
                | NodeType::List
                | NodeType::Item
                | NodeType::CodeBlock
                | NodeType::Html
                | NodeType::CustomBlock
                | NodeType::Paragraph
                | NodeType::Header
                | NodeType::ThematicBreak
                | NodeType::FootnoteDefinition
                | NodeType::Table
                | NodeType::TableRow
                | NodeType::TableCell
        )
    }

    /// Returns true if this node type is an inline element.
    #[inline]
    pub const fn is_inline(&self) -> bool {
        !self.is_block()
    }

    /// Returns true if nodes of this type never have children.
    ///
    /// Traversal emits only an enter event for leaves.
    #[inline]
    pub const fn is_leaf(&self) -> bool {
        matches!(
            self,
            NodeType::CodeBlock
                | NodeType::Html
                | NodeType::ThematicBreak
                | NodeType::Text
                | NodeType::SoftBreak
                | NodeType::LineBreak
                | NodeType::Code
                | NodeType::HtmlInline
                | NodeType::FootnoteReference
        )
    }

    /// Returns true if nodes of this type carry a literal string.
    #[inline]
    pub const fn has_literal(&self) -> bool {
        matches!(
            self,
            NodeType::CodeBlock
                | NodeType::Html
                | NodeType::Text
                | NodeType::Code
                | NodeType::HtmlInline
        )
    }

    /// Returns true if a node of this type may hold a child of type `child`.
    pub const fn can_contain(&self, child: NodeType) -> bool {
        if matches!(child, NodeType::Document) {
            return false;
        }
        match self {
            NodeType::Document
            | NodeType::BlockQuote
            | NodeType::FootnoteDefinition
            | NodeType::Item => {
                child.is_block()
                    && !matches!(
                        child,
                        NodeType::Item | NodeType::TableRow | NodeType::TableCell
                    )
            }
            NodeType::List => matches!(child, NodeType::Item),
            NodeType::CustomBlock => true,
            NodeType::Table => matches!(child, NodeType::TableRow),
            NodeType::TableRow => matches!(child, NodeType::TableCell),
            NodeType::Paragraph
            | NodeType::Header
            | NodeType::TableCell
            | NodeType::Emph
            | NodeType::Strong
            | NodeType::Strikethrough
            | NodeType::Link
            | NodeType::Image
            | NodeType::CustomInline => child.is_inline(),
            _ => false,
        }
    }

    /// Returns the canonical name of this type.
    pub const fn as_str(&self) -> &'static str {
        match self {
            NodeType::Document => "document",
            NodeType::BlockQuote => "block_quote",
            NodeType::List => "list",
            NodeType::Item => "item",
            NodeType::CodeBlock => "code_block",
            NodeType::Html => "html",
            NodeType::CustomBlock => "custom_block",
            NodeType::Paragraph => "paragraph",
            NodeType::Header => "header",
            NodeType::ThematicBreak => "thematic_break",
            NodeType::FootnoteDefinition => "footnote_definition",
            NodeType::Table => "table",
            NodeType::TableRow => "table_row",
            NodeType::TableCell => "table_cell",
            NodeType::Text => "text",
            NodeType::SoftBreak => "softbreak",
            NodeType::LineBreak => "linebreak",
            NodeType::Code => "code",
            NodeType::HtmlInline => "html_inline",
            NodeType::CustomInline => "custom_inline",
            NodeType::Emph => "emph",
            NodeType::Strong => "strong",
            NodeType::Strikethrough => "strikethrough",
            NodeType::Link => "link",
            NodeType::Image => "image",
            NodeType::FootnoteReference => "footnote_reference",
        }
    }
}

impl std::fmt::Display for NodeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for NodeType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NodeType::ALL
            .iter()
            .copied()
            .find(|ty| ty.as_str() == s)
            .ok_or_else(|| format!("unknown node type: {s}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_is_block() {
        assert!(NodeType::Paragraph.is_block());
        assert!(NodeType::Header.is_block());
        assert!(NodeType::TableCell.is_block());
        assert!(!NodeType::Text.is_block());
        assert!(!NodeType::Emph.is_block());
    }

    #[test]
    fn test_is_inline() {
        assert!(NodeType::Text.is_inline());
        assert!(NodeType::CustomInline.is_inline());
        assert!(!NodeType::Paragraph.is_inline());
        assert!(!NodeType::Document.is_inline());
    }

    #[test]
    fn test_leaves_have_no_children() {
        for ty in NodeType::ALL.iter().filter(|ty| ty.is_leaf()) {
            for child in NodeType::ALL {
                assert!(!ty.can_contain(child), "{ty} must not contain {child}");
            }
        }
    }

    #[rstest]
    #[case::document_paragraph(NodeType::Document, NodeType::Paragraph, true)]
    #[case::document_item(NodeType::Document, NodeType::Item, false)]
    #[case::document_text(NodeType::Document, NodeType::Text, false)]
    #[case::list_item(NodeType::List, NodeType::Item, true)]
    #[case::list_paragraph(NodeType::List, NodeType::Paragraph, false)]
    #[case::item_list(NodeType::Item, NodeType::List, true)]
    #[case::paragraph_code(NodeType::Paragraph, NodeType::Code, true)]
    #[case::paragraph_paragraph(NodeType::Paragraph, NodeType::Paragraph, false)]
    #[case::table_row(NodeType::Table, NodeType::TableRow, true)]
    #[case::row_cell(NodeType::TableRow, NodeType::TableCell, true)]
    #[case::cell_text(NodeType::TableCell, NodeType::Text, true)]
    #[case::custom_block_anything(NodeType::CustomBlock, NodeType::Text, true)]
    #[case::never_document(NodeType::CustomBlock, NodeType::Document, false)]
    #[case::text_anything(NodeType::Text, NodeType::Text, false)]
    fn test_can_contain(#[case] parent: NodeType, #[case] child: NodeType, #[case] expected: bool) {
        assert_eq!(parent.can_contain(child), expected);
    }

    #[test]
    fn test_names_round_trip() {
        for ty in NodeType::ALL {
            assert_eq!(ty.as_str().parse::<NodeType>().unwrap(), ty);
        }
        assert!("heading".parse::<NodeType>().is_err());
    }

    #[test]
    fn test_serde_names_match_display() {
        for ty in NodeType::ALL {
            let json = serde_json::to_value(ty).unwrap();
            assert_eq!(json, ty.as_str());
        }
    }
}
