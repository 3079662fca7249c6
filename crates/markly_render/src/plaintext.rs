//! Plaintext renderer.
//!
//! Keeps the block layout of the CommonMark renderer (list markers, blank
//! lines between blocks, table rows) but drops inline markup, raw HTML and
//! custom markup, and never escapes.

use markly_ast::{Arena, NodeData, NodeId, NodeType, WalkEvent};
use tracing::trace;

use crate::commonmark::{is_last_header_cell, render_delimiter_row};
use crate::writer::{Escaping, Syntax, Writer};
use crate::{Render, RenderOptions};

/// Renders a tree as plain text.
#[derive(Debug, Clone, Default)]
pub struct PlaintextRenderer {
    options: RenderOptions,
}

impl PlaintextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: RenderOptions) -> Self {
        Self { options }
    }
}

impl Render for PlaintextRenderer {
    fn name(&self) -> &str {
        "plaintext"
    }

    fn options(&self) -> &RenderOptions {
        &self.options
    }

    fn render(&self, arena: &Arena, root: NodeId) -> String {
        trace!("Rendering {} as plaintext", arena.node_type(root));
        let mut writer = Writer::new(Syntax::Plain, self.options.width);
        let mut footnote_ix = 0;
        for event in arena.traverse(root) {
            render_event(arena, &self.options, &mut writer, &mut footnote_ix, event);
        }
        writer.finish(arena.node_type(root).is_block())
    }
}

fn render_event(
    arena: &Arena,
    options: &RenderOptions,
    writer: &mut Writer,
    footnote_ix: &mut u32,
    event: WalkEvent,
) {
    let node = event.node();
    let entering = event.is_enter();
    let allow_wrap = options.allow_wrap();

    writer.track_tight_list(arena, event);

    match arena.node_type(node) {
        NodeType::Document
        | NodeType::BlockQuote
        | NodeType::Html
        | NodeType::CustomBlock
        | NodeType::HtmlInline
        | NodeType::CustomInline
        | NodeType::Emph
        | NodeType::Strong
        | NodeType::Strikethrough
        | NodeType::Link
        | NodeType::Image => {}
        NodeType::List => {
            let followed_by_block = arena.next(node).is_some_and(|next| {
                matches!(arena.node_type(next), NodeType::CodeBlock | NodeType::List)
            });
            if !entering && followed_by_block {
                writer.cr();
            }
        }
        NodeType::Item => match arena.item_checked(node) {
            Some(checked) => {
                if entering {
                    writer.cr();
                    writer.lit(if checked { "- [x] " } else { "- [ ] " });
                    writer.push_prefix("  ");
                } else {
                    writer.truncate_prefix(2);
                    writer.cr();
                }
            }
            None => writer.list_item(arena, node, entering),
        },
        NodeType::Header => {
            if entering {
                writer.no_linebreaks = true;
            } else {
                writer.no_linebreaks = false;
                writer.blankline();
            }
        }
        NodeType::CodeBlock => {
            let first_in_item = arena.previous(node).is_none()
                && arena
                    .parent(node)
                    .is_some_and(|parent| arena.node_type(parent) == NodeType::Item);
            if !first_in_item {
                writer.blankline();
            }
            writer.lit(arena.literal(node).unwrap_or_default());
            writer.blankline();
        }
        NodeType::ThematicBreak => writer.blankline(),
        NodeType::Paragraph => {
            if !entering {
                writer.blankline();
            }
        }
        NodeType::FootnoteDefinition => {
            if entering {
                *footnote_ix += 1;
                writer.lit(&format!("[^{footnote_ix}]: "));
                writer.push_prefix("    ");
            } else {
                writer.truncate_prefix(4);
            }
        }
        NodeType::Table => writer.blankline(),
        NodeType::TableRow => {
            if entering {
                writer.cr();
                writer.lit("|");
            }
        }
        NodeType::TableCell => {
            if entering {
                writer.lit(" ");
                writer.escape_pipes = true;
            } else {
                writer.escape_pipes = false;
                writer.lit(" |");
                if is_last_header_cell(arena, node) {
                    render_delimiter_row(arena, node, writer);
                }
            }
        }
        NodeType::Text => {
            writer.out(arena.literal(node).unwrap_or_default(), allow_wrap, Escaping::Normal);
        }
        NodeType::SoftBreak => {
            if options.hard_breaks
                || (!writer.no_linebreaks && options.width == 0 && !options.no_breaks)
            {
                writer.cr();
            } else {
                writer.out(" ", allow_wrap, Escaping::Literal);
            }
        }
        NodeType::LineBreak => writer.cr(),
        NodeType::Code => {
            writer.out(arena.literal(node).unwrap_or_default(), allow_wrap, Escaping::Literal);
        }
        NodeType::FootnoteReference => {
            if let NodeData::FootnoteReference(reference) = arena.data(node) {
                writer.lit(&format!("[^{}]", reference.ordinal));
            }
        }
    }
}
