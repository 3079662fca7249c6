//! CommonMark renderer.
//!
//! Serialises a tree back to Markdown that parses to the same document.
//! Headings are always ATX, bullets are `-`, emphasis is `*` and thematic
//! breaks are `-----`. A list directly followed by another list or a code
//! block is closed with an `<!-- end list -->` comment so the two stay
//! apart on reparse.

use markly_ast::{Alignment, Arena, NodeData, NodeId, NodeType, WalkEvent};
use tracing::trace;

use crate::writer::{Escaping, Syntax, Writer, longest_backtick_run, shortest_unused_backtick_run};
use crate::{Render, RenderOptions};

/// Renders a tree as CommonMark with the GFM extensions.
#[derive(Debug, Clone, Default)]
pub struct CommonMarkRenderer {
    options: RenderOptions,
}

impl CommonMarkRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: RenderOptions) -> Self {
        Self { options }
    }
}

impl Render for CommonMarkRenderer {
    fn name(&self) -> &str {
        "commonmark"
    }

    fn options(&self) -> &RenderOptions {
        &self.options
    }

    fn render(&self, arena: &Arena, root: NodeId) -> String {
        trace!("Rendering {} as CommonMark", arena.node_type(root));
        let mut state = CommonMark {
            arena,
            options: &self.options,
            writer: Writer::new(Syntax::CommonMark, self.options.width),
        };

        let mut events = arena.traverse(root);
        while let Some(event) = events.next() {
            if !state.render_event(event) {
                events.reset_to(WalkEvent::Exit(event.node()));
            }
        }
        state.writer.finish(arena.node_type(root).is_block())
    }
}

struct CommonMark<'a> {
    arena: &'a Arena,
    options: &'a RenderOptions,
    writer: Writer,
}

impl CommonMark<'_> {
    /// Renders one event. Returns false when the node's children must be
    /// skipped.
    fn render_event(&mut self, event: WalkEvent) -> bool {
        let arena = self.arena;
        let node = event.node();
        let entering = event.is_enter();
        let allow_wrap = self.options.allow_wrap();
        let writer = &mut self.writer;

        writer.track_tight_list(arena, event);

        match arena.node_type(node) {
            NodeType::Document => {}
            NodeType::BlockQuote => {
                if entering {
                    writer.lit("> ");
                    writer.begin_content();
                    writer.push_prefix("> ");
                } else {
                    writer.truncate_prefix(2);
                    writer.blankline();
                }
            }
            NodeType::List => {
                let followed_by_block = arena.next(node).is_some_and(|next| {
                    matches!(arena.node_type(next), NodeType::CodeBlock | NodeType::List)
                });
                if !entering && followed_by_block {
                    writer.cr();
                    writer.lit("<!-- end list -->");
                    writer.blankline();
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
                    let level = arena.header_level(node).unwrap_or(1);
                    writer.lit(&"#".repeat(level.into()));
                    writer.lit(" ");
                    writer.begin_content();
                    writer.no_linebreaks = true;
                } else {
                    writer.no_linebreaks = false;
                    writer.blankline();
                }
            }
            NodeType::CodeBlock => self.render_code_block(node),
            NodeType::Html => {
                writer.blankline();
                writer.lit(arena.literal(node).unwrap_or_default());
                writer.blankline();
            }
            NodeType::CustomBlock => {
                let markup = if entering {
                    arena.on_enter(node)
                } else {
                    arena.on_exit(node)
                };
                writer.blankline();
                writer.lit(markup.unwrap_or_default());
                writer.blankline();
            }
            NodeType::Paragraph => {
                if !entering {
                    writer.blankline();
                }
            }
            NodeType::ThematicBreak => {
                writer.blankline();
                writer.lit("-----");
                writer.blankline();
            }
            NodeType::FootnoteDefinition => {
                if entering {
                    let label = match arena.data(node) {
                        NodeData::FootnoteDefinition(definition) => definition.label.as_str(),
                        _ => "",
                    };
                    writer.lit("[^");
                    writer.lit(label);
                    writer.lit("]:\n");
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
                if self.options.hard_breaks {
                    writer.lit("  ");
                    writer.cr();
                } else if !writer.no_linebreaks && self.options.width == 0 && !self.options.no_breaks
                {
                    writer.cr();
                } else {
                    writer.out(" ", allow_wrap, Escaping::Literal);
                }
            }
            NodeType::LineBreak => {
                if !self.options.hard_breaks {
                    writer.lit("  ");
                }
                writer.cr();
            }
            NodeType::Code => {
                let code = arena.literal(node).unwrap_or_default();
                let ticks = "`".repeat(shortest_unused_backtick_run(code));
                let padded = code.is_empty()
                    || code.starts_with('`')
                    || code.ends_with('`')
                    || (code.starts_with(' ') && code.ends_with(' ') && !code.trim().is_empty());
                writer.lit(&ticks);
                if padded {
                    writer.lit(" ");
                }
                writer.out(code, allow_wrap, Escaping::Literal);
                if padded {
                    writer.lit(" ");
                }
                writer.lit(&ticks);
            }
            NodeType::HtmlInline => writer.lit(arena.literal(node).unwrap_or_default()),
            NodeType::CustomInline => {
                let markup = if entering {
                    arena.on_enter(node)
                } else {
                    arena.on_exit(node)
                };
                writer.lit(markup.unwrap_or_default());
            }
            NodeType::Emph => {
                // `**x**` would read as strong, so nested emphasis uses `_`.
                let only_child_of_emph = arena
                    .parent(node)
                    .is_some_and(|parent| arena.node_type(parent) == NodeType::Emph)
                    && arena.previous(node).is_none()
                    && arena.next(node).is_none();
                writer.lit(if only_child_of_emph { "_" } else { "*" });
            }
            NodeType::Strong => {
                let nested = arena
                    .parent(node)
                    .is_some_and(|parent| arena.node_type(parent) == NodeType::Strong);
                if !nested {
                    writer.lit("**");
                }
            }
            NodeType::Strikethrough => writer.lit("~~"),
            NodeType::Link => {
                if let Some(target) = autolink_target(arena, node) {
                    if entering {
                        writer.lit("<");
                        writer.lit(target);
                        writer.lit(">");
                        return false;
                    }
                } else if entering {
                    writer.lit("[");
                } else {
                    writer.lit("](");
                    self.render_destination(node, false);
                }
            }
            NodeType::Image => {
                if entering {
                    writer.lit("![");
                } else {
                    writer.lit("](");
                    self.render_destination(node, allow_wrap);
                }
            }
            NodeType::FootnoteReference => {
                if let NodeData::FootnoteReference(reference) = arena.data(node) {
                    writer.lit("[^");
                    writer.lit(&reference.label);
                    writer.lit("]");
                }
            }
        }
        true
    }

    /// Writes `url "title")` after the `](` of a link or image.
    fn render_destination(&mut self, node: NodeId, wrap_title: bool) {
        let arena = self.arena;
        let writer = &mut self.writer;
        writer.out(arena.url(node).unwrap_or_default(), false, Escaping::Url);
        let title = arena.title(node).unwrap_or_default();
        if !title.is_empty() {
            writer.out(" \"", wrap_title, Escaping::Literal);
            writer.out(title, false, Escaping::Title);
            writer.lit("\"");
        }
        writer.lit(")");
    }

    fn render_code_block(&mut self, node: NodeId) {
        let arena = self.arena;
        let writer = &mut self.writer;
        let first_in_item = arena.previous(node).is_none()
            && arena
                .parent(node)
                .is_some_and(|parent| arena.node_type(parent) == NodeType::Item);
        if !first_in_item {
            writer.blankline();
        }

        let info = arena.fence_info(node).unwrap_or_default();
        let code = arena.literal(node).unwrap_or_default();
        let bytes = code.as_bytes();
        let indentable = info.is_empty()
            && bytes.len() > 2
            && !bytes[0].is_ascii_whitespace()
            && !(bytes[bytes.len() - 1].is_ascii_whitespace()
                && bytes[bytes.len() - 2].is_ascii_whitespace())
            && !first_in_item;

        if indentable {
            writer.lit("    ");
            writer.push_prefix("    ");
            writer.lit(code);
            writer.truncate_prefix(4);
        } else {
            let fence_char = if info.contains('`') { "~" } else { "`" };
            let fence = fence_char.repeat((longest_backtick_run(code) + 1).max(3));
            writer.lit(&fence);
            writer.lit(" ");
            writer.lit(info);
            writer.cr();
            writer.lit(code);
            writer.cr();
            writer.lit(&fence);
        }
        writer.blankline();
    }
}

/// Returns the text to put between `<` and `>` when a link can be written
/// as an autolink: its URL has a scheme, it has no title and its text is
/// the URL itself.
fn autolink_target(arena: &Arena, link: NodeId) -> Option<&str> {
    let url = arena.url(link)?;
    if !has_scheme(url) || !arena.title(link).unwrap_or_default().is_empty() {
        return None;
    }
    let target = url.strip_prefix("mailto:").unwrap_or(url);

    let mut text = String::new();
    for child in arena.children(link) {
        if arena.node_type(child) != NodeType::Text {
            break;
        }
        text.push_str(arena.literal(child).unwrap_or_default());
    }
    (arena.first_child(link).is_some() && text == target).then_some(target)
}

/// Checks for a URI scheme: a letter, 1 to 31 more scheme characters and a
/// colon.
fn has_scheme(url: &str) -> bool {
    let Some((scheme, _)) = url.split_once(':') else {
        return false;
    };
    let mut chars = scheme.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && (2..=32).contains(&scheme.len())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '.' | '-'))
}

pub(crate) fn is_last_header_cell(arena: &Arena, cell: NodeId) -> bool {
    arena.next(cell).is_none()
        && arena
            .parent(cell)
            .is_some_and(|row| matches!(arena.data(row), NodeData::TableRow(row) if row.header))
}

/// Writes the `| --- | :-: |` row that follows the header row.
pub(crate) fn render_delimiter_row(arena: &Arena, last_cell: NodeId, writer: &mut Writer) {
    let columns = arena
        .parent(last_cell)
        .and_then(|row| arena.parent(row))
        .map(|table| match arena.data(table) {
            NodeData::Table(table) => table.alignments.clone(),
            _ => Vec::new(),
        })
        .unwrap_or_default();

    writer.cr();
    writer.lit("|");
    for alignment in columns {
        writer.lit(match alignment {
            Alignment::None => " --- |",
            Alignment::Left => " :-- |",
            Alignment::Center => " :-: |",
            Alignment::Right => " --: |",
        });
    }
    writer.cr();
}

#[cfg(test)]
mod tests {
    use super::*;
    use markly_ast::{LinkData, Node};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn link(arena: &mut Arena, url: &str, text: &str) -> NodeId {
        let link = arena.alloc(Node::new(NodeType::Link).with_data(NodeData::Link(LinkData {
            url: url.to_string(),
            title: String::new(),
        })));
        let text = arena.alloc(Node::new(NodeType::Text).with_literal(text));
        arena.append_child(link, text);
        link
    }

    #[rstest]
    #[case::url("https://example.com", "https://example.com", "<https://example.com>")]
    #[case::mailto("mailto:a@b.c", "a@b.c", "<a@b.c>")]
    #[case::different_text("https://example.com", "here", "[here](https://example.com)")]
    #[case::no_scheme("/path", "/path", "[/path](/path)")]
    fn test_links(#[case] url: &str, #[case] text: &str, #[case] expected: &str) {
        let mut arena = Arena::new();
        let link = link(&mut arena, url, text);
        assert_eq!(CommonMarkRenderer::new().render(&arena, link), expected);
    }

    #[rstest]
    #[case("http:", true)]
    #[case("ab:", true)]
    #[case("x:y", false)]
    #[case("git+ssh://host", true)]
    #[case("1ab:", false)]
    fn test_has_scheme(#[case] url: &str, #[case] expected: bool) {
        assert_eq!(has_scheme(url), expected);
    }

    #[rstest]
    #[case::plain("x", "`x`")]
    #[case::backtick("a`b", "``a`b``")]
    #[case::leading_backtick("`a", "`` `a ``")]
    #[case::empty("", "`  `")]
    #[case::spaces(" a ", "`  a  `")]
    fn test_code_spans(#[case] literal: &str, #[case] expected: &str) {
        let mut arena = Arena::new();
        let code = arena.alloc(Node::new(NodeType::Code).with_literal(literal));
        assert_eq!(CommonMarkRenderer::new().render(&arena, code), expected);
    }

    #[test]
    fn test_block_root_ends_with_newline() {
        let mut arena = Arena::new();
        let rule = arena.new_node(NodeType::ThematicBreak);
        assert_eq!(CommonMarkRenderer::new().render(&arena, rule), "-----\n");
    }
}
