//! Markdown parser using markdown-rs (wooorm/markdown-rs).
//!
//! The `markdown` crate produces an mdast tree. This module converts it into
//! the arena tree and normalises it to the cmark-gfm shape:
//!
//! - line endings inside paragraphs become `softbreak` nodes
//! - reference links and images are resolved against their definitions
//! - definitions themselves are dropped
//! - code block and HTML block literals end with a newline
//! - list items keep the number written in their marker
//! - end columns are inclusive

use std::collections::HashMap;

use markdown::mdast;
use markdown::to_mdast;
use markly_ast::{
    Alignment, Arena, CodeBlockData, FootnoteDefinitionData, FootnoteReferenceData, HeaderData,
    ItemData, LinkData, ListData, ListDelimiter, ListType, Node, NodeData, NodeId, NodeType,
    Position, SourcePosition, TableData, TableRowData,
};
use tracing::{debug, trace, warn};

use crate::{ParseError, ParseOptions, Parser, footnotes, smart};

/// Markdown parser implementation.
///
/// Supports CommonMark plus the GFM constructs enabled in its
/// [`ParseOptions`]: tables, autolink literals, strikethrough, task list
/// items and footnotes.
#[derive(Debug, Clone, Default)]
pub struct MarkdownParser {
    options: ParseOptions,
}

impl MarkdownParser {
    /// Creates a new Markdown parser with default options (plain CommonMark).
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a parser with the given options.
    pub fn with_options(options: ParseOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ParseOptions {
        &self.options
    }
}

impl Parser for MarkdownParser {
    fn name(&self) -> &str {
        "markdown"
    }

    fn extensions(&self) -> &[&str] {
        &["md", "markdown", "mdown", "mkdn", "mkd"]
    }

    fn parse(&self, arena: &mut Arena, source: &str) -> Result<NodeId, ParseError> {
        let mdast = to_mdast(source, &self.options.to_mdast_options())
            .map_err(|e| ParseError::invalid_source(e.to_string()))?;

        let mut converter = Converter::new(source);
        converter.collect_definitions(&mdast);

        let mdast::Node::Root(root) = &mdast else {
            return Err(ParseError::internal("mdast tree has no root"));
        };
        let doc = arena.alloc(
            Node::new(NodeType::Document).with_position(converter.position(root.position.as_ref())),
        );
        converter.convert_children(arena, &root.children, doc);

        if self.options.footnotes {
            footnotes::process(arena, doc);
        }
        if self.options.smart {
            smart::apply(arena, doc);
        }

        debug!(
            "Parsed {} bytes into {} nodes",
            source.len(),
            arena.descendants(doc).count() + 1
        );
        Ok(doc)
    }
}

/// Link target collected from a definition.
#[derive(Debug, Clone)]
struct Definition {
    url: String,
    title: String,
}

struct Converter<'s> {
    source: &'s str,
    /// Character count of each source line, without its line ending.
    line_lengths: Vec<u32>,
    definitions: HashMap<String, Definition>,
}

impl<'s> Converter<'s> {
    fn new(source: &'s str) -> Self {
        let line_lengths = source
            .split('\n')
            .map(|line| line.trim_end_matches('\r').chars().count() as u32)
            .collect();
        Self {
            source,
            line_lengths,
            definitions: HashMap::new(),
        }
    }

    /// Records every link definition. The first definition of a label wins.
    fn collect_definitions(&mut self, node: &mdast::Node) {
        if let mdast::Node::Definition(def) = node {
            self.definitions
                .entry(def.identifier.clone())
                .or_insert_with(|| Definition {
                    url: def.url.clone(),
                    title: def.title.clone().unwrap_or_default(),
                });
        }
        if let Some(children) = node.children() {
            for child in children {
                self.collect_definitions(child);
            }
        }
    }

    /// Converts an mdast position into a cmark-style one with an inclusive
    /// end column.
    fn position(&self, pos: Option<&markdown::unist::Position>) -> SourcePosition {
        let Some(pos) = pos else {
            return SourcePosition::default();
        };
        let start = Position::new(pos.start.line as u32, pos.start.column as u32);
        let end = if pos.end.column > 1 {
            Position::new(pos.end.line as u32, pos.end.column as u32 - 1)
        } else if pos.end.line > pos.start.line {
            // The node ends with a line ending: point at the last character
            // of the previous line instead.
            let line = pos.end.line as u32 - 1;
            Position::new(line, self.line_length(line))
        } else {
            Position::new(pos.end.line as u32, 0)
        };
        SourcePosition::new(start, end)
    }

    fn line_length(&self, line: u32) -> u32 {
        line.checked_sub(1)
            .and_then(|index| self.line_lengths.get(index as usize))
            .copied()
            .unwrap_or(0)
    }

    /// Returns the source text starting at the node, with leading
    /// indentation removed.
    fn source_at(&self, pos: Option<&markdown::unist::Position>) -> &'s str {
        pos.and_then(|pos| self.source.get(pos.start.offset..))
            .unwrap_or_default()
            .trim_start_matches([' ', '\t'])
    }

    fn convert_children(&self, arena: &mut Arena, children: &[mdast::Node], parent: NodeId) {
        for child in children {
            self.convert(arena, child, parent);
        }
    }

    fn append(&self, arena: &mut Arena, parent: NodeId, node: Node) -> NodeId {
        let node_type = node.node_type();
        let id = arena.alloc(node);
        if !arena.append_child(parent, id) {
            warn!(
                "Dropping {node_type} that cannot be placed in {}",
                arena.node_type(parent)
            );
        }
        id
    }

    fn container(
        &self,
        arena: &mut Arena,
        parent: NodeId,
        node_type: NodeType,
        pos: Option<&markdown::unist::Position>,
        children: &[mdast::Node],
    ) -> NodeId {
        let id = self.append(
            arena,
            parent,
            Node::new(node_type).with_position(self.position(pos)),
        );
        self.convert_children(arena, children, id);
        id
    }

    fn convert(&self, arena: &mut Arena, node: &mdast::Node, parent: NodeId) {
        use mdast::Node as M;

        let inline_parent = arena.node_type(parent).can_contain(NodeType::Text);

        match node {
            M::Paragraph(para) => {
                self.container(arena, parent, NodeType::Paragraph, para.position.as_ref(), &para.children);
            }

            M::Heading(heading) => {
                let id = self.append(
                    arena,
                    parent,
                    Node::new(NodeType::Header)
                        .with_data(NodeData::Header(HeaderData {
                            level: heading.depth,
                        }))
                        .with_position(self.position(heading.position.as_ref())),
                );
                self.convert_children(arena, &heading.children, id);
            }

            M::Blockquote(quote) => {
                self.container(arena, parent, NodeType::BlockQuote, quote.position.as_ref(), &quote.children);
            }

            M::List(list) => self.convert_list(arena, list, parent),

            M::ListItem(item) => {
                // Items are converted by their list; a stray one is kept as is.
                self.convert_item(arena, item, parent, false);
            }

            M::Code(code) => {
                let info = match (&code.lang, &code.meta) {
                    (Some(lang), Some(meta)) => format!("{lang} {meta}"),
                    (Some(lang), None) => lang.clone(),
                    (None, _) => String::new(),
                };
                let fence_char = self
                    .source_at(code.position.as_ref())
                    .chars()
                    .next()
                    .filter(|c| matches!(c, '`' | '~'));
                let literal = if code.value.is_empty() {
                    String::new()
                } else {
                    format!("{}\n", code.value)
                };
                self.append(
                    arena,
                    parent,
                    Node::new(NodeType::CodeBlock)
                        .with_data(NodeData::CodeBlock(CodeBlockData {
                            info,
                            fenced: fence_char.is_some(),
                            fence_char,
                        }))
                        .with_literal(literal)
                        .with_position(self.position(code.position.as_ref())),
                );
            }

            M::Html(html) => {
                let pos = self.position(html.position.as_ref());
                let node = if inline_parent {
                    Node::new(NodeType::HtmlInline).with_literal(html.value.clone())
                } else {
                    Node::new(NodeType::Html).with_literal(format!("{}\n", html.value))
                };
                self.append(arena, parent, node.with_position(pos));
            }

            M::ThematicBreak(brk) => {
                self.append(
                    arena,
                    parent,
                    Node::new(NodeType::ThematicBreak).with_position(self.position(brk.position.as_ref())),
                );
            }

            M::Table(table) => self.convert_table(arena, table, parent),

            M::FootnoteDefinition(def) => {
                let id = self.append(
                    arena,
                    parent,
                    Node::new(NodeType::FootnoteDefinition)
                        .with_data(NodeData::FootnoteDefinition(FootnoteDefinitionData {
                            label: def.label.clone().unwrap_or_else(|| def.identifier.clone()),
                            reference_count: 0,
                        }))
                        .with_position(self.position(def.position.as_ref())),
                );
                self.convert_children(arena, &def.children, id);
            }

            M::Definition(_) => {
                trace!("Dropping resolved link definition");
            }

            M::Text(text) => self.convert_text(arena, &text.value, text.position.as_ref(), parent),

            M::Break(brk) => {
                self.append(
                    arena,
                    parent,
                    Node::new(NodeType::LineBreak).with_position(self.position(brk.position.as_ref())),
                );
            }

            M::InlineCode(code) => {
                self.append(
                    arena,
                    parent,
                    Node::new(NodeType::Code)
                        .with_literal(code.value.clone())
                        .with_position(self.position(code.position.as_ref())),
                );
            }

            M::Emphasis(em) => {
                self.container(arena, parent, NodeType::Emph, em.position.as_ref(), &em.children);
            }

            M::Strong(strong) => {
                self.container(arena, parent, NodeType::Strong, strong.position.as_ref(), &strong.children);
            }

            M::Delete(del) => {
                self.container(arena, parent, NodeType::Strikethrough, del.position.as_ref(), &del.children);
            }

            M::Link(link) => {
                let data = LinkData {
                    url: link.url.clone(),
                    title: link.title.clone().unwrap_or_default(),
                };
                self.link(arena, parent, NodeType::Link, data, link.position.as_ref(), &link.children);
            }

            M::LinkReference(reference) => {
                let data = self.resolve(&reference.identifier);
                self.link(
                    arena,
                    parent,
                    NodeType::Link,
                    data,
                    reference.position.as_ref(),
                    &reference.children,
                );
            }

            M::Image(image) => {
                let data = LinkData {
                    url: image.url.clone(),
                    title: image.title.clone().unwrap_or_default(),
                };
                self.image(arena, parent, data, &image.alt, image.position.as_ref());
            }

            M::ImageReference(reference) => {
                let data = self.resolve(&reference.identifier);
                self.image(arena, parent, data, &reference.alt, reference.position.as_ref());
            }

            M::FootnoteReference(reference) => {
                self.append(
                    arena,
                    parent,
                    Node::new(NodeType::FootnoteReference)
                        .with_data(NodeData::FootnoteReference(FootnoteReferenceData {
                            label: reference.identifier.clone(),
                            ordinal: 0,
                            ref_index: 0,
                        }))
                        .with_position(self.position(reference.position.as_ref())),
                );
            }

            M::Root(root) => self.convert_children(arena, &root.children, parent),

            // Cells and rows only appear inside tables.
            M::TableRow(_) | M::TableCell(_) => {
                debug!("Skipping table part outside of a table");
            }

            other => {
                debug!("Skipping unsupported mdast node: {other:?}");
            }
        }
    }

    fn resolve(&self, identifier: &str) -> LinkData {
        match self.definitions.get(identifier) {
            Some(def) => LinkData {
                url: def.url.clone(),
                title: def.title.clone(),
            },
            None => {
                warn!("No definition for reference [{identifier}]");
                LinkData::default()
            }
        }
    }

    fn link(
        &self,
        arena: &mut Arena,
        parent: NodeId,
        node_type: NodeType,
        data: LinkData,
        pos: Option<&markdown::unist::Position>,
        children: &[mdast::Node],
    ) {
        let id = self.append(
            arena,
            parent,
            Node::new(node_type)
                .with_data(NodeData::Link(data))
                .with_position(self.position(pos)),
        );
        self.convert_children(arena, children, id);
    }

    fn image(
        &self,
        arena: &mut Arena,
        parent: NodeId,
        data: LinkData,
        alt: &str,
        pos: Option<&markdown::unist::Position>,
    ) {
        let position = self.position(pos);
        let id = self.append(
            arena,
            parent,
            Node::new(NodeType::Image)
                .with_data(NodeData::Link(data))
                .with_position(position),
        );
        if !alt.is_empty() {
            self.append(
                arena,
                id,
                Node::new(NodeType::Text)
                    .with_literal(alt)
                    .with_position(position),
            );
        }
    }

    /// Splits text on line endings into `text` and `softbreak` nodes.
    fn convert_text(
        &self,
        arena: &mut Arena,
        value: &str,
        pos: Option<&markdown::unist::Position>,
        parent: NodeId,
    ) {
        let position = self.position(pos);
        let lines: Vec<&str> = value.split('\n').collect();
        let last = lines.len() - 1;

        for (index, line) in lines.iter().enumerate() {
            let mut line = line.trim_end_matches('\r');
            if index > 0 {
                line = line.trim_start_matches([' ', '\t']);
            }
            if index < last {
                line = line.trim_end_matches([' ', '\t']);
            }

            let line_number = position.start_line() + index as u32;
            let start_column = if index == 0 { position.start_column() } else { 1 };
            if !line.is_empty() {
                let end_column = start_column + line.chars().count() as u32 - 1;
                self.append(
                    arena,
                    parent,
                    Node::new(NodeType::Text)
                        .with_literal(line)
                        .with_position(SourcePosition::from_lines(
                            line_number,
                            start_column,
                            line_number,
                            end_column,
                        )),
                );
            }
            if index < last {
                let column = self.line_length(line_number) + 1;
                self.append(
                    arena,
                    parent,
                    Node::new(NodeType::SoftBreak).with_position(SourcePosition::from_lines(
                        line_number,
                        column,
                        line_number,
                        column,
                    )),
                );
            }
        }
    }

    fn convert_list(&self, arena: &mut Arena, list: &mdast::List, parent: NodeId) {
        let marker = list
            .children
            .first()
            .map(|item| self.source_at(item.position()))
            .unwrap_or_default();

        let data = if list.ordered {
            let delimiter = match marker.trim_start_matches(|c: char| c.is_ascii_digit()).chars().next() {
                Some(')') => ListDelimiter::Paren,
                _ => ListDelimiter::Period,
            };
            ListData {
                list_type: ListType::Ordered,
                start: list.start.unwrap_or(1),
                delimiter,
                ..ListData::default()
            }
        } else {
            ListData {
                bullet_char: marker.chars().next().filter(|c| matches!(c, '-' | '+' | '*')).unwrap_or('-'),
                ..ListData::default()
            }
        };

        let spread = list.spread
            || list
                .children
                .iter()
                .any(|child| matches!(child, mdast::Node::ListItem(item) if item.spread));

        let id = self.append(
            arena,
            parent,
            Node::new(NodeType::List)
                .with_data(NodeData::List(ListData {
                    tight: !spread,
                    ..data
                }))
                .with_position(self.position(list.position.as_ref())),
        );

        for child in &list.children {
            match child {
                mdast::Node::ListItem(item) => self.convert_item(arena, item, id, list.ordered),
                other => self.convert(arena, other, id),
            }
        }
    }

    fn convert_item(&self, arena: &mut Arena, item: &mdast::ListItem, parent: NodeId, ordered: bool) {
        let number = if ordered {
            let marker = self.source_at(item.position.as_ref());
            let digits: String = marker.chars().take_while(|c| c.is_ascii_digit()).collect();
            digits.parse().ok()
        } else {
            None
        };

        let id = self.append(
            arena,
            parent,
            Node::new(NodeType::Item)
                .with_data(NodeData::Item(ItemData {
                    number,
                    checked: item.checked,
                }))
                .with_position(self.position(item.position.as_ref())),
        );
        self.convert_children(arena, &item.children, id);
    }

    fn convert_table(&self, arena: &mut Arena, table: &mdast::Table, parent: NodeId) {
        let alignments: Vec<Alignment> = table
            .align
            .iter()
            .map(|align| match align {
                mdast::AlignKind::Left => Alignment::Left,
                mdast::AlignKind::Center => Alignment::Center,
                mdast::AlignKind::Right => Alignment::Right,
                mdast::AlignKind::None => Alignment::None,
            })
            .collect();
        let columns = alignments.len();

        let table_id = self.append(
            arena,
            parent,
            Node::new(NodeType::Table)
                .with_data(NodeData::Table(TableData { alignments }))
                .with_position(self.position(table.position.as_ref())),
        );

        for (index, row) in table.children.iter().enumerate() {
            let mdast::Node::TableRow(row) = row else {
                debug!("Skipping non-row table child");
                continue;
            };
            let row_position = self.position(row.position.as_ref());
            let row_id = self.append(
                arena,
                table_id,
                Node::new(NodeType::TableRow)
                    .with_data(NodeData::TableRow(TableRowData { header: index == 0 }))
                    .with_position(row_position),
            );

            let mut cells = 0;
            for cell in row.children.iter().take(columns) {
                if let mdast::Node::TableCell(cell) = cell {
                    self.container(arena, row_id, NodeType::TableCell, cell.position.as_ref(), &cell.children);
                    cells += 1;
                }
            }
            // Short rows are padded with empty cells.
            for _ in cells..columns {
                self.append(
                    arena,
                    row_id,
                    Node::new(NodeType::TableCell).with_position(row_position),
                );
            }
        }
    }
}
