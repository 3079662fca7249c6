//! HTML renderer.
//!
//! Output matches cmark-gfm byte for byte: block elements start on their own
//! line, tight lists drop their paragraph tags and footnote definitions are
//! collected in a trailing `<section class="footnotes">`.

use markly_ast::{Alignment, Arena, ListType, NodeData, NodeId, NodeType, WalkEvent};
use tracing::trace;

use crate::escape::{escape_href, escape_html, filter_html, is_dangerous_url, is_filtered_tag};
use crate::{Headings, Render, RenderOptions};

/// Renders a tree as HTML.
#[derive(Debug, Clone, Default)]
pub struct HtmlRenderer {
    options: RenderOptions,
}

impl HtmlRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: RenderOptions) -> Self {
        Self { options }
    }
}

impl Render for HtmlRenderer {
    fn name(&self) -> &str {
        "html"
    }

    fn options(&self) -> &RenderOptions {
        &self.options
    }

    fn render(&self, arena: &Arena, root: NodeId) -> String {
        trace!("Rendering {} as HTML", arena.node_type(root));
        let mut html = HtmlWriter::new(arena, &self.options);
        for event in arena.traverse(root) {
            html.render_event(event);
        }
        html.finish()
    }
}

struct HtmlWriter<'a> {
    arena: &'a Arena,
    options: &'a RenderOptions,
    out: String,
    /// Image whose description is being rendered as alt text.
    plain: Option<NodeId>,
    footnote_ix: u32,
    written_footnote_ix: u32,
    need_closing_table_body: bool,
    /// Heading levels of the open `<section>` elements in `ids` mode.
    sections: Vec<u8>,
    headings: Headings,
}

impl<'a> HtmlWriter<'a> {
    fn new(arena: &'a Arena, options: &'a RenderOptions) -> Self {
        Self {
            arena,
            options,
            out: String::new(),
            plain: None,
            footnote_ix: 0,
            written_footnote_ix: 0,
            need_closing_table_body: false,
            sections: Vec::new(),
            headings: Headings::new(),
        }
    }

    fn finish(mut self) -> String {
        if self.footnote_ix > 0 {
            self.out.push_str("</ol>\n</section>\n");
        }
        self.close_sections(0);
        self.out
    }

    /// Starts a new line unless the output is empty or already on one.
    fn cr(&mut self) {
        if !self.out.is_empty() && !self.out.ends_with('\n') {
            self.out.push('\n');
        }
    }

    fn put(&mut self, text: &str) {
        self.out.push_str(text);
    }

    fn escape(&mut self, text: &str) {
        escape_html(&mut self.out, text);
    }

    fn escape_href(&mut self, url: &str) {
        escape_href(&mut self.out, url);
    }

    fn sourcepos(&mut self, node: NodeId) {
        if self.options.source_pos {
            let position = self.arena.position(node);
            self.out.push_str(&format!(" data-sourcepos=\"{position}\""));
        }
    }

    /// Closes open sections whose heading level is `level` or deeper.
    fn close_sections(&mut self, level: u8) {
        while self.sections.last().is_some_and(|&open| open >= level) {
            self.sections.pop();
            self.out.push_str("</section>");
        }
    }

    fn render_event(&mut self, event: WalkEvent) {
        let node = event.node();
        let entering = event.is_enter();

        if self.plain == Some(node) {
            self.plain = None;
        }
        if self.plain.is_some() {
            self.render_plain(node);
            return;
        }

        let arena = self.arena;
        match arena.node_type(node) {
            NodeType::Document => {}
            NodeType::BlockQuote => {
                self.cr();
                if entering {
                    self.put("<blockquote");
                    self.sourcepos(node);
                    self.put(">\n");
                } else {
                    self.put("</blockquote>\n");
                }
            }
            NodeType::List => self.render_list(node, entering),
            NodeType::Item => {
                if entering {
                    self.cr();
                    self.put("<li");
                    self.sourcepos(node);
                    self.put(">");
                    match arena.item_checked(node) {
                        Some(true) => {
                            self.put("<input type=\"checkbox\" checked=\"\" disabled=\"\" /> ")
                        }
                        Some(false) => self.put("<input type=\"checkbox\" disabled=\"\" /> "),
                        None => {}
                    }
                } else {
                    self.put("</li>\n");
                }
            }
            NodeType::Header => self.render_header(node, entering),
            NodeType::CodeBlock => self.render_code_block(node),
            NodeType::Html => {
                self.cr();
                let literal = arena.literal(node).unwrap_or_default();
                if self.options.safe {
                    self.put("<!-- raw HTML omitted -->");
                } else if self.options.extensions.tagfilter {
                    filter_html(&mut self.out, literal);
                } else {
                    self.put(literal);
                }
                self.cr();
            }
            NodeType::CustomBlock => {
                self.cr();
                self.put_custom(node, entering);
                self.cr();
            }
            NodeType::Paragraph => self.render_paragraph(node, entering),
            NodeType::ThematicBreak => {
                self.cr();
                self.put("<hr");
                self.sourcepos(node);
                self.put(" />\n");
            }
            NodeType::FootnoteDefinition => self.render_footnote_definition(node, entering),
            NodeType::Table => self.render_table(node, entering),
            NodeType::TableRow => self.render_table_row(node, entering),
            NodeType::TableCell => self.render_table_cell(node, entering),
            NodeType::Text => self.escape(arena.literal(node).unwrap_or_default()),
            NodeType::SoftBreak => {
                if self.options.hard_breaks {
                    self.put("<br />\n");
                } else if self.options.no_breaks {
                    self.put(" ");
                } else {
                    self.put("\n");
                }
            }
            NodeType::LineBreak => self.put("<br />\n"),
            NodeType::Code => {
                self.put("<code>");
                self.escape(arena.literal(node).unwrap_or_default());
                self.put("</code>");
            }
            NodeType::HtmlInline => {
                let literal = arena.literal(node).unwrap_or_default();
                if self.options.safe {
                    self.put("<!-- raw HTML omitted -->");
                } else if self.options.extensions.tagfilter && is_filtered_tag(literal) {
                    self.put("&lt;");
                    self.put(&literal[1..]);
                } else {
                    self.put(literal);
                }
            }
            NodeType::CustomInline => self.put_custom(node, entering),
            NodeType::Emph => self.put(if entering { "<em>" } else { "</em>" }),
            NodeType::Strong => {
                // Strong nested directly in strong renders as one element.
                let nested = arena
                    .parent(node)
                    .is_some_and(|parent| arena.node_type(parent) == NodeType::Strong);
                if !nested {
                    self.put(if entering { "<strong>" } else { "</strong>" });
                }
            }
            NodeType::Strikethrough => self.put(if entering { "<del>" } else { "</del>" }),
            NodeType::Link => {
                if entering {
                    self.put("<a href=\"");
                    self.put_url(node);
                    let title = arena.title(node).unwrap_or_default();
                    if !title.is_empty() {
                        self.put("\" title=\"");
                        self.escape(title);
                    }
                    self.put("\">");
                } else {
                    self.put("</a>");
                }
            }
            NodeType::Image => {
                if entering {
                    self.put("<img src=\"");
                    self.put_url(node);
                    self.put("\" alt=\"");
                    self.plain = Some(node);
                } else {
                    let title = arena.title(node).unwrap_or_default();
                    if !title.is_empty() {
                        self.put("\" title=\"");
                        self.escape(title);
                    }
                    self.put("\" />");
                }
            }
            NodeType::FootnoteReference => {
                if let NodeData::FootnoteReference(reference) = arena.data(node) {
                    self.put("<sup class=\"footnote-ref\"><a href=\"#fn-");
                    self.escape_href(&reference.label);
                    self.put("\" id=\"fnref-");
                    self.escape_href(&reference.label);
                    if reference.ref_index > 1 {
                        self.put(&format!("-{}", reference.ref_index));
                    }
                    self.put(&format!(
                        "\" data-footnote-ref>{}</a></sup>",
                        reference.ordinal
                    ));
                }
            }
        }
    }

    /// Alt text of an image: literal text only, breaks become spaces.
    fn render_plain(&mut self, node: NodeId) {
        match self.arena.node_type(node) {
            NodeType::Text | NodeType::Code | NodeType::HtmlInline => {
                self.escape(self.arena.literal(node).unwrap_or_default());
            }
            NodeType::SoftBreak | NodeType::LineBreak => self.put(" "),
            _ => {}
        }
    }

    fn put_custom(&mut self, node: NodeId, entering: bool) {
        let markup = if entering {
            self.arena.on_enter(node)
        } else {
            self.arena.on_exit(node)
        };
        self.put(markup.unwrap_or_default());
    }

    fn put_url(&mut self, node: NodeId) {
        let url = self.arena.url(node).unwrap_or_default();
        if !(self.options.safe && is_dangerous_url(url)) {
            self.escape_href(url);
        }
    }

    fn render_list(&mut self, node: NodeId, entering: bool) {
        let NodeData::List(list) = self.arena.data(node) else {
            return;
        };
        let ordered = list.list_type == ListType::Ordered;
        if entering {
            self.cr();
            if !ordered {
                self.put("<ul");
            } else if list.start == 1 {
                self.put("<ol");
            } else {
                self.put(&format!("<ol start=\"{}\"", list.start));
            }
            self.sourcepos(node);
            self.put(">\n");
        } else {
            self.put(if ordered { "</ol>\n" } else { "</ul>\n" });
        }
    }

    fn render_header(&mut self, node: NodeId, entering: bool) {
        let level = self.arena.header_level(node).unwrap_or(1);
        if entering {
            self.cr();
            if self.options.ids {
                self.close_sections(level);
                let anchor = self.headings.anchor_for(self.arena, node);
                self.put("<section id=\"");
                self.escape(&anchor);
                self.put("\">");
                self.sections.push(level);
            }
            self.put(&format!("<h{level}"));
            self.sourcepos(node);
            self.put(">");
        } else {
            self.put(&format!("</h{level}>\n"));
        }
    }

    fn render_code_block(&mut self, node: NodeId) {
        self.cr();
        let info = self.arena.fence_info(node).unwrap_or_default();

        if info.is_empty() {
            self.put("<pre");
            self.sourcepos(node);
            self.put("><code>");
        } else {
            let first_tag = info
                .find(|c: char| c.is_ascii_whitespace())
                .unwrap_or(info.len());
            let (lang, meta) = (&info[..first_tag], info.get(first_tag + 1..));
            let meta = meta.filter(|_| self.options.full_info_string);

            if self.options.github_pre_lang {
                self.put("<pre");
                self.sourcepos(node);
                self.put(" lang=\"");
                self.escape(lang);
                if let Some(meta) = meta {
                    self.put("\" data-meta=\"");
                    self.escape(meta);
                }
                self.put("\"><code>");
            } else {
                self.put("<pre");
                self.sourcepos(node);
                self.put("><code class=\"language-");
                self.escape(lang);
                if let Some(meta) = meta {
                    self.put("\" data-meta=\"");
                    self.escape(meta);
                }
                self.put("\">");
            }
        }

        self.escape(self.arena.literal(node).unwrap_or_default());
        self.put("</code></pre>\n");
    }

    fn render_paragraph(&mut self, node: NodeId, entering: bool) {
        let arena = self.arena;
        let parent = arena.parent(node);
        let tight = parent
            .and_then(|parent| arena.parent(parent))
            .and_then(|grandparent| arena.list_tight(grandparent))
            .unwrap_or(false);
        if tight {
            return;
        }

        if entering {
            self.cr();
            self.put("<p");
            self.sourcepos(node);
            self.put(">");
        } else {
            if let Some(definition) = parent.filter(|&parent| {
                arena.node_type(parent) == NodeType::FootnoteDefinition
                    && arena.next(node).is_none()
            }) {
                self.put(" ");
                self.put_footnote_backref(definition);
            }
            self.put("</p>\n");
        }
    }

    fn render_footnote_definition(&mut self, node: NodeId, entering: bool) {
        let NodeData::FootnoteDefinition(definition) = self.arena.data(node) else {
            return;
        };
        if entering {
            if self.footnote_ix == 0 {
                if !self.sections.is_empty() {
                    self.close_sections(0);
                    self.cr();
                }
                self.put("<section class=\"footnotes\" data-footnotes>\n<ol>\n");
            }
            self.footnote_ix += 1;
            self.put("<li id=\"fn-");
            self.escape_href(&definition.label);
            self.put("\">\n");
        } else {
            if self.put_footnote_backref(node) {
                self.put("\n");
            }
            self.put("</li>\n");
        }
    }

    /// Writes the back-references of the current footnote, once per
    /// definition. Returns whether anything was written.
    fn put_footnote_backref(&mut self, node: NodeId) -> bool {
        if self.written_footnote_ix >= self.footnote_ix {
            return false;
        }
        self.written_footnote_ix = self.footnote_ix;

        let NodeData::FootnoteDefinition(definition) = self.arena.data(node) else {
            return false;
        };
        let m = self.written_footnote_ix;

        self.put("<a href=\"#fnref-");
        self.escape_href(&definition.label);
        self.put(&format!(
            "\" class=\"footnote-backref\" data-footnote-backref data-footnote-backref-idx=\"{m}\" aria-label=\"Back to reference {m}\">↩</a>"
        ));

        for n in 2..=definition.reference_count {
            self.put(" <a href=\"#fnref-");
            self.escape_href(&definition.label);
            self.put(&format!(
                "-{n}\" class=\"footnote-backref\" data-footnote-backref data-footnote-backref-idx=\"{m}-{n}\" aria-label=\"Back to reference {m}-{n}\">↩<sup class=\"footnote-ref\">{n}</sup></a>"
            ));
        }

        true
    }

    fn render_table(&mut self, node: NodeId, entering: bool) {
        if entering {
            self.cr();
            self.put("<table");
            self.sourcepos(node);
            self.put(">");
            self.need_closing_table_body = false;
        } else {
            if self.need_closing_table_body {
                self.cr();
                self.put("</tbody>");
                self.cr();
            }
            self.need_closing_table_body = false;
            self.cr();
            self.put("</table>");
            self.cr();
        }
    }

    fn render_table_row(&mut self, node: NodeId, entering: bool) {
        let header = is_header_row(self.arena, node);
        if entering {
            self.cr();
            if header {
                self.put("<thead>");
                self.cr();
            } else if !self.need_closing_table_body {
                self.put("<tbody>");
                self.cr();
                self.need_closing_table_body = true;
            }
            self.put("<tr");
            self.sourcepos(node);
            self.put(">");
        } else {
            self.cr();
            self.put("</tr>");
            if header {
                self.cr();
                self.put("</thead>");
            }
        }
    }

    fn render_table_cell(&mut self, node: NodeId, entering: bool) {
        let arena = self.arena;
        let header = arena
            .parent(node)
            .is_some_and(|row| is_header_row(arena, row));
        if !entering {
            self.put(if header { "</th>" } else { "</td>" });
            return;
        }

        self.cr();
        self.put(if header { "<th" } else { "<td" });

        let align = match cell_alignment(arena, node) {
            Alignment::None => None,
            Alignment::Left => Some("left"),
            Alignment::Center => Some("center"),
            Alignment::Right => Some("right"),
        };
        if let Some(align) = align {
            if self.options.table_prefer_style_attributes {
                self.put(&format!(" style=\"text-align: {align}\""));
            } else {
                self.put(&format!(" align=\"{align}\""));
            }
        }

        self.sourcepos(node);
        self.put(">");
    }
}

fn is_header_row(arena: &Arena, row: NodeId) -> bool {
    matches!(arena.data(row), NodeData::TableRow(data) if data.header)
}

/// Alignment of the column a cell sits in.
fn cell_alignment(arena: &Arena, cell: NodeId) -> Alignment {
    let Some(row) = arena.parent(cell) else {
        return Alignment::None;
    };
    let Some(NodeData::Table(table)) = arena.parent(row).map(|table| arena.data(table)) else {
        return Alignment::None;
    };
    arena
        .children(row)
        .position(|child| child == cell)
        .and_then(|column| table.alignments.get(column).copied())
        .unwrap_or_default()
}
