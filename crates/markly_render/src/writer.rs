//! Line-oriented output shared by the Markdown and plaintext renderers.
//!
//! The writer keeps a line prefix (block quote markers, list indentation)
//! that is written at the start of every line, defers newlines until the
//! next output so that trailing blank lines never appear, and optionally
//! wraps text at a fixed width.

use markly_ast::{Arena, ItemData, ListType, NodeData, NodeId, NodeType, WalkEvent};

/// How characters of an output string are escaped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Escaping {
    /// Written as is.
    Literal,
    /// Inline text: Markdown syntax characters are escaped.
    Normal,
    /// Link destination.
    Url,
    /// Link title inside double quotes.
    Title,
}

/// Output syntax, which decides how escaping is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Syntax {
    CommonMark,
    Plain,
}

#[derive(Debug)]
pub(crate) struct Writer {
    syntax: Syntax,
    buffer: String,
    prefix: String,
    column: usize,
    width: usize,
    /// Pending line endings: 1 ends the line, 2 also leaves a blank line.
    need_cr: u8,
    /// Byte offset of the last space where a line may be wrapped.
    last_breakable: usize,
    begin_line: bool,
    /// Still at the start of a block's content (digits excepted), where list
    /// and heading markers would be recognised.
    begin_content: bool,
    pub(crate) no_linebreaks: bool,
    in_tight_list_item: bool,
    /// Inside a table cell, where `|` must be escaped.
    pub(crate) escape_pipes: bool,
}

impl Writer {
    pub(crate) fn new(syntax: Syntax, width: usize) -> Self {
        Self {
            syntax,
            buffer: String::new(),
            prefix: String::new(),
            column: 0,
            width,
            need_cr: 0,
            last_breakable: 0,
            begin_line: true,
            begin_content: true,
            no_linebreaks: false,
            in_tight_list_item: false,
            escape_pipes: false,
        }
    }

    /// Ends the current line before the next output.
    pub(crate) fn cr(&mut self) {
        self.need_cr = self.need_cr.max(1);
    }

    /// Leaves a blank line before the next output.
    pub(crate) fn blankline(&mut self) {
        self.need_cr = self.need_cr.max(2);
    }

    pub(crate) fn begin_content(&mut self) {
        self.begin_content = true;
    }

    pub(crate) fn push_prefix(&mut self, prefix: &str) {
        self.prefix.push_str(prefix);
    }

    pub(crate) fn truncate_prefix(&mut self, len: usize) {
        let keep = self.prefix.len().saturating_sub(len);
        self.prefix.truncate(keep);
    }

    /// Writes `text` without escaping or wrapping.
    pub(crate) fn lit(&mut self, text: &str) {
        self.out(text, false, Escaping::Literal);
    }

    /// Writes `text`, flushing pending line endings first.
    pub(crate) fn out(&mut self, text: &str, wrap: bool, escaping: Escaping) {
        let wrap = wrap && !self.no_linebreaks;

        if self.in_tight_list_item && self.need_cr > 1 {
            self.need_cr = 1;
        }
        self.flush_line_endings();

        let chars: Vec<char> = text.chars().collect();
        let mut i = 0;
        while i < chars.len() {
            if self.begin_line {
                self.buffer.push_str(&self.prefix);
                self.column = self.prefix.len();
            }

            let c = chars[i];
            let next = chars.get(i + 1).copied();

            if self.escape_pipes && c == '|' {
                self.buffer.push('\\');
            }

            if c == ' ' && wrap {
                if !self.begin_line {
                    let last_nonspace = self.buffer.len();
                    self.buffer.push(' ');
                    self.column += 1;
                    self.begin_line = false;
                    self.begin_content = false;
                    while chars.get(i + 1) == Some(&' ') {
                        i += 1;
                    }
                    // A wrapped line must not start with a digit, which
                    // could turn into an ordered list marker.
                    if !chars.get(i + 1).is_some_and(char::is_ascii_digit) {
                        self.last_breakable = last_nonspace;
                    }
                }
            } else if escaping == Escaping::Literal {
                if c == '\n' {
                    self.buffer.push('\n');
                    self.column = 0;
                    self.begin_line = true;
                    self.begin_content = true;
                    self.last_breakable = 0;
                } else {
                    self.buffer.push(c);
                    self.column += 1;
                    self.begin_line = false;
                    self.begin_content = self.begin_content && c.is_ascii_digit();
                }
            } else {
                self.put_escaped(escaping, c, next);
                self.begin_line = false;
                self.begin_content = self.begin_content && c.is_ascii_digit();
            }

            if self.width > 0
                && self.column > self.width
                && !self.begin_line
                && self.last_breakable > 0
            {
                self.wrap_line();
            }

            i += 1;
        }
    }

    /// Writes pending line endings. The prefix is repeated on blank lines,
    /// without its trailing spaces.
    fn flush_line_endings(&mut self) {
        let mut k = self.buffer.len() as isize - 1;
        while self.need_cr > 0 {
            if k < 0 || self.buffer.as_bytes()[k as usize] == b'\n' {
                k -= 1;
            } else {
                self.buffer.push('\n');
                if self.need_cr > 1 {
                    self.buffer.push_str(self.prefix.trim_end());
                }
            }
            self.column = 0;
            self.last_breakable = 0;
            self.begin_line = true;
            self.begin_content = true;
            self.need_cr -= 1;
        }
    }

    /// Moves everything after the last breakable space to a new line.
    fn wrap_line(&mut self) {
        let remainder = self.buffer.split_off(self.last_breakable + 1);
        self.buffer.truncate(self.last_breakable);
        self.buffer.push('\n');
        self.buffer.push_str(&self.prefix);
        self.column = self.prefix.len() + remainder.chars().count();
        self.buffer.push_str(&remainder);
        self.last_breakable = 0;
        self.begin_line = false;
        self.begin_content = false;
    }

    fn put_escaped(&mut self, escaping: Escaping, c: char, next: Option<char>) {
        if self.syntax == Syntax::Plain || !self.needs_escaping(escaping, c, next) {
            self.buffer.push(c);
            self.column += 1;
        } else if escaping == Escaping::Url && c.is_ascii_whitespace() {
            self.buffer.push_str(&format!("%{:02X}", c as u32));
            self.column += 3;
        } else if c.is_ascii_punctuation() {
            self.buffer.push('\\');
            self.buffer.push(c);
            self.column += 2;
        } else {
            let entity = format!("&#{};", c as u32);
            self.column += entity.len();
            self.buffer.push_str(&entity);
        }
    }

    fn needs_escaping(&self, escaping: Escaping, c: char, next: Option<char>) -> bool {
        if !c.is_ascii() {
            return false;
        }
        let follows_digit = self.buffer.as_bytes().last().is_some_and(u8::is_ascii_digit);
        let next = next.unwrap_or('\0');

        match escaping {
            Escaping::Literal => false,
            Escaping::Normal => {
                c.is_ascii_control()
                    || matches!(c, '*' | '_' | '[' | ']' | '#' | '<' | '>' | '\\' | '`' | '~')
                    || (c == '&' && next.is_ascii_alphabetic())
                    || (c == '!' && next == '[')
                    || (self.begin_content && matches!(c, '-' | '+' | '=') && !follows_digit)
                    || (self.begin_content
                        && matches!(c, '.' | ')')
                        && follows_digit
                        && (next == '\0' || next.is_ascii_whitespace()))
            }
            Escaping::Url => {
                matches!(c, '`' | '<' | '>' | '\\' | ')' | '(') || c.is_ascii_whitespace()
            }
            Escaping::Title => matches!(c, '`' | '<' | '>' | '"' | '\\'),
        }
    }

    /// Tracks whether output is inside a tight list item, where blank lines
    /// are collapsed. Called for every event before the node is rendered.
    pub(crate) fn track_tight_list(&mut self, arena: &Arena, event: WalkEvent) {
        match event {
            WalkEvent::Enter(node) => {
                if let Some(tight) = arena
                    .parent(node)
                    .filter(|&parent| arena.node_type(parent) == NodeType::Item)
                    .and_then(|item| arena.parent(item))
                    .and_then(|list| arena.list_tight(list))
                {
                    self.in_tight_list_item = tight;
                }
            }
            WalkEvent::Exit(node) if arena.node_type(node) == NodeType::List => {
                self.in_tight_list_item = arena
                    .parent(node)
                    .filter(|&parent| arena.node_type(parent) == NodeType::Item)
                    .and_then(|item| arena.parent(item))
                    .and_then(|list| arena.list_tight(list))
                    .unwrap_or(false);
            }
            WalkEvent::Exit(_) => {}
        }
    }

    /// Writes an item's list marker on enter and restores the prefix on exit.
    pub(crate) fn list_item(&mut self, arena: &Arena, item: NodeId, entering: bool) {
        let marker = item_marker(arena, item);
        if entering {
            self.lit(&marker);
            self.begin_content = true;
            self.prefix.extend(std::iter::repeat_n(' ', marker.len()));
        } else {
            self.truncate_prefix(marker.len());
            self.cr();
        }
    }

    /// Returns the output. Block-level output always ends with a newline.
    pub(crate) fn finish(mut self, block: bool) -> String {
        if block && !self.buffer.ends_with('\n') {
            self.buffer.push('\n');
        }
        self.buffer
    }
}

/// The marker for a list item, padded to its continuation indent.
fn item_marker(arena: &Arena, item: NodeId) -> String {
    let Some(NodeData::List(list)) = arena.parent(item).map(|list| arena.data(list)) else {
        return "  - ".to_string();
    };
    if list.list_type == ListType::Bullet {
        return "  - ".to_string();
    }

    let number = match arena.data(item) {
        NodeData::Item(ItemData {
            number: Some(number),
            ..
        }) => *number,
        _ => {
            let offset = std::iter::successors(arena.previous(item), |&prev| arena.previous(prev))
                .count() as u32;
            list.start + offset
        }
    };
    let padding = if number < 10 { "  " } else { " " };
    format!("{number}{}{padding}", list.delimiter.as_char())
}

/// Length of the longest run of backticks in `code`.
pub(crate) fn longest_backtick_run(code: &str) -> usize {
    backtick_runs(code).max().unwrap_or(0)
}

/// Smallest backtick run length that does not occur in `code`.
pub(crate) fn shortest_unused_backtick_run(code: &str) -> usize {
    let runs: Vec<usize> = backtick_runs(code).collect();
    (1..).find(|n| !runs.contains(n)).unwrap_or(1)
}

fn backtick_runs(code: &str) -> impl Iterator<Item = usize> + '_ {
    code.split(|c| c != '`')
        .map(str::len)
        .filter(|&len| len > 0)
}
