//! Source position types.
//!
//! Positions follow the cmark convention: lines and columns are 1-indexed and
//! the end column is inclusive (it points at the last character of the node).
//! Nodes created by hand rather than by a parser carry an all-zero position.

use serde::{Deserialize, Serialize};

/// A point in source text.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Position {
    /// Line number (1-indexed).
    pub line: u32,
    /// Column number (1-indexed).
    pub column: u32,
}

impl Position {
    /// Creates a new position.
    #[inline]
    pub const fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

/// The source range a node was parsed from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourcePosition {
    /// First character of the node.
    pub start: Position,
    /// Last character of the node (inclusive).
    pub end: Position,
}

impl SourcePosition {
    /// Creates a new source position.
    ///
    /// The end line is never allowed to precede the start line; a smaller
    /// value is raised to the start line.
    #[inline]
    pub const fn new(start: Position, end: Position) -> Self {
        let end = if end.line < start.line {
            Position::new(start.line, end.column)
        } else {
            end
        };
        Self { start, end }
    }

    /// Creates a position from its four components.
    #[inline]
    pub const fn from_lines(
        start_line: u32,
        start_column: u32,
        end_line: u32,
        end_column: u32,
    ) -> Self {
        Self::new(
            Position::new(start_line, start_column),
            Position::new(end_line, end_column),
        )
    }

    #[inline]
    pub const fn start_line(&self) -> u32 {
        self.start.line
    }

    #[inline]
    pub const fn start_column(&self) -> u32 {
        self.start.column
    }

    #[inline]
    pub const fn end_line(&self) -> u32 {
        self.end.line
    }

    #[inline]
    pub const fn end_column(&self) -> u32 {
        self.end.column
    }

    /// Returns true if the node was not produced by a parser.
    #[inline]
    pub const fn is_unknown(&self) -> bool {
        self.start.line == 0
    }

    /// Number of source lines covered by the node.
    #[inline]
    pub const fn line_count(&self) -> u32 {
        self.end.line - self.start.line + 1
    }
}

impl std::fmt::Display for SourcePosition {
    /// Formats as `start_line:start_column-end_line:end_column`, the form
    /// used by `data-sourcepos` attributes.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}-{}:{}",
            self.start.line, self.start.column, self.end.line, self.end.column
        )
    }
}
