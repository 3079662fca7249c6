//! Parse error types.

use thiserror::Error;

/// Errors that can occur while building a document tree.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The source text could not be parsed.
    #[error("Invalid source: {message}")]
    InvalidSource {
        /// Error message from the Markdown grammar.
        message: String,
        /// Line where the error occurred, when known.
        line: Option<usize>,
    },

    /// An option or extension is not supported.
    #[error("Unsupported option: {0}")]
    Unsupported(String),

    /// The grammar produced a tree that could not be converted.
    #[error("Internal parser error: {0}")]
    Internal(String),
}

impl ParseError {
    /// Creates a new invalid source error.
    pub fn invalid_source(message: impl Into<String>) -> Self {
        Self::InvalidSource {
            message: message.into(),
            line: None,
        }
    }

    /// Creates a new invalid source error pointing at a line.
    pub fn invalid_source_at(message: impl Into<String>, line: usize) -> Self {
        Self::InvalidSource {
            message: message.into(),
            line: Some(line),
        }
    }

    /// Creates a new unsupported option error.
    pub fn unsupported(option: impl Into<String>) -> Self {
        Self::Unsupported(option.into())
    }

    /// Creates a new internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(
            ParseError::invalid_source("bad").to_string(),
            "Invalid source: bad"
        );
        assert_eq!(
            ParseError::unsupported("unknown extension: emoji").to_string(),
            "Unsupported option: unknown extension: emoji"
        );
        assert_eq!(
            ParseError::internal("boom").to_string(),
            "Internal parser error: boom"
        );
    }

    #[test]
    fn test_invalid_source_at_keeps_line() {
        match ParseError::invalid_source_at("bad", 3) {
            ParseError::InvalidSource { line, .. } => assert_eq!(line, Some(3)),
            other => panic!("Expected InvalidSource, got {other:?}"),
        }
    }
}
