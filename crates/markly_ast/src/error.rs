//! Error types for attribute access.

use thiserror::Error;

use crate::NodeType;

/// Errors raised when setting a node attribute.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AttributeError {
    /// The node type does not carry the attribute.
    #[error("{attribute} is not available on {found} nodes (expected {expected})")]
    WrongType {
        attribute: &'static str,
        expected: &'static str,
        found: NodeType,
    },

    /// The value is outside the attribute's domain.
    #[error("{attribute} must be between {min} and {max}, got {value}")]
    OutOfRange {
        attribute: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },
}

impl AttributeError {
    pub fn wrong_type(attribute: &'static str, expected: &'static str, found: NodeType) -> Self {
        Self::WrongType {
            attribute,
            expected,
            found,
        }
    }

    pub fn out_of_range(attribute: &'static str, value: i64, min: i64, max: i64) -> Self {
        Self::OutOfRange {
            attribute,
            value,
            min,
            max,
        }
    }
}
