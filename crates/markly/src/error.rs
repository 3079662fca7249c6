//! Error types.

use markly_parser::ParseError;
use thiserror::Error;

/// Errors returned by the markly entry points.
#[derive(Debug, Error)]
pub enum Error {
    /// Source text could not be parsed.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
