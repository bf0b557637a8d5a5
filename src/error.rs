//! Error types for header analysis

use thiserror::Error;

/// Errors that abort an analysis
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The header block violates field or folding syntax
    #[error("Malformed header block at line {line}: {reason}")]
    Header { line: usize, reason: String },

    /// A timestamp matched none of the known date formats
    #[error("Invalid date format: {0:?}")]
    Date(String),
}

impl ParseError {
    pub(crate) fn header(line: usize, reason: impl Into<String>) -> Self {
        Self::Header {
            line,
            reason: reason.into(),
        }
    }

    /// True for errors raised while reading the header block
    #[must_use]
    pub const fn is_header(&self) -> bool {
        matches!(self, Self::Header { .. })
    }

    /// True for errors raised by an unrecognized timestamp
    #[must_use]
    pub const fn is_date(&self) -> bool {
        matches!(self, Self::Date(_))
    }
}

/// Result type for analysis operations
pub type Result<T> = std::result::Result<T, ParseError>;
