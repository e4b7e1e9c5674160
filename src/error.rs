//! Error types and result aliases for csarrange.
//!
//! The core fails fast: none of these errors are retried internally. The
//! caller decides whether to skip a file, abort a batch, or report.

use thiserror::Error;

/// Errors surfaced by the parse/arrange/write pipeline.
#[derive(Debug, Error)]
pub enum ArrangeError {
    /// Source text did not match any known grammar production.
    #[error("parse error at line {line}, column {column}: {message}")]
    Parse {
        line: usize,
        column: usize,
        message: String,
    },

    /// A required input was absent or empty where content is mandatory.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A configuration value was outside its recognized set when needed.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// An operation was requested in a state that cannot support it,
    /// e.g. arranging a root element with no applicable arranger.
    #[error("invalid operation: {0}")]
    InvalidOperation(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl ArrangeError {
    /// Construct a parse error at the given 1-based position.
    pub fn parse(line: usize, column: usize, message: impl Into<String>) -> Self {
        ArrangeError::Parse {
            line,
            column,
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ArrangeError>;
