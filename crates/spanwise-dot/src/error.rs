//! GraphViz error types

use thiserror::Error;

/// Result type alias for GraphViz operations
pub type DotResult<T> = std::result::Result<T, DotError>;

/// GraphViz import/export errors
#[derive(Error, Debug)]
pub enum DotError {
    #[error("Parse error on line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("Missing graph header: expected 'graph' or 'digraph'")]
    MissingHeader,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl DotError {
    pub(crate) fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }
}
