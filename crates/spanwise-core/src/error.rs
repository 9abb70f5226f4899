//! Error types for Spanwise Core

use thiserror::Error;

/// Result type alias using Spanwise's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Spanwise error types
#[derive(Error, Debug)]
pub enum Error {
    #[error("Unknown node: {0}")]
    UnknownNode(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
