//! Serialization error types.

use thiserror::Error;

/// A tutorial document could not be read.
///
/// The reader stops at the first error; no partial tutorial is returned.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DeserializationError {
    /// The input is not well-formed XML.
    #[error("XML document is not well formed: {message}, line {line}, column {column}")]
    Malformed {
        message: String,
        line: usize,
        column: usize,
    },

    /// The root element is not `tutorial`.
    #[error("Unknown root element, tutorial expected, got: {found}")]
    UnexpectedRoot { found: String },
}

/// Writing the XML document failed.
#[derive(Debug, Error)]
#[error("Failed to write tutorial XML: {message}")]
pub struct SerializationError {
    message: String,
}

impl From<anyhow::Error> for SerializationError {
    fn from(error: anyhow::Error) -> Self {
        Self {
            message: format!("{error:#}"),
        }
    }
}
