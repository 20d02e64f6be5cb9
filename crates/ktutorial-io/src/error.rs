//! Persistence error types.
//!
//! All file operations return structured errors that provide user-friendly
//! messages and optional remediation hints.

use std::path::PathBuf;
use std::string::FromUtf8Error;

use ktutorial_xml::{DeserializationError, SerializationError};
use thiserror::Error;

/// File operation error.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// File I/O error.
    #[error("Failed to {operation} file: {path}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not a tutorial document.
    #[error("Failed to read tutorial from {path}: {source}")]
    Deserialization {
        path: PathBuf,
        #[source]
        source: DeserializationError,
    },

    /// The file is not valid UTF-8.
    #[error("Tutorial file is not valid UTF-8: {path}")]
    Encoding {
        path: PathBuf,
        #[source]
        source: FromUtf8Error,
    },

    /// The tutorial could not be turned into XML.
    #[error("Failed to serialize tutorial")]
    Serialization {
        #[source]
        source: SerializationError,
    },

    /// Atomic write failed (temp file couldn't be renamed).
    #[error("Failed to complete save operation")]
    AtomicWriteFailed {
        temp_path: PathBuf,
        target_path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl PersistenceError {
    /// Get a user-friendly message for this error.
    pub fn user_message(&self) -> String {
        match self {
            Self::Io {
                operation, path, ..
            } => {
                format!("Could not {} the file at {}", operation, path.display())
            }
            Self::Deserialization { path, source } => {
                format!("The file at {} could not be loaded: {}", path.display(), source)
            }
            Self::Encoding { path, .. } => {
                format!("The file at {} is not a UTF-8 text file.", path.display())
            }
            Self::Serialization { .. } => {
                "An error occurred while writing the tutorial.".to_string()
            }
            Self::AtomicWriteFailed { target_path, .. } => {
                format!(
                    "Could not save the file to {}. Please check disk space and permissions.",
                    target_path.display()
                )
            }
        }
    }

    /// Get a suggestion for how to resolve this error.
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::Io { operation, .. } => {
                if *operation == "read" {
                    Some("Check that the file exists and you have permission to read it.".into())
                } else {
                    Some("Check that you have permission to write to this location.".into())
                }
            }
            Self::Deserialization { source, .. } => match source {
                DeserializationError::Malformed { .. } => {
                    Some("Fix the XML syntax at the reported position.".into())
                }
                DeserializationError::UnexpectedRoot { .. } => {
                    Some("Make sure you selected a tutorial file.".into())
                }
            },
            Self::Encoding { .. } => Some("Save the file with UTF-8 encoding.".into()),
            Self::Serialization { .. } => None,
            Self::AtomicWriteFailed { .. } => {
                Some("Free up disk space or try saving to a different location.".into())
            }
        }
    }
}

/// Result type alias for persistence operations.
pub type Result<T> = std::result::Result<T, PersistenceError>;
