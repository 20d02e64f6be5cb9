//! Tutorial loading.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use ktutorial_model::Tutorial;
use ktutorial_xml::read_tutorial;

use crate::error::{PersistenceError, Result};

/// Load a tutorial from an XML file.
pub fn load_tutorial(path: &Path) -> Result<Tutorial> {
    if path.file_name().is_none() || path.is_dir() {
        return Err(PersistenceError::Io {
            operation: "read",
            path: path.to_path_buf(),
            source: std::io::Error::from(ErrorKind::IsADirectory),
        });
    }

    let bytes = fs::read(path).map_err(|e| PersistenceError::Io {
        operation: "read",
        path: path.to_path_buf(),
        source: e,
    })?;
    let text = String::from_utf8(bytes).map_err(|e| PersistenceError::Encoding {
        path: path.to_path_buf(),
        source: e,
    })?;

    let tutorial = read_tutorial(&text).map_err(|e| PersistenceError::Deserialization {
        path: path.to_path_buf(),
        source: e,
    })?;

    tracing::info!(
        steps = tutorial.steps().len(),
        "Loaded tutorial from {}",
        path.display()
    );
    Ok(tutorial)
}
