//! Tutorial saving and exporting.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use ktutorial_export::ExporterType;
use ktutorial_model::Tutorial;
use ktutorial_xml::write_tutorial;

use crate::error::{PersistenceError, Result};

/// Save a tutorial to an XML file.
///
/// Uses atomic write (temp file + rename) so an interrupted save never
/// leaves a truncated tutorial behind.
pub fn save_tutorial(tutorial: &Tutorial, path: &Path) -> Result<()> {
    let xml =
        write_tutorial(tutorial).map_err(|e| PersistenceError::Serialization { source: e })?;
    write_atomically(path, xml.as_bytes())?;

    tracing::info!(
        steps = tutorial.steps().len(),
        "Saved tutorial to {}",
        path.display()
    );
    Ok(())
}

/// Export a tutorial as a script file and return the written script.
///
/// Incomplete tutorials are still exported; the script carries error
/// markers for the missing data.
pub fn export_tutorial(
    tutorial: &Tutorial,
    exporter: ExporterType,
    path: &Path,
) -> Result<String> {
    let script = exporter.export(tutorial);
    write_atomically(path, script.as_bytes())?;

    tracing::info!(exporter = %exporter, "Exported tutorial to {}", path.display());
    Ok(script)
}

fn write_atomically(path: &Path, bytes: &[u8]) -> Result<()> {
    let Some(file_name) = path.file_name() else {
        return Err(PersistenceError::Io {
            operation: "write",
            path: path.to_path_buf(),
            source: std::io::Error::from(ErrorKind::IsADirectory),
        });
    };
    let temp_path = temp_path_for(path, file_name.to_os_string());

    // Create parent directory if needed
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| PersistenceError::Io {
            operation: "create directory",
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    let mut file = File::create(&temp_path).map_err(|e| PersistenceError::Io {
        operation: "create",
        path: temp_path.clone(),
        source: e,
    })?;

    file.write_all(bytes).map_err(|e| PersistenceError::Io {
        operation: "write",
        path: temp_path.clone(),
        source: e,
    })?;

    file.sync_all().map_err(|e| PersistenceError::Io {
        operation: "sync",
        path: temp_path.clone(),
        source: e,
    })?;
    drop(file);

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        PersistenceError::AtomicWriteFailed {
            temp_path: temp_path.clone(),
            target_path: path.to_path_buf(),
            source: e,
        }
    })?;

    tracing::debug!(bytes = bytes.len(), "Wrote {}", path.display());
    Ok(())
}

fn temp_path_for(path: &Path, mut file_name: OsString) -> PathBuf {
    file_name.push(".tmp");
    path.with_file_name(file_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_temp_path_sits_next_to_target() {
        let path = Path::new("/data/tutorial.xml");
        assert_eq!(
            temp_path_for(path, OsString::from("tutorial.xml")),
            PathBuf::from("/data/tutorial.xml.tmp")
        );
    }

    #[test]
    fn test_save_creates_parent_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("deeper").join("tutorial.xml");

        save_tutorial(&Tutorial::new(), &path).unwrap();

        assert!(path.exists());
        assert!(!path.with_file_name("tutorial.xml.tmp").exists());
        let text = fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("<?xml"));
    }

    #[test]
    fn test_save_replaces_existing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tutorial.xml");
        fs::write(&path, "old content").unwrap();

        let mut tutorial = Tutorial::new();
        tutorial.set_name("New");
        save_tutorial(&tutorial, &path).unwrap();

        assert!(fs::read_to_string(&path).unwrap().contains("name=\"New\""));
    }

    #[test]
    fn test_save_to_directory_path_fails() {
        let dir = tempdir().unwrap();
        let error = save_tutorial(&Tutorial::new(), &dir.path().join("..")).unwrap_err();
        assert!(matches!(error, PersistenceError::Io { operation: "write", .. }));
    }
}
