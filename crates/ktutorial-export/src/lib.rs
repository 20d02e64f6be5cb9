//! Exporters turning a tutorial into a script for the KTutorial runtime.
//!
//! Exporting never fails. Data the runtime needs but the tutorial lacks is
//! reported inline as `//Error: ` comments, which [`export_errors`] collects.

pub mod error;
pub mod exporter;
pub mod javascript;
pub mod markup;

pub use error::ExportError;
pub use exporter::{ExporterType, available_exporter_types, export_errors};
pub use javascript::{ERROR_MARKER, JavascriptExporter, export_javascript};
