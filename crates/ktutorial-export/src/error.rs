use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExportError {
    #[error("Unknown exporter type: {filter}")]
    UnknownType { filter: String },
}
