use std::fmt;
use std::str::FromStr;

use ktutorial_model::Tutorial;
use serde::{Deserialize, Serialize};

use crate::error::ExportError;
use crate::javascript::{ERROR_MARKER, export_javascript};

/// Script language a tutorial can be exported to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ExporterType {
    #[default]
    Javascript,
}

impl ExporterType {
    /// Every exporter, the default one first.
    pub const ALL: &'static [ExporterType] = &[ExporterType::Javascript];

    /// File name pattern of the exported files.
    pub fn filter(&self) -> &'static str {
        match self {
            Self::Javascript => "*.js",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Javascript => "JavaScript file",
        }
    }

    /// File extension, without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Javascript => "js",
        }
    }

    /// Look up the exporter whose pattern is `filter`.
    pub fn from_filter(filter: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|exporter| exporter.filter() == filter)
    }

    pub fn export(&self, tutorial: &Tutorial) -> String {
        match self {
            Self::Javascript => export_javascript(tutorial),
        }
    }
}

impl fmt::Display for ExporterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}|{}", self.filter(), self.label())
    }
}

impl FromStr for ExporterType {
    type Err = ExportError;

    /// Accepts either the bare pattern (`*.js`) or a full `pattern|label`
    /// entry.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let filter = s.split_once('|').map_or(s, |(filter, _)| filter);
        Self::from_filter(filter).ok_or_else(|| ExportError::UnknownType {
            filter: s.to_string(),
        })
    }
}

/// `pattern|label` entries of the available exporters, the default first.
pub fn available_exporter_types() -> Vec<String> {
    ExporterType::ALL
        .iter()
        .map(ToString::to_string)
        .collect()
}

/// Messages of every error marker in an exported script, in order.
pub fn export_errors(script: &str) -> Vec<String> {
    script
        .lines()
        .filter_map(|line| line.trim_start().strip_prefix(ERROR_MARKER))
        .map(str::to_string)
        .collect()
}
