//! Enumerations stored as string literals in tutorial files.
//!
//! The literal tables here are the ones used by the XML format; parsing is
//! exact, there is no case folding or prefix matching.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;

/// What makes a reaction fire.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TriggerType {
    /// The user selected the reaction's option.
    #[default]
    OptionSelected,
    /// The reaction's condition was met.
    ConditionMet,
}

impl TriggerType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TriggerType::OptionSelected => "OptionSelected",
            TriggerType::ConditionMet => "ConditionMet",
        }
    }
}

impl fmt::Display for TriggerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TriggerType {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "OptionSelected" => Ok(TriggerType::OptionSelected),
            "ConditionMet" => Ok(TriggerType::ConditionMet),
            _ => Err(ModelError::UnknownLiteral {
                kind: "trigger type",
                value: s.to_string(),
            }),
        }
    }
}

/// What a reaction does once it fires.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResponseType {
    /// Change to the step named by the reaction.
    #[default]
    NextStep,
    /// Run the reaction's custom code.
    CustomCode,
}

impl ResponseType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseType::NextStep => "NextStep",
            ResponseType::CustomCode => "CustomCode",
        }
    }
}

impl fmt::Display for ResponseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResponseType {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "NextStep" => Ok(ResponseType::NextStep),
            "CustomCode" => Ok(ResponseType::CustomCode),
            _ => Err(ModelError::UnknownLiteral {
                kind: "response type",
                value: s.to_string(),
            }),
        }
    }
}

/// Logical operator of a composed condition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompositionType {
    #[default]
    And,
    Or,
}

impl CompositionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CompositionType::And => "And",
            CompositionType::Or => "Or",
        }
    }
}

impl fmt::Display for CompositionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CompositionType {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "And" => Ok(CompositionType::And),
            "Or" => Ok(CompositionType::Or),
            _ => Err(ModelError::UnknownLiteral {
                kind: "composition type",
                value: s.to_string(),
            }),
        }
    }
}
