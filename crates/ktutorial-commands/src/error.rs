//! Command error types.

use ktutorial_model::{ReactionKey, StepKey};
use thiserror::Error;

/// Failure to apply or revert a command against a tutorial.
///
/// Commands address their subject by key, so these errors mean the tutorial
/// passed in is not the one the command was built for, or that it changed
/// outside the undo history.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("{0} is not part of the tutorial")]
    StepNotFound(StepKey),

    #[error("{0} is not part of the tutorial")]
    ReactionNotFound(ReactionKey),

    /// The command does not hold the entity it has to attach.
    #[error("{command}: nothing to apply")]
    NothingToApply { command: String },

    /// A remembered position no longer exists in the container.
    #[error("index {index} is out of range for a container of {len} elements")]
    IndexOutOfRange { index: usize, len: usize },
}

pub type Result<T> = std::result::Result<T, CommandError>;
