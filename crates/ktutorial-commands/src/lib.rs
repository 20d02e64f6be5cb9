//! Undoable edits of a KTutorial document.
//!
//! Every change to a [`Tutorial`](ktutorial_model::Tutorial) made by an
//! editor goes through a [`Command`]. Commands refer to steps and reactions
//! by key and resolve them against the tutorial they are applied to, so the
//! history never borrows from the document.
//!
//! The factory functions in [`tutorial_commands`], [`step_commands`] and
//! [`reaction_commands`] build one command per settable field and per
//! structural edit.

pub mod command;
pub mod error;
pub mod group;
pub mod reaction_commands;
pub mod stack;
pub mod step_commands;
pub mod tutorial_commands;

pub use command::Command;
pub use error::{CommandError, Result};
pub use group::CommandGroup;
pub use reaction_commands::{ReactionValue, SetReactionField};
pub use stack::UndoStack;
pub use step_commands::{AddReaction, RemoveReaction, SetStepField, StepField};
pub use tutorial_commands::{AddStep, RemoveStep, SetTutorialField, TutorialField};
