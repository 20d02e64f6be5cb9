//! Document model of a KTutorial tutorial.
//!
//! A [`Tutorial`] owns its [`Step`]s, a step owns its [`Reaction`]s, and a
//! reaction owns the [`WaitFor`] condition tree it reacts to. Steps and
//! reactions carry a process-unique key so commands and views can refer to
//! them without holding references into the tree.

pub mod enums;
pub mod error;
pub mod keys;
pub mod naming;
pub mod observer;
pub mod reaction;
pub mod step;
pub mod tutorial;
pub mod wait_for;

pub use enums::{CompositionType, ResponseType, TriggerType};
pub use error::{ModelError, Result};
pub use keys::{ReactionKey, StepKey};
pub use observer::{
    ConditionChange, ObserverId, Observers, ReactionChange, StepChange, TutorialChange,
};
pub use reaction::Reaction;
pub use step::Step;
pub use tutorial::Tutorial;
pub use wait_for::{
    WaitFor, WaitForComposed, WaitForEvent, WaitForNot, WaitForProperty, WaitForSignal,
    WaitForStepActivation, WaitForWindow,
};
