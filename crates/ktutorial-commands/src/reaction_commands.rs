//! Commands editing a reaction.

use ktutorial_model::{Reaction, ReactionKey, ResponseType, TriggerType, Tutorial, WaitFor};

use crate::command::Command;
use crate::error::{CommandError, Result};

/// New value for one field of a reaction.
#[derive(Debug, Clone, PartialEq)]
pub enum ReactionValue {
    TriggerType(TriggerType),
    OptionName(String),
    WaitFor(Option<WaitFor>),
    ResponseType(ResponseType),
    NextStepId(String),
    CustomCode(String),
}

impl ReactionValue {
    pub fn label(&self) -> &'static str {
        match self {
            ReactionValue::TriggerType(_) => "Set reaction trigger type",
            ReactionValue::OptionName(_) => "Set reaction option name",
            ReactionValue::WaitFor(_) => "Set reaction condition to wait for",
            ReactionValue::ResponseType(_) => "Set reaction response type",
            ReactionValue::NextStepId(_) => "Set reaction next step id",
            ReactionValue::CustomCode(_) => "Set reaction custom code",
        }
    }

    /// Store this value in the reaction and keep the one it replaces.
    fn exchange(&mut self, reaction: &mut Reaction) {
        match self {
            ReactionValue::TriggerType(value) => {
                let previous = reaction.trigger_type();
                reaction.set_trigger_type(*value);
                *value = previous;
            }
            ReactionValue::OptionName(value) => {
                let previous = reaction.option_name().to_string();
                reaction.set_option_name(std::mem::replace(value, previous));
            }
            ReactionValue::WaitFor(value) => {
                *value = reaction.set_wait_for(value.take());
            }
            ReactionValue::ResponseType(value) => {
                let previous = reaction.response_type();
                reaction.set_response_type(*value);
                *value = previous;
            }
            ReactionValue::NextStepId(value) => {
                let previous = reaction.next_step_id().to_string();
                reaction.set_next_step_id(std::mem::replace(value, previous));
            }
            ReactionValue::CustomCode(value) => {
                let previous = reaction.custom_code().to_string();
                reaction.set_custom_code(std::mem::replace(value, previous));
            }
        }
    }
}

/// Sets one field of a reaction.
///
/// For the condition field the command owns whichever condition is not in
/// the reaction: the new one before `redo`, the displaced one after it.
#[derive(Debug)]
pub struct SetReactionField {
    reaction: ReactionKey,
    value: ReactionValue,
}

impl SetReactionField {
    pub fn new(reaction: ReactionKey, value: ReactionValue) -> Self {
        Self { reaction, value }
    }

    /// The value the command currently holds.
    pub fn value(&self) -> &ReactionValue {
        &self.value
    }

    fn swap(&mut self, tutorial: &mut Tutorial) -> Result<()> {
        let reaction = tutorial
            .reaction_mut(self.reaction)
            .ok_or(CommandError::ReactionNotFound(self.reaction))?;
        self.value.exchange(reaction);
        Ok(())
    }
}

impl Command for SetReactionField {
    fn text(&self) -> &str {
        self.value.label()
    }

    fn redo(&mut self, tutorial: &mut Tutorial) -> Result<()> {
        self.swap(tutorial)
    }

    fn undo(&mut self, tutorial: &mut Tutorial) -> Result<()> {
        self.swap(tutorial)
    }
}

pub fn set_trigger_type(reaction: ReactionKey, trigger_type: TriggerType) -> SetReactionField {
    SetReactionField::new(reaction, ReactionValue::TriggerType(trigger_type))
}

pub fn set_option_name(reaction: ReactionKey, name: impl Into<String>) -> SetReactionField {
    SetReactionField::new(reaction, ReactionValue::OptionName(name.into()))
}

pub fn set_wait_for(reaction: ReactionKey, wait_for: Option<WaitFor>) -> SetReactionField {
    SetReactionField::new(reaction, ReactionValue::WaitFor(wait_for))
}

pub fn set_response_type(reaction: ReactionKey, response_type: ResponseType) -> SetReactionField {
    SetReactionField::new(reaction, ReactionValue::ResponseType(response_type))
}

pub fn set_next_step_id(reaction: ReactionKey, id: impl Into<String>) -> SetReactionField {
    SetReactionField::new(reaction, ReactionValue::NextStepId(id.into()))
}

pub fn set_custom_code(reaction: ReactionKey, code: impl Into<String>) -> SetReactionField {
    SetReactionField::new(reaction, ReactionValue::CustomCode(code.into()))
}
