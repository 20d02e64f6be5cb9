//! Commands editing a step of a tutorial.

use ktutorial_model::{Reaction, ReactionKey, Step, StepKey, Tutorial};

use crate::command::Command;
use crate::error::{CommandError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepField {
    Id,
    Text,
    SetupCode,
    TearDownCode,
}

impl StepField {
    pub fn label(&self) -> &'static str {
        match self {
            StepField::Id => "Set step id",
            StepField::Text => "Set step text",
            StepField::SetupCode => "Set step setup code",
            StepField::TearDownCode => "Set step tear down code",
        }
    }

    fn get(self, step: &Step) -> &str {
        match self {
            StepField::Id => step.id(),
            StepField::Text => step.text(),
            StepField::SetupCode => step.custom_setup_code(),
            StepField::TearDownCode => step.custom_tear_down_code(),
        }
    }

    fn set(self, step: &mut Step, value: String) {
        match self {
            StepField::Id => step.set_id(value),
            StepField::Text => step.set_text(value),
            StepField::SetupCode => step.set_custom_setup_code(value),
            StepField::TearDownCode => step.set_custom_tear_down_code(value),
        }
    }
}

fn find_step(tutorial: &mut Tutorial, key: StepKey) -> Result<&mut Step> {
    tutorial
        .step_mut(key)
        .ok_or(CommandError::StepNotFound(key))
}

/// Sets one text field of a step.
#[derive(Debug)]
pub struct SetStepField {
    step: StepKey,
    field: StepField,
    value: String,
}

impl SetStepField {
    pub fn new(step: StepKey, field: StepField, value: impl Into<String>) -> Self {
        Self {
            step,
            field,
            value: value.into(),
        }
    }

    fn swap(&mut self, tutorial: &mut Tutorial) -> Result<()> {
        let step = find_step(tutorial, self.step)?;
        let previous = self.field.get(step).to_string();
        let value = std::mem::replace(&mut self.value, previous);
        self.field.set(step, value);
        Ok(())
    }
}

impl Command for SetStepField {
    fn text(&self) -> &str {
        self.field.label()
    }

    fn redo(&mut self, tutorial: &mut Tutorial) -> Result<()> {
        self.swap(tutorial)
    }

    fn undo(&mut self, tutorial: &mut Tutorial) -> Result<()> {
        self.swap(tutorial)
    }
}

pub fn set_id(step: StepKey, id: impl Into<String>) -> SetStepField {
    SetStepField::new(step, StepField::Id, id)
}

pub fn set_text(step: StepKey, text: impl Into<String>) -> SetStepField {
    SetStepField::new(step, StepField::Text, text)
}

pub fn set_custom_setup_code(step: StepKey, code: impl Into<String>) -> SetStepField {
    SetStepField::new(step, StepField::SetupCode, code)
}

pub fn set_custom_tear_down_code(step: StepKey, code: impl Into<String>) -> SetStepField {
    SetStepField::new(step, StepField::TearDownCode, code)
}

/// Adds a reaction to a step, owning it while it is detached.
#[derive(Debug)]
pub struct AddReaction {
    step: StepKey,
    key: ReactionKey,
    index: Option<usize>,
    reaction: Option<Reaction>,
}

impl AddReaction {
    pub fn new(step: StepKey, reaction: Reaction) -> Self {
        Self {
            step,
            key: reaction.key(),
            index: None,
            reaction: Some(reaction),
        }
    }

    /// Insert at `index` instead of appending.
    pub fn at(mut self, index: usize) -> Self {
        self.index = Some(index);
        self
    }

    pub fn reaction_key(&self) -> ReactionKey {
        self.key
    }

    pub fn reaction(&self) -> Option<&Reaction> {
        self.reaction.as_ref()
    }
}

impl Command for AddReaction {
    fn text(&self) -> &str {
        "Add reaction"
    }

    fn redo(&mut self, tutorial: &mut Tutorial) -> Result<()> {
        let step = find_step(tutorial, self.step)?;
        let len = step.reactions().len();
        let index = self.index.unwrap_or(len);
        if index > len {
            return Err(CommandError::IndexOutOfRange { index, len });
        }
        let Some(reaction) = self.reaction.take() else {
            return Err(CommandError::NothingToApply {
                command: "Add reaction".to_string(),
            });
        };
        step.insert_reaction(index, reaction);
        Ok(())
    }

    fn undo(&mut self, tutorial: &mut Tutorial) -> Result<()> {
        let step = find_step(tutorial, self.step)?;
        if !step.contains_reaction(self.key) {
            return Err(CommandError::ReactionNotFound(self.key));
        }
        self.reaction = Some(step.remove_reaction(self.key));
        Ok(())
    }
}

pub fn add_reaction(step: StepKey, reaction: Reaction) -> AddReaction {
    AddReaction::new(step, reaction)
}

/// Removes a reaction from a step, remembering where it was.
#[derive(Debug)]
pub struct RemoveReaction {
    step: StepKey,
    key: ReactionKey,
    index: usize,
    reaction: Option<Reaction>,
}

impl RemoveReaction {
    pub fn new(step: StepKey, key: ReactionKey) -> Self {
        Self {
            step,
            key,
            index: 0,
            reaction: None,
        }
    }

    pub fn reaction(&self) -> Option<&Reaction> {
        self.reaction.as_ref()
    }
}

impl Command for RemoveReaction {
    fn text(&self) -> &str {
        "Remove reaction"
    }

    fn redo(&mut self, tutorial: &mut Tutorial) -> Result<()> {
        let step = find_step(tutorial, self.step)?;
        let index = step
            .reaction_index(self.key)
            .ok_or(CommandError::ReactionNotFound(self.key))?;
        self.index = index;
        self.reaction = Some(step.remove_reaction(self.key));
        Ok(())
    }

    fn undo(&mut self, tutorial: &mut Tutorial) -> Result<()> {
        let step = find_step(tutorial, self.step)?;
        let len = step.reactions().len();
        if self.index > len {
            return Err(CommandError::IndexOutOfRange {
                index: self.index,
                len,
            });
        }
        let Some(reaction) = self.reaction.take() else {
            return Err(CommandError::NothingToApply {
                command: "Remove reaction".to_string(),
            });
        };
        step.insert_reaction(self.index, reaction);
        Ok(())
    }
}

pub fn remove_reaction(step: StepKey, reaction: ReactionKey) -> RemoveReaction {
    RemoveReaction::new(step, reaction)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tutorial_with_step() -> (Tutorial, StepKey) {
        let mut tutorial = Tutorial::new();
        let step = Step::with_id("start");
        let key = step.key();
        tutorial.add_step(step);
        (tutorial, key)
    }

    fn option_names(tutorial: &Tutorial, step: StepKey) -> Vec<String> {
        tutorial
            .step(step)
            .map(|step| {
                step.reactions()
                    .iter()
                    .map(|reaction| reaction.option_name().to_string())
                    .collect()
            })
            .unwrap_or_default()
    }

    fn option(name: &str) -> Reaction {
        let mut reaction = Reaction::new();
        reaction.set_option_name(name);
        reaction
    }

    #[test]
    fn test_set_text_redo_undo() {
        let (mut tutorial, key) = tutorial_with_step();
        let mut command = set_text(key, "Hello");
        assert_eq!(command.text(), "Set step text");

        command.redo(&mut tutorial).unwrap();
        assert_eq!(tutorial.step(key).map(Step::text), Some("Hello"));
        command.undo(&mut tutorial).unwrap();
        assert_eq!(tutorial.step(key).map(Step::text), Some(""));
    }

    #[test]
    fn test_every_field_restores_previous_value() {
        for field in [
            StepField::Id,
            StepField::Text,
            StepField::SetupCode,
            StepField::TearDownCode,
        ] {
            let (mut tutorial, key) = tutorial_with_step();
            if let Some(step) = tutorial.step_mut(key) {
                field.set(step, "before".to_string());
            }
            let mut command = SetStepField::new(key, field, "after");
            command.redo(&mut tutorial).unwrap();
            command.undo(&mut tutorial).unwrap();
            let step = tutorial.step(key).unwrap();
            assert_eq!(field.get(step), "before", "{}", field.label());
        }
    }

    #[test]
    fn test_set_field_on_missing_step_fails() {
        let mut tutorial = Tutorial::new();
        let key = Step::new().key();
        let mut command = set_id(key, "x");
        assert_eq!(
            command.redo(&mut tutorial),
            Err(CommandError::StepNotFound(key))
        );
    }

    #[test]
    fn test_add_reaction_redo_undo() {
        let (mut tutorial, key) = tutorial_with_step();
        let mut command = add_reaction(key, option("First"));
        let reaction = command.reaction_key();

        command.redo(&mut tutorial).unwrap();
        assert!(command.reaction().is_none());
        assert!(tutorial.reaction(reaction).is_some());

        command.undo(&mut tutorial).unwrap();
        assert!(tutorial.reaction(reaction).is_none());
        assert_eq!(
            command.reaction().map(Reaction::option_name),
            Some("First")
        );
    }

    #[test]
    fn test_remove_reaction_restores_original_index() {
        let (mut tutorial, key) = tutorial_with_step();
        for name in ["a", "b", "c"] {
            add_reaction(key, option(name)).redo(&mut tutorial).unwrap();
        }
        let middle = tutorial.step(key).unwrap().reactions()[1].key();

        let mut command = remove_reaction(key, middle);
        command.redo(&mut tutorial).unwrap();
        assert_eq!(option_names(&tutorial, key), vec!["a", "c"]);

        command.undo(&mut tutorial).unwrap();
        assert_eq!(option_names(&tutorial, key), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_remove_reaction_from_wrong_step_fails() {
        let (mut tutorial, key) = tutorial_with_step();
        let other = Step::with_id("other");
        let other_key = other.key();
        tutorial.add_step(other);
        let mut add = add_reaction(key, option("a"));
        add.redo(&mut tutorial).unwrap();

        let mut command = remove_reaction(other_key, add.reaction_key());
        assert_eq!(
            command.redo(&mut tutorial),
            Err(CommandError::ReactionNotFound(add.reaction_key()))
        );
    }
}
