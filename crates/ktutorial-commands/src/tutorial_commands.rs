//! Commands editing the tutorial itself.

use ktutorial_model::{Step, StepKey, Tutorial};

use crate::command::Command;
use crate::error::{CommandError, Result};

/// Text fields of a tutorial that can be set through a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TutorialField {
    Name,
    Description,
    LicenseText,
    SetupCode,
    TearDownCode,
}

impl TutorialField {
    pub fn label(&self) -> &'static str {
        match self {
            TutorialField::Name => "Set tutorial name",
            TutorialField::Description => "Set tutorial description",
            TutorialField::LicenseText => "Set tutorial license",
            TutorialField::SetupCode => "Set tutorial setup code",
            TutorialField::TearDownCode => "Set tutorial tear down code",
        }
    }

    fn get(self, tutorial: &Tutorial) -> &str {
        match self {
            TutorialField::Name => tutorial.name(),
            TutorialField::Description => tutorial.description(),
            TutorialField::LicenseText => tutorial.license_text(),
            TutorialField::SetupCode => tutorial.custom_setup_code(),
            TutorialField::TearDownCode => tutorial.custom_tear_down_code(),
        }
    }

    fn set(self, tutorial: &mut Tutorial, value: String) {
        match self {
            TutorialField::Name => tutorial.set_name(value),
            TutorialField::Description => tutorial.set_description(value),
            TutorialField::LicenseText => tutorial.set_license_text(value),
            TutorialField::SetupCode => tutorial.set_custom_setup_code(value),
            TutorialField::TearDownCode => tutorial.set_custom_tear_down_code(value),
        }
    }
}

/// Sets one text field of the tutorial.
///
/// The command holds the value that is not currently in the tutorial; both
/// `redo` and `undo` exchange it with the field.
#[derive(Debug)]
pub struct SetTutorialField {
    field: TutorialField,
    value: String,
}

impl SetTutorialField {
    pub fn new(field: TutorialField, value: impl Into<String>) -> Self {
        Self {
            field,
            value: value.into(),
        }
    }

    fn swap(&mut self, tutorial: &mut Tutorial) {
        let previous = self.field.get(tutorial).to_string();
        let value = std::mem::replace(&mut self.value, previous);
        self.field.set(tutorial, value);
    }
}

impl Command for SetTutorialField {
    fn text(&self) -> &str {
        self.field.label()
    }

    fn redo(&mut self, tutorial: &mut Tutorial) -> Result<()> {
        self.swap(tutorial);
        Ok(())
    }

    fn undo(&mut self, tutorial: &mut Tutorial) -> Result<()> {
        self.swap(tutorial);
        Ok(())
    }
}

pub fn set_name(name: impl Into<String>) -> SetTutorialField {
    SetTutorialField::new(TutorialField::Name, name)
}

pub fn set_description(description: impl Into<String>) -> SetTutorialField {
    SetTutorialField::new(TutorialField::Description, description)
}

pub fn set_license_text(license_text: impl Into<String>) -> SetTutorialField {
    SetTutorialField::new(TutorialField::LicenseText, license_text)
}

pub fn set_custom_setup_code(code: impl Into<String>) -> SetTutorialField {
    SetTutorialField::new(TutorialField::SetupCode, code)
}

pub fn set_custom_tear_down_code(code: impl Into<String>) -> SetTutorialField {
    SetTutorialField::new(TutorialField::TearDownCode, code)
}

/// Adds a step to the tutorial.
///
/// The command owns the step until it is applied, and owns it again after
/// it is undone.
#[derive(Debug)]
pub struct AddStep {
    key: StepKey,
    index: Option<usize>,
    step: Option<Step>,
}

impl AddStep {
    pub fn new(step: Step) -> Self {
        Self {
            key: step.key(),
            index: None,
            step: Some(step),
        }
    }

    /// Insert at `index` instead of appending.
    pub fn at(mut self, index: usize) -> Self {
        self.index = Some(index);
        self
    }

    pub fn step_key(&self) -> StepKey {
        self.key
    }

    /// The detached step, while the command owns it.
    pub fn step(&self) -> Option<&Step> {
        self.step.as_ref()
    }
}

impl Command for AddStep {
    fn text(&self) -> &str {
        "Add step"
    }

    fn redo(&mut self, tutorial: &mut Tutorial) -> Result<()> {
        let len = tutorial.steps().len();
        let index = self.index.unwrap_or(len);
        if index > len {
            return Err(CommandError::IndexOutOfRange { index, len });
        }
        let step = self.step.take().ok_or_else(|| CommandError::NothingToApply {
            command: self.text().to_string(),
        })?;
        tutorial.insert_step(index, step);
        Ok(())
    }

    fn undo(&mut self, tutorial: &mut Tutorial) -> Result<()> {
        if !tutorial.contains_step(self.key) {
            return Err(CommandError::StepNotFound(self.key));
        }
        self.step = Some(tutorial.remove_step(self.key));
        Ok(())
    }
}

pub fn add_step(step: Step) -> AddStep {
    AddStep::new(step)
}

/// Removes a step from the tutorial, remembering where it was.
#[derive(Debug)]
pub struct RemoveStep {
    key: StepKey,
    index: usize,
    step: Option<Step>,
}

impl RemoveStep {
    pub fn new(key: StepKey) -> Self {
        Self {
            key,
            index: 0,
            step: None,
        }
    }

    /// The removed step, while the command owns it.
    pub fn step(&self) -> Option<&Step> {
        self.step.as_ref()
    }
}

impl Command for RemoveStep {
    fn text(&self) -> &str {
        "Remove step"
    }

    fn redo(&mut self, tutorial: &mut Tutorial) -> Result<()> {
        let index = tutorial
            .step_index(self.key)
            .ok_or(CommandError::StepNotFound(self.key))?;
        self.index = index;
        self.step = Some(tutorial.remove_step(self.key));
        Ok(())
    }

    fn undo(&mut self, tutorial: &mut Tutorial) -> Result<()> {
        let len = tutorial.steps().len();
        if self.index > len {
            return Err(CommandError::IndexOutOfRange {
                index: self.index,
                len,
            });
        }
        let step = self.step.take().ok_or_else(|| CommandError::NothingToApply {
            command: self.text().to_string(),
        })?;
        tutorial.insert_step(self.index, step);
        Ok(())
    }
}

pub fn remove_step(key: StepKey) -> RemoveStep {
    RemoveStep::new(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tutorial_with_steps(ids: &[&str]) -> Tutorial {
        let mut tutorial = Tutorial::new();
        for id in ids {
            tutorial.add_step(Step::with_id(*id));
        }
        tutorial
    }

    fn ids(tutorial: &Tutorial) -> Vec<&str> {
        tutorial.steps().iter().map(Step::id).collect()
    }

    #[test]
    fn test_set_fields_redo_undo() {
        let fields = [
            TutorialField::Name,
            TutorialField::Description,
            TutorialField::LicenseText,
            TutorialField::SetupCode,
            TutorialField::TearDownCode,
        ];
        for field in fields {
            let mut tutorial = Tutorial::new();
            field.set(&mut tutorial, "old".to_string());
            let mut command = SetTutorialField::new(field, "new");

            command.redo(&mut tutorial).unwrap();
            assert_eq!(field.get(&tutorial), "new");
            command.undo(&mut tutorial).unwrap();
            assert_eq!(field.get(&tutorial), "old");
            command.redo(&mut tutorial).unwrap();
            assert_eq!(field.get(&tutorial), "new");
        }
    }

    #[test]
    fn test_labels() {
        assert_eq!(set_name("x").text(), "Set tutorial name");
        assert_eq!(set_description("x").text(), "Set tutorial description");
        assert_eq!(set_license_text("x").text(), "Set tutorial license");
        assert_eq!(set_custom_setup_code("x").text(), "Set tutorial setup code");
        assert_eq!(
            set_custom_tear_down_code("x").text(),
            "Set tutorial tear down code"
        );
        assert_eq!(add_step(Step::new()).text(), "Add step");
        assert_eq!(remove_step(Step::new().key()).text(), "Remove step");
    }

    #[test]
    fn test_add_step_transfers_ownership() {
        let mut tutorial = Tutorial::new();
        let mut command = add_step(Step::with_id("first"));
        let key = command.step_key();
        assert!(command.step().is_some());

        command.redo(&mut tutorial).unwrap();
        assert!(command.step().is_none());
        assert!(tutorial.contains_step(key));

        command.undo(&mut tutorial).unwrap();
        assert!(tutorial.steps().is_empty());
        assert_eq!(command.step().map(Step::id), Some("first"));
    }

    #[test]
    fn test_add_step_at_index() {
        let mut tutorial = tutorial_with_steps(&["a", "c"]);
        let mut command = add_step(Step::with_id("b")).at(1);
        command.redo(&mut tutorial).unwrap();
        assert_eq!(ids(&tutorial), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_add_step_past_end_fails_and_keeps_step() {
        let mut tutorial = Tutorial::new();
        let mut command = add_step(Step::new()).at(3);
        let error = command.redo(&mut tutorial).unwrap_err();
        assert_eq!(error, CommandError::IndexOutOfRange { index: 3, len: 0 });
        assert!(command.step().is_some());
    }

    #[test]
    fn test_remove_step_undo_restores_index() {
        let mut tutorial = tutorial_with_steps(&["a", "b", "c"]);
        let key = tutorial.steps()[1].key();
        let mut command = remove_step(key);

        command.redo(&mut tutorial).unwrap();
        assert_eq!(ids(&tutorial), vec!["a", "c"]);
        assert_eq!(command.step().map(Step::id), Some("b"));

        command.undo(&mut tutorial).unwrap();
        assert_eq!(ids(&tutorial), vec!["a", "b", "c"]);
        assert_eq!(tutorial.step_index(key), Some(1));
    }

    #[test]
    fn test_remove_unknown_step_fails() {
        let mut tutorial = tutorial_with_steps(&["a"]);
        let key = Step::new().key();
        let mut command = remove_step(key);
        assert_eq!(
            command.redo(&mut tutorial),
            Err(CommandError::StepNotFound(key))
        );
        assert_eq!(ids(&tutorial), vec!["a"]);
    }

    #[test]
    fn test_undo_remove_before_redo_fails() {
        let mut tutorial = Tutorial::new();
        let mut command = remove_step(Step::new().key());
        assert!(matches!(
            command.undo(&mut tutorial),
            Err(CommandError::NothingToApply { .. })
        ));
    }
}
