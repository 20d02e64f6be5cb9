use crate::keys::{ReactionKey, StepKey};
use crate::naming::to_lower_camel_case;
use crate::observer::{Observers, TutorialChange};
use crate::reaction::Reaction;
use crate::step::Step;

/// Root of the document model: tutorial information plus its ordered steps.
#[derive(Debug, Default)]
pub struct Tutorial {
    name: String,
    description: String,
    license_text: String,
    custom_setup_code: String,
    custom_tear_down_code: String,
    steps: Vec<Step>,
    observers: Observers<TutorialChange>,
}

impl Tutorial {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observers_mut(&mut self) -> &mut Observers<TutorialChange> {
        &mut self.observers
    }

    /// Identifier derived from the name, in `lowerCamelCase`.
    pub fn id(&self) -> String {
        to_lower_camel_case(&self.name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.observers.notify(&TutorialChange::DataChanged);
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
        self.observers.notify(&TutorialChange::DataChanged);
    }

    pub fn license_text(&self) -> &str {
        &self.license_text
    }

    pub fn set_license_text(&mut self, license_text: impl Into<String>) {
        self.license_text = license_text.into();
        self.observers.notify(&TutorialChange::DataChanged);
    }

    pub fn custom_setup_code(&self) -> &str {
        &self.custom_setup_code
    }

    pub fn set_custom_setup_code(&mut self, code: impl Into<String>) {
        self.custom_setup_code = code.into();
        self.observers.notify(&TutorialChange::DataChanged);
    }

    pub fn custom_tear_down_code(&self) -> &str {
        &self.custom_tear_down_code
    }

    pub fn set_custom_tear_down_code(&mut self, code: impl Into<String>) {
        self.custom_tear_down_code = code.into();
        self.observers.notify(&TutorialChange::DataChanged);
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn step(&self, key: StepKey) -> Option<&Step> {
        self.steps.iter().find(|step| step.key() == key)
    }

    pub fn step_mut(&mut self, key: StepKey) -> Option<&mut Step> {
        self.steps.iter_mut().find(|step| step.key() == key)
    }

    pub fn step_index(&self, key: StepKey) -> Option<usize> {
        self.steps.iter().position(|step| step.key() == key)
    }

    pub fn contains_step(&self, key: StepKey) -> bool {
        self.step_index(key).is_some()
    }

    /// Step with the given user-visible id, if any.
    pub fn step_by_id(&self, id: &str) -> Option<&Step> {
        self.steps.iter().find(|step| step.id() == id)
    }

    pub fn add_step(&mut self, step: Step) {
        self.insert_step(self.steps.len(), step);
    }

    /// Insert a step at `index`.
    ///
    /// # Panics
    ///
    /// Panics if the step is already in the tutorial, or if `index > len`.
    pub fn insert_step(&mut self, index: usize, step: Step) {
        let key = step.key();
        assert!(
            !self.contains_step(key),
            "{key} already belongs to the tutorial"
        );
        assert!(
            index <= self.steps.len(),
            "step index {index} out of range for tutorial with {} steps",
            self.steps.len()
        );
        self.steps.insert(index, step);
        self.observers
            .notify(&TutorialChange::StepAdded { step: key, index });
    }

    /// Detach a step and hand it back to the caller.
    ///
    /// # Panics
    ///
    /// Panics if the step does not belong to this tutorial.
    pub fn remove_step(&mut self, key: StepKey) -> Step {
        let Some(index) = self.step_index(key) else {
            panic!("{key} does not belong to the tutorial");
        };
        let step = self.steps.remove(index);
        self.observers
            .notify(&TutorialChange::StepRemoved { step: key });
        step
    }

    pub fn reaction(&self, key: ReactionKey) -> Option<&Reaction> {
        self.steps.iter().find_map(|step| step.reaction(key))
    }

    pub fn reaction_mut(&mut self, key: ReactionKey) -> Option<&mut Reaction> {
        self.steps
            .iter_mut()
            .find_map(|step| step.reaction_mut(key))
    }
}

/// Structural equality; keys and observers are ignored.
impl PartialEq for Tutorial {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.description == other.description
            && self.license_text == other.license_text
            && self.custom_setup_code == other.custom_setup_code
            && self.custom_tear_down_code == other.custom_tear_down_code
            && self.steps == other.steps
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    #[test]
    fn test_id_is_lower_camel_case_of_name() {
        let mut tutorial = Tutorial::new();
        assert_eq!(tutorial.id(), "");
        tutorial.set_name("Using the file dialog");
        assert_eq!(tutorial.id(), "usingTheFileDialog");
    }

    #[test]
    fn test_insert_and_remove_steps_notify() {
        let mut tutorial = Tutorial::new();
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        tutorial
            .observers_mut()
            .subscribe(move |event: &TutorialChange| sink.borrow_mut().push(*event));

        let first = Step::with_id("first");
        let first_key = first.key();
        let second = Step::with_id("second");
        let second_key = second.key();
        tutorial.add_step(first);
        tutorial.insert_step(0, second);
        assert_eq!(tutorial.step_index(first_key), Some(1));

        let removed = tutorial.remove_step(first_key);
        assert_eq!(removed.id(), "first");
        assert_eq!(
            *events.borrow(),
            vec![
                TutorialChange::StepAdded {
                    step: first_key,
                    index: 0
                },
                TutorialChange::StepAdded {
                    step: second_key,
                    index: 0
                },
                TutorialChange::StepRemoved { step: first_key },
            ]
        );
    }

    #[test]
    #[should_panic(expected = "does not belong")]
    fn test_remove_absent_step_panics() {
        let mut tutorial = Tutorial::new();
        tutorial.remove_step(Step::new().key());
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_insert_past_end_panics() {
        let mut tutorial = Tutorial::new();
        tutorial.insert_step(1, Step::new());
    }

    #[test]
    fn test_reaction_lookup_across_steps() {
        let mut tutorial = Tutorial::new();
        let mut step = Step::with_id("only");
        let step_key = step.key();
        let reaction = Reaction::new();
        let key = reaction.key();
        step.add_reaction(reaction);
        tutorial.add_step(step);

        if let Some(reaction) = tutorial.reaction_mut(key) {
            reaction.set_next_step_id("end");
        }
        assert_eq!(tutorial.reaction(key).map(Reaction::next_step_id), Some("end"));
        assert_eq!(tutorial.step_by_id("only").map(Step::key), Some(step_key));
        assert!(tutorial.step_by_id("missing").is_none());
    }
}
