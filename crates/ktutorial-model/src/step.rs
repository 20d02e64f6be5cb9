use crate::keys::{ReactionKey, StepKey};
use crate::observer::{Observers, StepChange};
use crate::reaction::Reaction;

/// A tutorial step: the text shown to the user and the reactions that move
/// the tutorial forward.
#[derive(Debug)]
pub struct Step {
    key: StepKey,
    id: String,
    text: String,
    custom_setup_code: String,
    custom_tear_down_code: String,
    reactions: Vec<Reaction>,
    observers: Observers<StepChange>,
}

impl Step {
    pub fn new() -> Self {
        Self {
            key: StepKey::next(),
            id: String::new(),
            text: String::new(),
            custom_setup_code: String::new(),
            custom_tear_down_code: String::new(),
            reactions: Vec::new(),
            observers: Observers::new(),
        }
    }

    pub fn with_id(id: impl Into<String>) -> Self {
        let mut step = Self::new();
        step.id = id.into();
        step
    }

    pub fn key(&self) -> StepKey {
        self.key
    }

    pub fn observers_mut(&mut self) -> &mut Observers<StepChange> {
        &mut self.observers
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn set_id(&mut self, id: impl Into<String>) {
        self.id = id.into();
        self.notify_changed();
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.notify_changed();
    }

    pub fn custom_setup_code(&self) -> &str {
        &self.custom_setup_code
    }

    pub fn set_custom_setup_code(&mut self, code: impl Into<String>) {
        self.custom_setup_code = code.into();
        self.notify_changed();
    }

    pub fn custom_tear_down_code(&self) -> &str {
        &self.custom_tear_down_code
    }

    pub fn set_custom_tear_down_code(&mut self, code: impl Into<String>) {
        self.custom_tear_down_code = code.into();
        self.notify_changed();
    }

    pub fn reactions(&self) -> &[Reaction] {
        &self.reactions
    }

    pub fn reaction(&self, key: ReactionKey) -> Option<&Reaction> {
        self.reactions.iter().find(|reaction| reaction.key() == key)
    }

    pub fn reaction_mut(&mut self, key: ReactionKey) -> Option<&mut Reaction> {
        self.reactions
            .iter_mut()
            .find(|reaction| reaction.key() == key)
    }

    pub fn reaction_index(&self, key: ReactionKey) -> Option<usize> {
        self.reactions
            .iter()
            .position(|reaction| reaction.key() == key)
    }

    pub fn contains_reaction(&self, key: ReactionKey) -> bool {
        self.reaction_index(key).is_some()
    }

    pub fn add_reaction(&mut self, reaction: Reaction) {
        self.insert_reaction(self.reactions.len(), reaction);
    }

    /// Insert a reaction at `index`.
    ///
    /// # Panics
    ///
    /// Panics if a reaction with the same key is already in the step, or if
    /// `index > len`.
    pub fn insert_reaction(&mut self, index: usize, reaction: Reaction) {
        let key = reaction.key();
        assert!(
            !self.contains_reaction(key),
            "{key} already belongs to step {:?}",
            self.id
        );
        assert!(
            index <= self.reactions.len(),
            "reaction index {index} out of range for step with {} reactions",
            self.reactions.len()
        );
        self.reactions.insert(index, reaction);
        self.observers.notify(&StepChange::ReactionAdded {
            reaction: key,
            index,
        });
    }

    /// Detach a reaction and hand it back to the caller.
    ///
    /// # Panics
    ///
    /// Panics if the reaction does not belong to this step.
    pub fn remove_reaction(&mut self, key: ReactionKey) -> Reaction {
        let Some(index) = self.reaction_index(key) else {
            panic!("{key} does not belong to step {:?}", self.id);
        };
        let reaction = self.reactions.remove(index);
        self.observers
            .notify(&StepChange::ReactionRemoved { reaction: key });
        reaction
    }

    fn notify_changed(&self) {
        self.observers
            .notify(&StepChange::DataChanged { step: self.key });
    }
}

impl Default for Step {
    fn default() -> Self {
        Self::new()
    }
}

/// Structural equality; keys and observers are ignored.
impl PartialEq for Step {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.text == other.text
            && self.custom_setup_code == other.custom_setup_code
            && self.custom_tear_down_code == other.custom_tear_down_code
            && self.reactions == other.reactions
    }
}
