use crate::enums::{ResponseType, TriggerType};
use crate::keys::ReactionKey;
use crate::observer::{Observers, ReactionChange};
use crate::wait_for::WaitFor;

/// Something a step reacts to, and what it does in response.
///
/// Only the fields selected by the trigger and response types matter when
/// the tutorial runs, but all of them are kept so switching types back and
/// forth in the editor does not lose data.
#[derive(Debug)]
pub struct Reaction {
    key: ReactionKey,
    trigger_type: TriggerType,
    option_name: String,
    wait_for: Option<WaitFor>,
    response_type: ResponseType,
    next_step_id: String,
    custom_code: String,
    observers: Observers<ReactionChange>,
}

impl Reaction {
    pub fn new() -> Self {
        Self {
            key: ReactionKey::next(),
            trigger_type: TriggerType::default(),
            option_name: String::new(),
            wait_for: None,
            response_type: ResponseType::default(),
            next_step_id: String::new(),
            custom_code: String::new(),
            observers: Observers::new(),
        }
    }

    pub fn key(&self) -> ReactionKey {
        self.key
    }

    pub fn observers_mut(&mut self) -> &mut Observers<ReactionChange> {
        &mut self.observers
    }

    pub fn trigger_type(&self) -> TriggerType {
        self.trigger_type
    }

    pub fn set_trigger_type(&mut self, trigger_type: TriggerType) {
        self.trigger_type = trigger_type;
        self.notify_changed();
    }

    pub fn option_name(&self) -> &str {
        &self.option_name
    }

    pub fn set_option_name(&mut self, option_name: impl Into<String>) {
        self.option_name = option_name.into();
        self.notify_changed();
    }

    pub fn wait_for(&self) -> Option<&WaitFor> {
        self.wait_for.as_ref()
    }

    /// Mutable access to the condition tree.
    ///
    /// Edits made through it are reported by the condition's own observers,
    /// not by the reaction.
    pub fn wait_for_mut(&mut self) -> Option<&mut WaitFor> {
        self.wait_for.as_mut()
    }

    /// Replace the condition, returning the previous one.
    pub fn set_wait_for(&mut self, wait_for: Option<WaitFor>) -> Option<WaitFor> {
        let previous = std::mem::replace(&mut self.wait_for, wait_for);
        self.notify_changed();
        previous
    }

    pub fn response_type(&self) -> ResponseType {
        self.response_type
    }

    pub fn set_response_type(&mut self, response_type: ResponseType) {
        self.response_type = response_type;
        self.notify_changed();
    }

    pub fn next_step_id(&self) -> &str {
        &self.next_step_id
    }

    pub fn set_next_step_id(&mut self, next_step_id: impl Into<String>) {
        self.next_step_id = next_step_id.into();
        self.notify_changed();
    }

    pub fn custom_code(&self) -> &str {
        &self.custom_code
    }

    pub fn set_custom_code(&mut self, custom_code: impl Into<String>) {
        self.custom_code = custom_code.into();
        self.notify_changed();
    }

    fn notify_changed(&self) {
        self.observers
            .notify(&ReactionChange::DataChanged { reaction: self.key });
    }
}

impl Default for Reaction {
    fn default() -> Self {
        Self::new()
    }
}

/// Structural equality; keys and observers are ignored.
impl PartialEq for Reaction {
    fn eq(&self, other: &Self) -> bool {
        self.trigger_type == other.trigger_type
            && self.option_name == other.option_name
            && self.wait_for == other.wait_for
            && self.response_type == other.response_type
            && self.next_step_id == other.next_step_id
            && self.custom_code == other.custom_code
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::wait_for::WaitForWindow;

    #[test]
    fn test_new_reaction_defaults() {
        let reaction = Reaction::new();
        assert_eq!(reaction.trigger_type(), TriggerType::OptionSelected);
        assert_eq!(reaction.response_type(), ResponseType::NextStep);
        assert!(reaction.wait_for().is_none());
        assert!(reaction.option_name().is_empty());
        assert!(reaction.next_step_id().is_empty());
        assert!(reaction.custom_code().is_empty());
    }

    #[test]
    fn test_setters_notify_with_key() {
        let mut reaction = Reaction::new();
        let key = reaction.key();
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        reaction
            .observers_mut()
            .subscribe(move |event: &ReactionChange| sink.borrow_mut().push(*event));

        reaction.set_option_name("Next");
        reaction.set_trigger_type(TriggerType::ConditionMet);
        assert_eq!(
            *events.borrow(),
            vec![
                ReactionChange::DataChanged { reaction: key },
                ReactionChange::DataChanged { reaction: key },
            ]
        );
    }

    #[test]
    fn test_set_wait_for_returns_previous() {
        let mut reaction = Reaction::new();
        assert!(
            reaction
                .set_wait_for(Some(WaitForWindow::new("first").into()))
                .is_none()
        );
        let previous = reaction.set_wait_for(Some(WaitForWindow::new("second").into()));
        assert_eq!(previous, Some(WaitFor::from(WaitForWindow::new("first"))));
    }
}
