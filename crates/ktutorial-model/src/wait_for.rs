//! Conditions a tutorial step waits for.
//!
//! A condition is a tree: leaf conditions describe something observable in
//! the target application, while [`WaitForComposed`] and [`WaitForNot`] own
//! their children. [`Clone`] is a deep copy and [`PartialEq`] is deep
//! structural equality; observers never take part in either.

use crate::enums::CompositionType;
use crate::observer::{ConditionChange, Observers};

/// Condition on an event received by a named object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WaitForEvent {
    receiver_name: String,
    event_name: String,
    observers: Observers<ConditionChange>,
}

impl WaitForEvent {
    pub fn new(receiver_name: impl Into<String>, event_name: impl Into<String>) -> Self {
        Self {
            receiver_name: receiver_name.into(),
            event_name: event_name.into(),
            observers: Observers::new(),
        }
    }

    pub fn receiver_name(&self) -> &str {
        &self.receiver_name
    }

    pub fn set_receiver_name(&mut self, receiver_name: impl Into<String>) {
        self.receiver_name = receiver_name.into();
        self.observers.notify(&ConditionChange::DataChanged);
    }

    pub fn event_name(&self) -> &str {
        &self.event_name
    }

    pub fn set_event_name(&mut self, event_name: impl Into<String>) {
        self.event_name = event_name.into();
        self.observers.notify(&ConditionChange::DataChanged);
    }
}

/// Condition on a property of a named object reaching a value.
///
/// The value is a script expression and is kept verbatim.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WaitForProperty {
    object_name: String,
    property_name: String,
    value: String,
    observers: Observers<ConditionChange>,
}

impl WaitForProperty {
    pub fn new(
        object_name: impl Into<String>,
        property_name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            object_name: object_name.into(),
            property_name: property_name.into(),
            value: value.into(),
            observers: Observers::new(),
        }
    }

    pub fn object_name(&self) -> &str {
        &self.object_name
    }

    pub fn set_object_name(&mut self, object_name: impl Into<String>) {
        self.object_name = object_name.into();
        self.observers.notify(&ConditionChange::DataChanged);
    }

    pub fn property_name(&self) -> &str {
        &self.property_name
    }

    pub fn set_property_name(&mut self, property_name: impl Into<String>) {
        self.property_name = property_name.into();
        self.observers.notify(&ConditionChange::DataChanged);
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.observers.notify(&ConditionChange::DataChanged);
    }
}

/// Condition on a signal emitted by a named object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WaitForSignal {
    emitter_name: String,
    signal_name: String,
    observers: Observers<ConditionChange>,
}

impl WaitForSignal {
    pub fn new(emitter_name: impl Into<String>, signal_name: impl Into<String>) -> Self {
        Self {
            emitter_name: emitter_name.into(),
            signal_name: signal_name.into(),
            observers: Observers::new(),
        }
    }

    pub fn emitter_name(&self) -> &str {
        &self.emitter_name
    }

    pub fn set_emitter_name(&mut self, emitter_name: impl Into<String>) {
        self.emitter_name = emitter_name.into();
        self.observers.notify(&ConditionChange::DataChanged);
    }

    pub fn signal_name(&self) -> &str {
        &self.signal_name
    }

    pub fn set_signal_name(&mut self, signal_name: impl Into<String>) {
        self.signal_name = signal_name.into();
        self.observers.notify(&ConditionChange::DataChanged);
    }
}

/// Condition on a window with the given object name being shown.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WaitForWindow {
    window_object_name: String,
    observers: Observers<ConditionChange>,
}

impl WaitForWindow {
    pub fn new(window_object_name: impl Into<String>) -> Self {
        Self {
            window_object_name: window_object_name.into(),
            observers: Observers::new(),
        }
    }

    pub fn window_object_name(&self) -> &str {
        &self.window_object_name
    }

    pub fn set_window_object_name(&mut self, window_object_name: impl Into<String>) {
        self.window_object_name = window_object_name.into();
        self.observers.notify(&ConditionChange::DataChanged);
    }
}

/// Condition met as soon as the owning step is activated. Has no data.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WaitForStepActivation {
    observers: Observers<ConditionChange>,
}

impl WaitForStepActivation {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Conjunction or disjunction of child conditions, in order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WaitForComposed {
    composition_type: CompositionType,
    wait_fors: Vec<WaitFor>,
    observers: Observers<ConditionChange>,
}

impl WaitForComposed {
    pub fn new(composition_type: CompositionType) -> Self {
        Self {
            composition_type,
            wait_fors: Vec::new(),
            observers: Observers::new(),
        }
    }

    pub fn composition_type(&self) -> CompositionType {
        self.composition_type
    }

    pub fn set_composition_type(&mut self, composition_type: CompositionType) {
        self.composition_type = composition_type;
        self.observers.notify(&ConditionChange::DataChanged);
    }

    pub fn wait_fors(&self) -> &[WaitFor] {
        &self.wait_fors
    }

    pub fn wait_for_mut(&mut self, index: usize) -> Option<&mut WaitFor> {
        self.wait_fors.get_mut(index)
    }

    pub fn add_wait_for(&mut self, wait_for: WaitFor) {
        self.insert_wait_for(self.wait_fors.len(), wait_for);
    }

    /// Insert a child at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`.
    pub fn insert_wait_for(&mut self, index: usize, wait_for: WaitFor) {
        assert!(
            index <= self.wait_fors.len(),
            "child index {index} out of range for composed condition with {} children",
            self.wait_fors.len()
        );
        self.wait_fors.insert(index, wait_for);
        self.observers.notify(&ConditionChange::ChildAdded { index });
    }

    /// Remove and return the child at `index`.
    ///
    /// # Panics
    ///
    /// Panics if there is no child at `index`.
    pub fn remove_wait_for(&mut self, index: usize) -> WaitFor {
        assert!(
            index < self.wait_fors.len(),
            "child index {index} out of range for composed condition with {} children",
            self.wait_fors.len()
        );
        let removed = self.wait_fors.remove(index);
        self.observers.notify(&ConditionChange::ChildRemoved { index });
        removed
    }
}

/// Negation of at most one child condition.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WaitForNot {
    negated_wait_for: Option<Box<WaitFor>>,
    observers: Observers<ConditionChange>,
}

impl WaitForNot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_negated(wait_for: WaitFor) -> Self {
        Self {
            negated_wait_for: Some(Box::new(wait_for)),
            observers: Observers::new(),
        }
    }

    pub fn negated_wait_for(&self) -> Option<&WaitFor> {
        self.negated_wait_for.as_deref()
    }

    pub fn negated_wait_for_mut(&mut self) -> Option<&mut WaitFor> {
        self.negated_wait_for.as_deref_mut()
    }

    /// Replace the negated child, returning the previous one.
    pub fn set_negated_wait_for(&mut self, wait_for: Option<WaitFor>) -> Option<WaitFor> {
        let previous = std::mem::replace(&mut self.negated_wait_for, wait_for.map(Box::new));
        self.observers.notify(&ConditionChange::DataChanged);
        previous.map(|boxed| *boxed)
    }
}

/// Any condition a reaction can wait for.
#[derive(Debug, Clone, PartialEq)]
pub enum WaitFor {
    Event(WaitForEvent),
    Property(WaitForProperty),
    Signal(WaitForSignal),
    Window(WaitForWindow),
    StepActivation(WaitForStepActivation),
    Composed(WaitForComposed),
    Not(WaitForNot),
}

impl WaitFor {
    /// Structural equality; identical to `==`.
    pub fn equals(&self, other: &WaitFor) -> bool {
        self == other
    }

    /// Element-style name of the variant, as used by the XML format.
    pub fn kind_name(&self) -> &'static str {
        match self {
            WaitFor::Event(_) => "waitForEvent",
            WaitFor::Property(_) => "waitForProperty",
            WaitFor::Signal(_) => "waitForSignal",
            WaitFor::Window(_) => "waitForWindow",
            WaitFor::StepActivation(_) => "waitForStepActivation",
            WaitFor::Composed(_) => "waitForComposed",
            WaitFor::Not(_) => "waitForNot",
        }
    }

    pub fn observers(&self) -> &Observers<ConditionChange> {
        match self {
            WaitFor::Event(wait_for) => &wait_for.observers,
            WaitFor::Property(wait_for) => &wait_for.observers,
            WaitFor::Signal(wait_for) => &wait_for.observers,
            WaitFor::Window(wait_for) => &wait_for.observers,
            WaitFor::StepActivation(wait_for) => &wait_for.observers,
            WaitFor::Composed(wait_for) => &wait_for.observers,
            WaitFor::Not(wait_for) => &wait_for.observers,
        }
    }

    pub fn observers_mut(&mut self) -> &mut Observers<ConditionChange> {
        match self {
            WaitFor::Event(wait_for) => &mut wait_for.observers,
            WaitFor::Property(wait_for) => &mut wait_for.observers,
            WaitFor::Signal(wait_for) => &mut wait_for.observers,
            WaitFor::Window(wait_for) => &mut wait_for.observers,
            WaitFor::StepActivation(wait_for) => &mut wait_for.observers,
            WaitFor::Composed(wait_for) => &mut wait_for.observers,
            WaitFor::Not(wait_for) => &mut wait_for.observers,
        }
    }

    /// Direct children of this node, in order.
    pub fn children(&self) -> Vec<&WaitFor> {
        match self {
            WaitFor::Composed(composed) => composed.wait_fors().iter().collect(),
            WaitFor::Not(not) => not.negated_wait_for().into_iter().collect(),
            _ => Vec::new(),
        }
    }

    /// Number of nodes in the tree rooted at this condition.
    pub fn node_count(&self) -> usize {
        1 + self
            .children()
            .into_iter()
            .map(WaitFor::node_count)
            .sum::<usize>()
    }
}

impl From<WaitForEvent> for WaitFor {
    fn from(wait_for: WaitForEvent) -> Self {
        WaitFor::Event(wait_for)
    }
}

impl From<WaitForProperty> for WaitFor {
    fn from(wait_for: WaitForProperty) -> Self {
        WaitFor::Property(wait_for)
    }
}

impl From<WaitForSignal> for WaitFor {
    fn from(wait_for: WaitForSignal) -> Self {
        WaitFor::Signal(wait_for)
    }
}

impl From<WaitForWindow> for WaitFor {
    fn from(wait_for: WaitForWindow) -> Self {
        WaitFor::Window(wait_for)
    }
}

impl From<WaitForStepActivation> for WaitFor {
    fn from(wait_for: WaitForStepActivation) -> Self {
        WaitFor::StepActivation(wait_for)
    }
}

impl From<WaitForComposed> for WaitFor {
    fn from(wait_for: WaitForComposed) -> Self {
        WaitFor::Composed(wait_for)
    }
}

impl From<WaitForNot> for WaitFor {
    fn from(wait_for: WaitForNot) -> Self {
        WaitFor::Not(wait_for)
    }
}
