//! Synchronous change notification for model entities.
//!
//! Every mutable entity owns an [`Observers`] registry for its own change
//! events. Listeners run synchronously, in subscription order, right after
//! the mutation they describe. They only receive a shared reference to the
//! event, so a listener cannot mutate the entity that is notifying it.
//!
//! Events identify entities by key rather than by reference; a view that
//! needs the current data looks the entity up again in its tutorial.

use std::fmt;

use crate::keys::{ReactionKey, StepKey};

/// Handle returned by [`Observers::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

/// Listener registry for events of type `E`.
///
/// Registrations belong to one entity instance: cloning an entity yields a
/// registry without listeners, and registries never take part in structural
/// equality.
pub struct Observers<E> {
    next_id: u64,
    listeners: Vec<(ObserverId, Box<dyn Fn(&E)>)>,
}

impl<E> Observers<E> {
    pub fn new() -> Self {
        Self {
            next_id: 0,
            listeners: Vec::new(),
        }
    }

    /// Register a listener; it stays registered until [`Self::unsubscribe`].
    pub fn subscribe(&mut self, listener: impl Fn(&E) + 'static) -> ObserverId {
        let id = ObserverId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    pub fn notify(&self, event: &E) {
        for (_, listener) in &self.listeners {
            listener(event);
        }
    }
}

impl<E> Default for Observers<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Clone for Observers<E> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<E> PartialEq for Observers<E> {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl<E> Eq for Observers<E> {}

impl<E> fmt::Debug for Observers<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observers")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

/// Changes reported by a [`Tutorial`](crate::Tutorial).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TutorialChange {
    DataChanged,
    StepAdded { step: StepKey, index: usize },
    StepRemoved { step: StepKey },
}

/// Changes reported by a [`Step`](crate::Step).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepChange {
    DataChanged { step: StepKey },
    ReactionAdded { reaction: ReactionKey, index: usize },
    ReactionRemoved { reaction: ReactionKey },
}

/// Changes reported by a [`Reaction`](crate::Reaction).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReactionChange {
    DataChanged { reaction: ReactionKey },
}

/// Changes reported by a [`WaitFor`](crate::WaitFor) node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConditionChange {
    DataChanged,
    ChildAdded { index: usize },
    ChildRemoved { index: usize },
}
