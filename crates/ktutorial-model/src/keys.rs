use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_KEY: AtomicU64 = AtomicU64::new(1);

fn next_key() -> u64 {
    NEXT_KEY.fetch_add(1, Ordering::Relaxed)
}

/// Identity of a [`Step`](crate::Step).
///
/// Keys are assigned once at construction and are unique for the lifetime of
/// the process. Two structurally equal steps still have different keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StepKey(u64);

impl StepKey {
    pub(crate) fn next() -> Self {
        Self(next_key())
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for StepKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "step#{}", self.0)
    }
}

/// Identity of a [`Reaction`](crate::Reaction).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ReactionKey(u64);

impl ReactionKey {
    pub(crate) fn next() -> Self {
        Self(next_key())
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ReactionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "reaction#{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_unique() {
        let first = StepKey::next();
        let second = StepKey::next();
        let reaction = ReactionKey::next();
        assert_ne!(first, second);
        assert_ne!(first.get(), reaction.get());
        assert_ne!(second.get(), reaction.get());
    }

    #[test]
    fn keys_display_with_kind() {
        let key = StepKey(7);
        assert_eq!(key.to_string(), "step#7");
        assert_eq!(ReactionKey(3).to_string(), "reaction#3");
    }
}
