//! Per-control in-flight tracking

use std::collections::HashSet;
use std::fmt;
use std::sync::{Mutex, MutexGuard};

/// A UI control that runs one backend action at a time
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Control {
    /// Connect button on a colleague card
    Connect(String),
    /// Accept/reject buttons on a pending request
    Respond(String),
    /// Inspiration button on a connected colleague's card
    Inspiration(String),
    LinkedInAnalysis,
    Flex,
    Compare,
    GenerateBanner,
}

impl fmt::Display for Control {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Control::Connect(id) => write!(f, "connect:{id}"),
            Control::Respond(id) => write!(f, "respond:{id}"),
            Control::Inspiration(id) => write!(f, "inspiration:{id}"),
            Control::LinkedInAnalysis => write!(f, "linkedin-analysis"),
            Control::Flex => write!(f, "flex"),
            Control::Compare => write!(f, "compare"),
            Control::GenerateBanner => write!(f, "generate-banner"),
        }
    }
}

/// Set of controls with an action in flight
#[derive(Debug, Default)]
pub(crate) struct BusySet {
    active: Mutex<HashSet<Control>>,
}

impl BusySet {
    /// Mark `control` busy, or `None` when it already is
    pub(crate) fn try_acquire(&self, control: Control) -> Option<BusyGuard<'_>> {
        if self.lock().insert(control.clone()) {
            Some(BusyGuard { set: self, control })
        } else {
            None
        }
    }

    pub(crate) fn contains(&self, control: &Control) -> bool {
        self.lock().contains(control)
    }

    fn lock(&self) -> MutexGuard<'_, HashSet<Control>> {
        // The set stays consistent even if a holder panicked
        self.active.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Clears its control when dropped, whatever the action's outcome
#[derive(Debug)]
pub(crate) struct BusyGuard<'a> {
    set: &'a BusySet,
    control: Control,
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.set.lock().remove(&self.control);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guard_releases_on_drop() {
        let set = BusySet::default();
        let guard = set.try_acquire(Control::Flex);
        assert!(guard.is_some());
        assert!(set.try_acquire(Control::Flex).is_none());

        drop(guard);
        assert!(!set.contains(&Control::Flex));
        assert!(set.try_acquire(Control::Flex).is_some());
    }

    #[test]
    fn test_controls_are_independent() {
        let set = BusySet::default();
        let _a = set.try_acquire(Control::Connect("u1".into()));
        assert!(set.try_acquire(Control::Connect("u2".into())).is_some());
        assert!(set.contains(&Control::Connect("u1".into())));
    }
}
