//! Registry of settings change listeners.
//!
//! Registration takes `&self` so a listener may add or remove listeners while
//! it is being notified; each fanout iterates over a copy of the list taken
//! when the fanout started.

#[cfg(test)]
#[path = "listeners_test.rs"]
mod listeners_test;

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::snapshot::Snapshot;

/// A subscriber to committed snapshots. The snapshot is borrowed; clone it to keep it.
pub type Listener = Rc<dyn Fn(&Snapshot)>;

/// Handle returned by [`ListenerRegistry::add`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u32);

impl ListenerId {
    #[must_use]
    pub fn get(self) -> u32 {
        self.0
    }

    #[must_use]
    pub fn from_raw(raw: u32) -> Self {
        Self(raw)
    }
}

#[derive(Default)]
pub struct ListenerRegistry {
    next_id: Cell<u32>,
    entries: RefCell<Vec<(ListenerId, Listener)>>,
}

impl ListenerRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a listener. The same callback may be registered more than once.
    pub fn add(&self, listener: Listener) -> ListenerId {
        let id = ListenerId(self.next_id.get());
        self.next_id.set(self.next_id.get().wrapping_add(1));
        self.entries.borrow_mut().push((id, listener));
        id
    }

    /// Remove a listener. Returns whether it was registered.
    pub fn remove(&self, id: ListenerId) -> bool {
        let mut entries = self.entries.borrow_mut();
        let before = entries.len();
        entries.retain(|(entry, _)| *entry != id);
        entries.len() != before
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    /// Call every listener, in registration order, with `snapshot`.
    pub fn notify(&self, snapshot: &Snapshot) {
        let current: Vec<Listener> = self.entries.borrow().iter().map(|(_, l)| Rc::clone(l)).collect();
        for listener in current {
            listener(snapshot);
        }
    }
}
