//! Broadcast gate between the settings tree and the listener registry.
//!
//! Building a tree fires every field's change callback once to seed the
//! snapshot, and those calls travel the same path as user edits. The gate
//! starts suppressed so none of them reach listeners; the panel opens it once
//! the tree is complete. Nested groups share the top-level gate, so
//! suppression is all-or-nothing for one construction pass.

#[cfg(test)]
#[path = "gate_test.rs"]
mod gate_test;

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::listeners::ListenerRegistry;
use crate::snapshot::Snapshot;
use crate::tree::SnapshotCallback;

pub struct BroadcastGate {
    suppressed: Rc<Cell<bool>>,
    latest: Rc<RefCell<Snapshot>>,
    listeners: Rc<ListenerRegistry>,
}

impl BroadcastGate {
    /// A suppressed gate fanning out to `listeners` once opened.
    #[must_use]
    pub fn new(listeners: Rc<ListenerRegistry>) -> Self {
        Self {
            suppressed: Rc::new(Cell::new(true)),
            latest: Rc::new(RefCell::new(Snapshot::new())),
            listeners,
        }
    }

    /// The root callback handed to the top-level tree.
    ///
    /// Every snapshot is recorded as the latest; it is forwarded to listeners
    /// only while the gate is open.
    #[must_use]
    pub fn callback(&self) -> SnapshotCallback {
        let suppressed = Rc::clone(&self.suppressed);
        let latest = Rc::clone(&self.latest);
        let listeners = Rc::clone(&self.listeners);
        Rc::new(move |snapshot: &Snapshot| {
            *latest.borrow_mut() = snapshot.clone();
            if suppressed.get() {
                return;
            }
            log::debug!("settings changed: {}", snapshot.to_value());
            listeners.notify(snapshot);
        })
    }

    /// Let subsequent snapshots reach listeners.
    pub fn open(&self) {
        self.suppressed.set(false);
    }

    /// Stop forwarding, e.g. when the tree this gate serves is torn down.
    pub fn close(&self) {
        self.suppressed.set(true);
    }

    #[must_use]
    pub fn is_suppressed(&self) -> bool {
        self.suppressed.get()
    }

    /// The most recent snapshot seen, delivered or not.
    #[must_use]
    pub fn latest(&self) -> Snapshot {
        self.latest.borrow().clone()
    }
}
