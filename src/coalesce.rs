//! Listener wrapper that collapses bursts of snapshots.
//!
//! If the wrapped listener triggers further changes while it is running (for
//! example by writing a field setter that feeds back into the panel), those
//! snapshots are not delivered recursively. Only the newest one is kept and
//! delivered once the current call returns.

#[cfg(test)]
#[path = "coalesce_test.rs"]
mod coalesce_test;

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::listeners::Listener;
use crate::snapshot::Snapshot;

#[derive(Default)]
struct Pending {
    running: Cell<bool>,
    next: RefCell<Option<Snapshot>>,
}

/// Wrap `inner` so reentrant deliveries are coalesced to the latest snapshot.
#[must_use]
pub fn coalesce(inner: Listener) -> Listener {
    let pending = Rc::new(Pending::default());
    Rc::new(move |snapshot: &Snapshot| {
        *pending.next.borrow_mut() = Some(snapshot.clone());
        if pending.running.get() {
            return;
        }

        pending.running.set(true);
        loop {
            let next = pending.next.borrow_mut().take();
            let Some(next) = next else {
                break;
            };
            inner(&next);
        }
        pending.running.set(false);
    })
}
