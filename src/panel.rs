//! Panel context object and the `set_settings` entry point.
//!
//! [`SettingsPanel`] owns the listener registry and the current render. Each
//! `set_settings` closes the previous render's gate, builds a fresh tree
//! behind a new suppressed gate, and opens it once the tree is complete.

#[cfg(test)]
#[path = "panel_test.rs"]
mod panel_test;

use std::rc::Rc;

use crate::error::PanelError;
use crate::gate::BroadcastGate;
use crate::listeners::{ListenerId, ListenerRegistry};
use crate::schema::SettingsSchema;
use crate::snapshot::Snapshot;
use crate::tree::render_settings;
use crate::view::Node;

/// The tree built by the last `set_settings` and the gate guarding it.
struct ActiveRender {
    root: Node,
    gate: BroadcastGate,
}

/// Settings panel state: the listener registry plus the current render.
///
/// This is the browser-independent half of the panel. `web::DomPanel` wraps it
/// and mounts [`SettingsPanel::root`] into the page.
#[derive(Default)]
pub struct SettingsPanel {
    listeners: Rc<ListenerRegistry>,
    active: Option<ActiveRender>,
}

impl SettingsPanel {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Listeners ---

    /// Register `listener` for every snapshot committed after construction.
    pub fn add_settings_change_listener(&self, listener: impl Fn(&Snapshot) + 'static) -> ListenerId {
        self.listeners.add(Rc::new(listener))
    }

    pub fn remove_settings_change_listener(&self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }

    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    // --- Entry point ---

    /// Discard the current render and build a new one from `schema`.
    ///
    /// The tree is built behind a suppressed gate, so seeding never reaches a
    /// listener; the gate opens once the tree is complete.
    pub fn set_settings(&mut self, schema: &SettingsSchema) -> &Node {
        self.clear();
        log::debug!("rendering settings panel with {} fields", schema.fields.len());

        let gate = BroadcastGate::new(Rc::clone(&self.listeners));
        let rendered = render_settings("", schema, gate.callback());
        gate.open();

        &self.active.insert(ActiveRender { root: rendered.node, gate }).root
    }

    /// Parse `json` as a schema and render it.
    ///
    /// # Errors
    ///
    /// Returns [`PanelError::Schema`] when the JSON is not a valid schema; the
    /// previous render is left in place.
    pub fn set_settings_json(&mut self, json: &str) -> Result<&Node, PanelError> {
        let schema = SettingsSchema::from_json(json)?;
        Ok(self.set_settings(&schema))
    }

    /// Tear down the current render. Inputs still held elsewhere stop notifying.
    pub fn clear(&mut self) {
        if let Some(active) = self.active.take() {
            active.gate.close();
        }
    }

    // --- Queries ---

    #[must_use]
    pub fn root(&self) -> Option<&Node> {
        self.active.as_ref().map(|a| &a.root)
    }

    /// The latest top-level snapshot of the current render.
    #[must_use]
    pub fn snapshot(&self) -> Option<Snapshot> {
        self.active.as_ref().map(|a| a.gate.latest())
    }
}
