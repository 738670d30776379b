//! Current value snapshot: the id to value mapping of one settings group.
//!
//! Every leaf edit bubbles the complete group snapshot to its parent, and the
//! top-level snapshot is what listeners receive. Consumers always see the whole
//! tree, never a delta. Nested groups appear as nested JSON objects under their
//! field id.

#[cfg(test)]
#[path = "snapshot_test.rs"]
mod snapshot_test;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::PanelError;

/// Mapping from field id to its latest value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Snapshot(Map<String, Value>);

impl Snapshot {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the value for `id`, replacing any previous value.
    pub fn insert(&mut self, id: impl Into<String>, value: Value) {
        self.0.insert(id.into(), value);
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Value> {
        self.0.get(id)
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.0.contains_key(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Field ids present in the snapshot.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Nested group snapshot stored under `id`, if that entry is an object.
    #[must_use]
    pub fn group(&self, id: &str) -> Option<Snapshot> {
        match self.0.get(id) {
            Some(Value::Object(map)) => Some(Self(map.clone())),
            _ => None,
        }
    }

    #[must_use]
    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }

    #[must_use]
    pub fn to_value(&self) -> Value {
        Value::Object(self.0.clone())
    }

    /// Decode the snapshot into a typed settings struct.
    ///
    /// # Errors
    ///
    /// Returns [`PanelError::Decode`] when a field is missing or has the wrong shape.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, PanelError> {
        serde_json::from_value(self.to_value()).map_err(PanelError::Decode)
    }
}

impl From<Map<String, Value>> for Snapshot {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}
