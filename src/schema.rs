//! Declarative schema describing a settings panel.
//!
//! A [`SettingsSchema`] is an ordered list of [`FieldSchema`]s. Each field
//! carries an id, a display name, and a [`FieldKind`] selected by the JSON
//! `type` tag. Nested groups are `settings` fields holding another schema in
//! `inner`; `array` fields hold a list of item fields in `inner`. A `type`
//! this crate does not know deserializes to [`FieldKind::Unknown`] so the
//! renderer can skip it without rejecting the whole schema.
//!
//! Rust code can build schemas directly with the chained builder methods:
//!
//! ```
//! use settings_panel::schema::SettingsSchema;
//!
//! let schema = SettingsSchema::new()
//!     .text("name", "Name", "Oppo")
//!     .slider("count", "Count", 12.0, 0.0, 128.0, 1.0)
//!     .vec3("color", "Color", [0.4, 0.1, 0.7], 0.0, 1.0, 0.01);
//! assert_eq!(schema.fields.len(), 3);
//! ```

#[cfg(test)]
#[path = "schema_test.rs"]
mod schema_test;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::consts::{DEFAULT_INC, DEFAULT_MAX, DEFAULT_MIN};
use crate::snapshot::Snapshot;

fn default_min() -> f64 {
    DEFAULT_MIN
}

fn default_max() -> f64 {
    DEFAULT_MAX
}

fn default_inc() -> f64 {
    DEFAULT_INC
}

/// Numeric range and step shared by sliders and vector components.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
    pub inc: f64,
}

impl Default for Bounds {
    fn default() -> Self {
        Self { min: DEFAULT_MIN, max: DEFAULT_MAX, inc: DEFAULT_INC }
    }
}

impl Bounds {
    #[must_use]
    pub fn new(min: f64, max: f64, inc: f64) -> Self {
        Self { min, max, inc }
    }

    /// Clamp `value` into `[min, max]`. A reversed range leaves the value alone.
    #[must_use]
    pub fn clamp(&self, value: f64) -> f64 {
        if self.min <= self.max { value.clamp(self.min, self.max) } else { value }
    }

    /// Whether `value` already lies inside the range. Always true for a reversed range.
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        self.min > self.max || (self.min..=self.max).contains(&value)
    }
}

/// The kind of a field, selected by the `type` tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FieldKind {
    /// Single-line text input.
    Text { value: String },
    /// Range input over `[min, max]` with step `inc`.
    Slider {
        value: f64,
        #[serde(default = "default_min")]
        min: f64,
        #[serde(default = "default_max")]
        max: f64,
        #[serde(default = "default_inc")]
        inc: f64,
    },
    /// Three range inputs sharing one set of bounds.
    Vector3 {
        value: [f64; 3],
        #[serde(default = "default_min")]
        min: f64,
        #[serde(default = "default_max")]
        max: f64,
        #[serde(default = "default_inc")]
        inc: f64,
    },
    /// Checkbox.
    Check { value: bool },
    /// Hidden value carried in the snapshot with no control.
    Data {
        #[serde(default)]
        value: Value,
    },
    /// Nested group.
    Settings { inner: SettingsSchema },
    /// Ordered list of fields whose value is the array of their values.
    Array {
        #[serde(default)]
        inner: Vec<FieldSchema>,
    },
    /// Any `type` not listed above.
    #[serde(other)]
    Unknown,
}

impl FieldKind {
    /// The `type` tag as it appears in JSON, also used as the wrapper class.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Text { .. } => "text",
            Self::Slider { .. } => "slider",
            Self::Vector3 { .. } => "vector3",
            Self::Check { .. } => "check",
            Self::Data { .. } => "data",
            Self::Settings { .. } => "settings",
            Self::Array { .. } => "array",
            Self::Unknown => "unknown",
        }
    }

    /// Bounds for numeric kinds.
    #[must_use]
    pub fn bounds(&self) -> Option<Bounds> {
        match *self {
            Self::Slider { min, max, inc, .. } | Self::Vector3 { min, max, inc, .. } => Some(Bounds::new(min, max, inc)),
            _ => None,
        }
    }

    /// Value the snapshot holds for this field before any control reports in.
    ///
    /// `None` for unrecognized kinds, which never appear in a snapshot.
    #[must_use]
    pub fn seed_value(&self) -> Option<Value> {
        match self {
            Self::Text { value } => Some(Value::from(value.as_str())),
            Self::Slider { value, .. } => Some(Value::from(*value)),
            Self::Vector3 { value, .. } => Some(Value::from(value.to_vec())),
            Self::Check { value } => Some(Value::Bool(*value)),
            Self::Data { value } => Some(value.clone()),
            Self::Settings { inner } => Some(inner.seed_snapshot().into_value()),
            Self::Array { inner } => Some(Value::Array(inner.iter().filter_map(|f| f.kind.seed_value()).collect())),
            Self::Unknown => None,
        }
    }
}

/// One field of a settings group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSchema {
    /// Key of this field in the group snapshot. Unique among siblings; may be
    /// omitted for `array` items, which are addressed by position.
    #[serde(default)]
    pub id: String,
    /// Label shown next to the control. Empty hides the label.
    #[serde(default)]
    pub name: String,
    #[serde(flatten)]
    pub kind: FieldKind,
}

impl FieldSchema {
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, kind: FieldKind) -> Self {
        Self { id: id.into(), name: name.into(), kind }
    }
}

/// An ordered group of fields rendered as one panel.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SettingsSchema {
    #[serde(default)]
    pub fields: Vec<FieldSchema>,
    /// Extra class added to the group's wrapper element.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
}

impl SettingsSchema {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a schema from its JSON text.
    ///
    /// # Errors
    ///
    /// Returns an error when the JSON is malformed or a known field kind is
    /// missing a required key.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize to the JSON shape `set_settings` accepts.
    ///
    /// # Errors
    ///
    /// Returns an error if a `data` value cannot be serialized.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Snapshot of every recognized field's schema value, nested groups included.
    #[must_use]
    pub fn seed_snapshot(&self) -> Snapshot {
        let mut snapshot = Snapshot::new();
        for field in &self.fields {
            if let Some(value) = field.kind.seed_value() {
                snapshot.insert(field.id.clone(), value);
            }
        }
        snapshot
    }

    /// Look up a direct child field by id.
    #[must_use]
    pub fn field(&self, id: &str) -> Option<&FieldSchema> {
        self.fields.iter().find(|f| f.id == id)
    }

    // --- Builder ---

    #[must_use]
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    #[must_use]
    pub fn field_with(mut self, field: FieldSchema) -> Self {
        self.fields.push(field);
        self
    }

    pub fn push(&mut self, field: FieldSchema) {
        self.fields.push(field);
    }

    #[must_use]
    pub fn text(self, id: impl Into<String>, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.field_with(FieldSchema::new(id, name, FieldKind::Text { value: value.into() }))
    }

    #[must_use]
    pub fn slider(self, id: impl Into<String>, name: impl Into<String>, value: f64, min: f64, max: f64, inc: f64) -> Self {
        self.field_with(FieldSchema::new(id, name, FieldKind::Slider { value, min, max, inc }))
    }

    #[must_use]
    pub fn vec3(self, id: impl Into<String>, name: impl Into<String>, value: [f64; 3], min: f64, max: f64, inc: f64) -> Self {
        self.field_with(FieldSchema::new(id, name, FieldKind::Vector3 { value, min, max, inc }))
    }

    #[must_use]
    pub fn check(self, id: impl Into<String>, name: impl Into<String>, value: bool) -> Self {
        self.field_with(FieldSchema::new(id, name, FieldKind::Check { value }))
    }

    #[must_use]
    pub fn data(self, id: impl Into<String>, value: Value) -> Self {
        self.field_with(FieldSchema::new(id, "", FieldKind::Data { value }))
    }

    #[must_use]
    pub fn group(self, id: impl Into<String>, name: impl Into<String>, inner: SettingsSchema) -> Self {
        self.field_with(FieldSchema::new(id, name, FieldKind::Settings { inner }))
    }

    /// An `array` field; item ids are ignored, items are addressed by position.
    #[must_use]
    pub fn array(self, id: impl Into<String>, name: impl Into<String>, inner: Vec<FieldSchema>) -> Self {
        self.field_with(FieldSchema::new(id, name, FieldKind::Array { inner }))
    }
}

/// A typed settings struct that can describe its own panel.
///
/// Implementors pair a schema whose field ids match their serde field names
/// with [`Snapshot::decode`], so a listener can turn each snapshot back into
/// the struct.
pub trait SettingsSource: DeserializeOwned {
    fn schema() -> SettingsSchema;
}
