//! Recursive settings group renderer.
//!
//! A group owns one [`Snapshot`]. Each field gets a callback that writes the
//! field's new value into that snapshot and then hands the *whole* snapshot to
//! the parent callback. Nested groups are rendered with a parent callback that
//! stores the child snapshot under the group field's id, so a leaf edit
//! anywhere bubbles up as the complete top-level tree. `array` fields work the
//! same way over a list of values indexed by position.

#[cfg(test)]
#[path = "tree_test.rs"]
mod tree_test;

use std::cell::RefCell;
use std::rc::Rc;

use serde_json::Value;

use crate::consts::INPUT_CLASS;
use crate::fields::{self, named_div, OnChange, Rendered};
use crate::schema::{FieldKind, FieldSchema, SettingsSchema};
use crate::snapshot::Snapshot;
use crate::view::Node;

/// Receives a group's full snapshot after every change inside it.
pub type SnapshotCallback = Rc<dyn Fn(&Snapshot)>;

/// Render `schema` as a named group.
///
/// `parent` is called once per field seed, once per later edit, and once more
/// after every field has been built. The returned setter does nothing; groups
/// are only ever replaced wholesale.
pub fn render_settings(name: &str, schema: &SettingsSchema, parent: SnapshotCallback) -> Rendered {
    let mut wrapper = named_div(name, std::iter::once("settings").chain(schema.class.as_deref()));
    let mut body = Node::element("div").class(INPUT_CLASS);
    let values = Rc::new(RefCell::new(Snapshot::new()));

    for field in &schema.fields {
        let Some(seed) = seed_of(field) else {
            continue;
        };
        values.borrow_mut().insert(field.id.clone(), seed);

        let on_change: OnChange = {
            let values = Rc::clone(&values);
            let parent = Rc::clone(&parent);
            let id = field.id.clone();
            Rc::new(move |value: Value| {
                let current = {
                    let mut values = values.borrow_mut();
                    values.insert(id.clone(), value);
                    values.clone()
                };
                parent(&current);
            })
        };
        if let Some(rendered) = render_field(field, on_change) {
            body.push(rendered.node);
        }
    }

    wrapper.push(body);

    let flushed = values.borrow().clone();
    parent(&flushed);

    Rendered { node: wrapper, setter: Box::new(|_: &Value| {}) }
}

/// Render `items` as an ordered list whose value is the array of their values.
///
/// Every element edit reports the whole array. The setter writes each element
/// of a matching array into the corresponding control.
pub fn render_array(name: &str, items: &[FieldSchema], parent: OnChange) -> Rendered {
    let mut wrapper = named_div(name, ["array"]);
    let mut body = Node::element("div").class(INPUT_CLASS);
    let values = Rc::new(RefCell::new(Vec::with_capacity(items.len())));
    let mut setters = Vec::new();

    for item in items {
        let Some(seed) = seed_of(item) else {
            continue;
        };
        let index = {
            let mut values = values.borrow_mut();
            values.push(seed);
            values.len() - 1
        };

        let on_change: OnChange = {
            let values = Rc::clone(&values);
            let parent = Rc::clone(&parent);
            Rc::new(move |value: Value| {
                let current = {
                    let mut values = values.borrow_mut();
                    if let Some(slot) = values.get_mut(index) {
                        *slot = value;
                    }
                    Value::Array(values.clone())
                };
                parent(current);
            })
        };
        if let Some(rendered) = render_field(item, on_change) {
            body.push(rendered.node);
            setters.push((index, rendered.setter));
        }
    }

    wrapper.push(body);

    let flushed = Value::Array(values.borrow().clone());
    parent(flushed);

    let setter = Box::new(move |v: &Value| {
        let Some(incoming) = v.as_array() else {
            log::warn!("array value {v} is not an array");
            return;
        };
        for (index, setter) in &setters {
            let Some(element) = incoming.get(*index) else {
                continue;
            };
            if let Some(slot) = values.borrow_mut().get_mut(*index) {
                *slot = element.clone();
            }
            setter(element);
        }
    });
    Rendered { node: wrapper, setter }
}

/// The value a field seeds its group with, or `None` (logged) when its type is unknown.
fn seed_of(field: &FieldSchema) -> Option<Value> {
    let seed = field.kind.seed_value();
    if seed.is_none() {
        log::error!("field {:?} has an unrecognized type; skipping it", field.id);
    }
    seed
}

/// Dispatch one field to its renderer. `None` when it has no fragment.
fn render_field(field: &FieldSchema, on_change: OnChange) -> Option<Rendered> {
    let name = field.name.as_str();
    match &field.kind {
        FieldKind::Text { value } => Some(fields::text(name, value, on_change)),
        FieldKind::Slider { value, .. } => Some(fields::slider(name, *value, field.kind.bounds()?, on_change)),
        FieldKind::Vector3 { value, .. } => Some(fields::vector3(name, *value, field.kind.bounds()?, on_change)),
        FieldKind::Check { value } => Some(fields::check(name, *value, on_change)),
        FieldKind::Array { inner } => Some(render_array(name, inner, on_change)),
        FieldKind::Settings { inner } => {
            let nested: SnapshotCallback = Rc::new(move |snapshot: &Snapshot| on_change(snapshot.to_value()));
            Some(render_settings(name, inner, nested))
        }
        FieldKind::Data { .. } | FieldKind::Unknown => None,
    }
}
