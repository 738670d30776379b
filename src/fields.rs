//! Leaf field renderers.
//!
//! Each renderer returns a [`Rendered`] pair: the field's view fragment and a
//! setter that overwrites what the control displays without reporting a
//! change. Every renderer calls its `on_change` once synchronously while it is
//! being built, so the enclosing group's snapshot is seeded from what the
//! control actually shows, and again on every later input event.

#[cfg(test)]
#[path = "fields_test.rs"]
mod fields_test;

use std::cell::RefCell;
use std::rc::Rc;

use serde_json::Value;

use crate::consts::{FIELD_CLASS, INPUT_CLASS, VECTOR_AXES};
use crate::schema::Bounds;
use crate::view::{Input, InputKind, InputValue, Node};

/// Receives the field's new value.
pub type OnChange = Rc<dyn Fn(Value)>;

/// Overwrites the displayed value without firing `on_change`.
pub type Setter = Box<dyn Fn(&Value)>;

/// A rendered field: its fragment plus its setter.
pub struct Rendered {
    pub node: Node,
    pub setter: Setter,
}

/// A field wrapper `div.field.<classes>` with an optional `p` label.
pub(crate) fn named_div<'a>(name: &str, classes: impl IntoIterator<Item = &'a str>) -> Node {
    let mut div = Node::element("div").class(FIELD_CLASS);
    for class in classes {
        div = div.class(class);
    }
    if !name.is_empty() {
        div = div.child(Node::element("p").text(name));
    }
    div
}

fn parse_number(value: &InputValue) -> Option<f64> {
    match value {
        InputValue::Text(text) => match text.trim().parse::<f64>() {
            Ok(number) if number.is_finite() => Some(number),
            _ => {
                log::warn!("ignoring non-numeric input {text:?}");
                None
            }
        },
        InputValue::Checked(_) => None,
    }
}

/// Single-line text input reporting the string on every edit.
pub fn text(name: &str, value: &str, on_change: OnChange) -> Rendered {
    let input = Input::new(InputKind::Text, InputValue::text(value));
    {
        let on_change = Rc::clone(&on_change);
        input.on_input(move |v| on_change(Value::from(v.to_string())));
    }

    let node = named_div(name, ["text_field"]).child(Node::input(Rc::clone(&input)).class(INPUT_CLASS));
    on_change(Value::from(input.value().to_string()));

    let setter = Box::new(move |v: &Value| match v.as_str() {
        Some(text) => input.set_value(InputValue::text(text)),
        None => log::warn!("text field {v} is not a string"),
    });
    Rendered { node, setter }
}

/// Range input over `bounds`, reporting the parsed number.
pub fn slider(name: &str, value: f64, bounds: Bounds, on_change: OnChange) -> Rendered {
    let input = Input::range(bounds, value);
    {
        let on_change = Rc::clone(&on_change);
        input.on_input(move |v| {
            if let Some(number) = parse_number(v) {
                on_change(Value::from(number));
            }
        });
    }

    let node = named_div(name, ["slider"]).child(Node::input(Rc::clone(&input)).class(INPUT_CLASS));
    if let Some(number) = parse_number(&input.value()) {
        on_change(Value::from(number));
    }

    let setter = Box::new(move |v: &Value| match v.as_f64() {
        Some(number) => input.set_value(InputValue::text(bounds.clamp(number).to_string())),
        None => log::warn!("slider value {v} is not a number"),
    });
    Rendered { node, setter }
}

/// Three range inputs editing one shared `[x, y, z]` buffer.
///
/// Editing any component reports the whole vector.
pub fn vector3(name: &str, value: [f64; 3], bounds: Bounds, on_change: OnChange) -> Rendered {
    let buffer = Rc::new(RefCell::new(value.map(|c| bounds.clamp(c))));
    let mut inner = Node::element("div").class(INPUT_CLASS);
    let mut inputs = Vec::with_capacity(VECTOR_AXES.len());

    for (index, axis) in VECTOR_AXES.iter().enumerate() {
        let input = Input::range(bounds, buffer.borrow()[index]);
        {
            let buffer = Rc::clone(&buffer);
            let on_change = Rc::clone(&on_change);
            input.on_input(move |v| {
                let Some(number) = parse_number(v) else {
                    return;
                };
                let current = {
                    let mut buffer = buffer.borrow_mut();
                    buffer[index] = number;
                    *buffer
                };
                on_change(Value::from(current.to_vec()));
            });
        }
        inner.push(named_div(axis, ["slider"]).child(Node::input(Rc::clone(&input)).class(INPUT_CLASS)));
        inputs.push(input);
    }

    let node = named_div(name, ["vector3"]).child(inner);
    let seed = *buffer.borrow();
    on_change(Value::from(seed.to_vec()));

    let setter = Box::new(move |v: &Value| {
        let Some(components) = v.as_array().filter(|c| c.len() == VECTOR_AXES.len()) else {
            log::warn!("vector value {v} is not a 3-element array");
            return;
        };
        for (index, (component, input)) in components.iter().zip(&inputs).enumerate() {
            let Some(number) = component.as_f64() else {
                log::warn!("vector component {component} is not a number");
                continue;
            };
            let number = bounds.clamp(number);
            buffer.borrow_mut()[index] = number;
            input.set_value(InputValue::text(number.to_string()));
        }
    });
    Rendered { node, setter }
}

/// Checkbox reporting its checked state.
pub fn check(name: &str, value: bool, on_change: OnChange) -> Rendered {
    let input = Input::new(InputKind::Checkbox, InputValue::Checked(value));
    {
        let on_change = Rc::clone(&on_change);
        input.on_input(move |v| match v {
            InputValue::Checked(checked) => on_change(Value::Bool(*checked)),
            InputValue::Text(text) => log::warn!("checkbox received text input {text:?}"),
        });
    }

    let node = named_div(name, ["check"]).child(Node::input(Rc::clone(&input)).class(INPUT_CLASS));
    on_change(Value::Bool(value));

    let setter = Box::new(move |v: &Value| match v.as_bool() {
        Some(checked) => input.set_value(InputValue::Checked(checked)),
        None => log::warn!("check value {v} is not a boolean"),
    });
    Rendered { node, setter }
}
