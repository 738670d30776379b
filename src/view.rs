//! Browser-independent element tree produced by the renderers.
//!
//! Renderers build [`Node`]s instead of touching the DOM directly. Each input
//! element carries an [`InputHandle`] that owns the displayed value and the
//! native input callback, so the full edit path (control, group bubbling,
//! listener fanout) can be driven from tests by calling [`Input::input`].
//! The [`crate::web`] layer mounts the tree and forwards real DOM events into
//! the same handles.

#[cfg(test)]
#[path = "view_test.rs"]
mod view_test;

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::consts::FIELD_CLASS;
use crate::schema::Bounds;

/// The `type` attribute of an input element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Text,
    Range,
    Checkbox,
}

impl InputKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Range => "range",
            Self::Checkbox => "checkbox",
        }
    }
}

/// What an input currently displays.
///
/// Text and range inputs hold their string value; checkboxes hold `checked`.
#[derive(Debug, Clone, PartialEq)]
pub enum InputValue {
    Text(String),
    Checked(bool),
}

impl InputValue {
    #[must_use]
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }
}

impl fmt::Display for InputValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Checked(checked) => write!(f, "{checked}"),
        }
    }
}

type InputCallback = Box<dyn Fn(&InputValue)>;

/// Live state of one input element.
pub struct Input {
    kind: InputKind,
    bounds: Option<Bounds>,
    value: RefCell<InputValue>,
    on_input: RefCell<Option<InputCallback>>,
    sink: RefCell<Option<InputCallback>>,
}

/// Shared handle to an [`Input`]; the tree and the callbacks both hold one.
pub type InputHandle = Rc<Input>;

impl fmt::Debug for Input {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Input")
            .field("kind", &self.kind)
            .field("bounds", &self.bounds)
            .field("value", &*self.value.borrow())
            .finish_non_exhaustive()
    }
}

impl Input {
    #[must_use]
    pub fn new(kind: InputKind, value: InputValue) -> InputHandle {
        Rc::new(Self {
            kind,
            bounds: None,
            value: RefCell::new(value),
            on_input: RefCell::new(None),
            sink: RefCell::new(None),
        })
    }

    /// A range input constrained to `bounds`.
    #[must_use]
    pub fn range(bounds: Bounds, value: f64) -> InputHandle {
        Rc::new(Self {
            kind: InputKind::Range,
            bounds: Some(bounds),
            value: RefCell::new(InputValue::Text(bounds.clamp(value).to_string())),
            on_input: RefCell::new(None),
            sink: RefCell::new(None),
        })
    }

    #[must_use]
    pub fn kind(&self) -> InputKind {
        self.kind
    }

    #[must_use]
    pub fn bounds(&self) -> Option<Bounds> {
        self.bounds
    }

    #[must_use]
    pub fn value(&self) -> InputValue {
        self.value.borrow().clone()
    }

    /// Install the callback fired on every native input event.
    pub fn on_input(&self, callback: impl Fn(&InputValue) + 'static) {
        *self.on_input.borrow_mut() = Some(Box::new(callback));
    }

    /// Attach the mounted element so programmatic writes reach the page.
    pub fn bind(&self, sink: impl Fn(&InputValue) + 'static) {
        *self.sink.borrow_mut() = Some(Box::new(sink));
    }

    /// Overwrite the displayed value without firing the input callback.
    pub fn set_value(&self, value: InputValue) {
        let value = self.normalize(value);
        *self.value.borrow_mut() = value.clone();
        if let Some(sink) = self.sink.borrow().as_ref() {
            sink(&value);
        }
    }

    /// Deliver a native input event: store the new value, then fire the callback.
    pub fn input(&self, value: InputValue) {
        let value = self.normalize(value);
        *self.value.borrow_mut() = value.clone();
        if let Some(callback) = self.on_input.borrow().as_ref() {
            callback(&value);
        }
    }

    /// Clamp range values the way the browser does.
    fn normalize(&self, value: InputValue) -> InputValue {
        let (Some(bounds), InputValue::Text(text)) = (self.bounds, &value) else {
            return value;
        };
        match text.trim().parse::<f64>() {
            Ok(number) if !bounds.contains(number) => InputValue::Text(bounds.clamp(number).to_string()),
            _ => value,
        }
    }
}

/// One element of the rendered form.
#[derive(Debug, Clone)]
pub struct Node {
    pub tag: &'static str,
    pub classes: Vec<String>,
    pub text: Option<String>,
    pub input: Option<InputHandle>,
    pub children: Vec<Node>,
}

impl Node {
    #[must_use]
    pub fn element(tag: &'static str) -> Self {
        Self { tag, classes: Vec::new(), text: None, input: None, children: Vec::new() }
    }

    /// An `<input>` element bound to `handle`.
    #[must_use]
    pub fn input(handle: InputHandle) -> Self {
        Self { input: Some(handle), ..Self::element("input") }
    }

    #[must_use]
    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    #[must_use]
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    #[must_use]
    pub fn child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    pub fn push(&mut self, child: Node) {
        self.children.push(child);
    }

    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// The label text of a field wrapper, if this node is one.
    #[must_use]
    pub fn label(&self) -> Option<&str> {
        if !self.has_class(FIELD_CLASS) {
            return None;
        }
        self.children.first().filter(|c| c.tag == "p").and_then(|c| c.text.as_deref())
    }

    /// Every input handle in the subtree, in document order.
    #[must_use]
    pub fn inputs(&self) -> Vec<InputHandle> {
        let mut out = Vec::new();
        self.collect_inputs(&mut out);
        out
    }

    fn collect_inputs(&self, out: &mut Vec<InputHandle>) {
        if let Some(input) = &self.input {
            out.push(Rc::clone(input));
        }
        for child in &self.children {
            child.collect_inputs(out);
        }
    }

    /// First field wrapper in the subtree labelled `label`, searched depth-first.
    #[must_use]
    pub fn find_field(&self, label: &str) -> Option<&Node> {
        if self.label() == Some(label) {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find_field(label))
    }

    /// First input of the field labelled `label`.
    #[must_use]
    pub fn find_input(&self, label: &str) -> Option<InputHandle> {
        self.find_field(label).and_then(|field| field.inputs().into_iter().next())
    }
}

/// HTML-like outline of the tree, used for logging and structural comparison.
impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}", self.tag)?;
        if !self.classes.is_empty() {
            write!(f, " class=\"{}\"", self.classes.join(" "))?;
        }
        if let Some(input) = &self.input {
            write!(f, " type=\"{}\"", input.kind().as_str())?;
            if let Some(bounds) = input.bounds() {
                write!(f, " min=\"{}\" max=\"{}\" step=\"{}\"", bounds.min, bounds.max, bounds.inc)?;
            }
            write!(f, " value=\"{}\"/>", input.value())?;
            return Ok(());
        }
        f.write_str(">")?;
        if let Some(text) = &self.text {
            f.write_str(text)?;
        }
        for child in &self.children {
            write!(f, "{child}")?;
        }
        write!(f, "</{}>", self.tag)
    }
}
