//! Mount a [`Node`] tree into the page and forward DOM input events into it.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, HtmlInputElement};

use crate::config::PanelConfig;
use crate::error::PanelError;
use crate::listeners::ListenerId;
use crate::panel::SettingsPanel;
use crate::schema::SettingsSchema;
use crate::snapshot::Snapshot;
use crate::view::{InputHandle, InputKind, InputValue, Node};

type InputListener = Closure<dyn FnMut(Event)>;

/// An `input` listener attached to a mounted element.
struct Binding {
    element: HtmlInputElement,
    listener: InputListener,
}

impl Binding {
    fn detach(&self) {
        if let Err(err) = self
            .element
            .remove_event_listener_with_callback("input", self.listener.as_ref().unchecked_ref())
        {
            log::warn!("failed to detach input listener: {err:?}");
        }
    }
}

/// The settings panel bound to the page.
///
/// Wraps [`SettingsPanel`] and owns the DOM event bindings of the current
/// render; they are detached and dropped on every `set_settings`.
pub struct DomPanel {
    config: PanelConfig,
    pub core: SettingsPanel,
    bindings: Vec<Binding>,
    // Detached bindings outlive one more render: `set_settings` may be
    // running inside one of their closures.
    retired: Vec<Binding>,
}

impl DomPanel {
    #[must_use]
    pub fn new(config: PanelConfig) -> Self {
        Self { config, core: SettingsPanel::new(), bindings: Vec::new(), retired: Vec::new() }
    }

    #[must_use]
    pub fn config(&self) -> &PanelConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: PanelConfig) {
        self.config = config;
    }

    pub fn add_settings_change_listener(&self, listener: impl Fn(&Snapshot) + 'static) -> ListenerId {
        self.core.add_settings_change_listener(listener)
    }

    pub fn remove_settings_change_listener(&self, id: ListenerId) -> bool {
        self.core.remove_settings_change_listener(id)
    }

    /// Replace the container's children with a fresh render of `schema`.
    ///
    /// # Errors
    ///
    /// Returns an error when there is no document, the container is missing,
    /// or a DOM call throws.
    pub fn set_settings(&mut self, schema: &SettingsSchema) -> Result<(), PanelError> {
        let document = web_sys::window().and_then(|w| w.document()).ok_or(PanelError::NoDocument)?;
        let container = document
            .get_element_by_id(&self.config.container_id)
            .ok_or_else(|| PanelError::MissingContainer(self.config.container_id.clone()))?;

        self.retired.clear();
        for binding in &self.bindings {
            binding.detach();
        }
        self.retired.append(&mut self.bindings);
        container.set_inner_html("");

        let root = self.core.set_settings(schema);
        let element = mount(&document, root, &mut self.bindings)?;
        container.append_child(&element).map_err(|e| PanelError::dom(&e))?;
        Ok(())
    }
}

/// Create the DOM subtree for `node`, binding every input it contains.
fn mount(document: &Document, node: &Node, bindings: &mut Vec<Binding>) -> Result<Element, PanelError> {
    let element = document.create_element(node.tag).map_err(|e| PanelError::dom(&e))?;
    for class in &node.classes {
        element.class_list().add_1(class).map_err(|e| PanelError::dom(&e))?;
    }
    if let Some(text) = &node.text {
        element.set_text_content(Some(text));
    }
    if let Some(handle) = &node.input {
        let input = element
            .clone()
            .dyn_into::<HtmlInputElement>()
            .map_err(|_| PanelError::Dom(format!("<{}> is not an input element", node.tag)))?;
        bindings.push(bind_input(&input, handle)?);
    }
    for child in &node.children {
        let child = mount(document, child, bindings)?;
        element.append_child(&child).map_err(|e| PanelError::dom(&e))?;
    }
    Ok(element)
}

fn write_value(input: &HtmlInputElement, value: &InputValue) {
    match value {
        InputValue::Text(text) => input.set_value(text),
        InputValue::Checked(checked) => input.set_checked(*checked),
    }
}

fn read_value(input: &HtmlInputElement, kind: InputKind) -> InputValue {
    match kind {
        InputKind::Checkbox => InputValue::Checked(input.checked()),
        InputKind::Text | InputKind::Range => InputValue::Text(input.value()),
    }
}

/// Configure `input` from `handle` and route events both ways.
fn bind_input(input: &HtmlInputElement, handle: &InputHandle) -> Result<Binding, PanelError> {
    input.set_type(handle.kind().as_str());
    if let Some(bounds) = handle.bounds() {
        input.set_min(&bounds.min.to_string());
        input.set_max(&bounds.max.to_string());
        input.set_step(&bounds.inc.to_string());
    }
    write_value(input, &handle.value());

    {
        let sink = input.clone();
        handle.bind(move |value| write_value(&sink, value));
    }

    let listener: InputListener = {
        let source = input.clone();
        let handle = InputHandle::clone(handle);
        Closure::wrap(Box::new(move |_event: Event| {
            handle.input(read_value(&source, handle.kind()));
        }) as Box<dyn FnMut(Event)>)
    };
    input
        .add_event_listener_with_callback("input", listener.as_ref().unchecked_ref())
        .map_err(|e| PanelError::dom(&e))?;

    Ok(Binding { element: input.clone(), listener })
}
