//! Browser bindings.
//!
//! The page calls `set_settings(schema)` to (re)render the panel and
//! `addSettingsChangeListener(cb)` to subscribe to committed snapshots. Both
//! operate on one [`DomPanel`] per thread, created on first use with the
//! default [`PanelConfig`]; `configurePanel` replaces that config.
//!
//! Values cross the boundary as JSON through `JSON.stringify` / `JSON.parse`.

pub mod dom;
pub mod harness;

use std::cell::RefCell;

use serde::de::DeserializeOwned;
use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::config::PanelConfig;
use crate::error::PanelError;
use crate::listeners::ListenerId;
use crate::schema::SettingsSchema;

pub use dom::DomPanel;
pub use harness::Harness;

thread_local! {
    static PANEL: RefCell<DomPanel> = RefCell::new(DomPanel::new(PanelConfig::default()));
}

/// Run `f` against the thread's panel.
///
/// # Errors
///
/// Returns [`PanelError::Busy`] when called from inside a listener that the
/// panel is currently notifying.
pub fn with_panel<R>(f: impl FnOnce(&mut DomPanel) -> R) -> Result<R, PanelError> {
    PANEL.with(|panel| match panel.try_borrow_mut() {
        Ok(mut panel) => Ok(f(&mut panel)),
        Err(_) => Err(PanelError::Busy),
    })
}

pub(crate) fn from_js<T: DeserializeOwned>(value: &JsValue) -> Result<T, PanelError> {
    let json: String = js_sys::JSON::stringify(value).map_err(|e| PanelError::dom(&e))?.into();
    Ok(serde_json::from_str(&json)?)
}

pub(crate) fn to_js<T: Serialize>(value: &T) -> Result<JsValue, PanelError> {
    let json = serde_json::to_string(value)?;
    js_sys::JSON::parse(&json).map_err(|e| PanelError::dom(&e))
}

/// Install the panic hook and console logger when the module loads.
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let level = PanelConfig::default().level();
    if console_log::init_with_level(level).is_err() {
        web_sys::console::warn_1(&JsValue::from_str("logger already initialized"));
    }
}

/// Replace the panel configuration (container id, log level).
#[wasm_bindgen(js_name = configurePanel)]
pub fn configure_panel(config: JsValue) -> Result<(), JsValue> {
    let config: PanelConfig = from_js(&config)?;
    log::set_max_level(config.level().to_level_filter());
    with_panel(|panel| panel.set_config(config))?;
    Ok(())
}

/// Render `schema` into the settings container, replacing any previous render.
#[wasm_bindgen]
pub fn set_settings(schema: JsValue) -> Result<(), JsValue> {
    let schema: SettingsSchema = from_js(&schema)?;
    with_panel(|panel| panel.set_settings(&schema))??;
    Ok(())
}

/// Subscribe `callback` to every committed snapshot. Returns an id for removal.
#[wasm_bindgen(js_name = addSettingsChangeListener)]
pub fn add_settings_change_listener(callback: js_sys::Function) -> Result<u32, JsValue> {
    let id = with_panel(|panel| {
        panel.add_settings_change_listener(move |snapshot| {
            let value = match to_js(snapshot) {
                Ok(value) => value,
                Err(err) => {
                    log::error!("failed to convert snapshot for listener: {err}");
                    return;
                }
            };
            if let Err(err) = callback.call1(&JsValue::NULL, &value) {
                log::error!("settings listener threw: {err:?}");
            }
        })
    })?;
    Ok(id.get())
}

#[wasm_bindgen(js_name = removeSettingsChangeListener)]
pub fn remove_settings_change_listener(id: u32) -> Result<bool, JsValue> {
    Ok(with_panel(|panel| panel.remove_settings_change_listener(ListenerId::from_raw(id)))?)
}
