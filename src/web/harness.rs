//! Camera harness exported to JavaScript.
//!
//! The WebGL renderer is a JS-side object; [`JsRenderer`] imports its method
//! contract so the Rust [`FrameLoop`] can drive it. [`Harness`] is what the
//! page constructs: it forwards keyboard events, polls gamepads once per
//! animation frame, and subscribes the renderer to settings changes.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Gamepad;

use crate::config::ControlConfig;
use crate::listeners::ListenerId;
use crate::renderer::{snapshot_bridge, CameraHandle, FrameLoop, Inbox, RenderError, Renderer};
use crate::snapshot::Snapshot;

use super::{from_js, to_js, with_panel};

#[wasm_bindgen]
extern "C" {
    /// Renderer object supplied by the page.
    pub type JsRenderer;

    #[wasm_bindgen(method)]
    fn resize(this: &JsRenderer);

    #[wasm_bindgen(method, catch)]
    fn update(this: &JsRenderer, dt: f64) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(method)]
    fn render_gl(this: &JsRenderer);

    #[wasm_bindgen(method)]
    fn camera_handle(this: &JsRenderer) -> JsCameraHandle;

    #[wasm_bindgen(method)]
    fn handle_client_update(this: &JsRenderer, snapshot: &JsValue);

    /// Camera handle returned by the renderer.
    pub type JsCameraHandle;

    #[wasm_bindgen(method)]
    fn add_position(this: &JsCameraHandle, dx: f64, dy: f64, dz: f64);

    #[wasm_bindgen(method)]
    fn add_angle(this: &JsCameraHandle, dx: f64, dy: f64, dz: f64);
}

impl CameraHandle for JsCameraHandle {
    fn add_position(&self, dx: f64, dy: f64, dz: f64) {
        JsCameraHandle::add_position(self, dx, dy, dz);
    }

    fn add_angle(&self, dx: f64, dy: f64, dz: f64) {
        JsCameraHandle::add_angle(self, dx, dy, dz);
    }
}

impl Renderer for JsRenderer {
    type Camera = JsCameraHandle;

    fn resize(&mut self) {
        JsRenderer::resize(self);
    }

    /// The JS `update` returns an error value or null; both a thrown error
    /// and a non-null return count as failure.
    fn update(&mut self, dt: f64) -> Result<(), RenderError> {
        match JsRenderer::update(self, dt) {
            Ok(value) if value.is_null() || value.is_undefined() => Ok(()),
            Ok(value) | Err(value) => Err(RenderError(value.as_string().unwrap_or_else(|| format!("{value:?}")))),
        }
    }

    fn render_gl(&mut self) {
        JsRenderer::render_gl(self);
    }

    fn camera_handle(&self) -> JsCameraHandle {
        JsRenderer::camera_handle(self)
    }

    fn handle_client_update(&mut self, snapshot: &Snapshot) {
        match to_js(snapshot) {
            Ok(value) => JsRenderer::handle_client_update(self, &value),
            Err(err) => log::error!("failed to convert snapshot for renderer: {err}"),
        }
    }
}

/// Axes of every connected gamepad.
fn poll_gamepads() -> Vec<Vec<f64>> {
    let Some(window) = web_sys::window() else {
        return Vec::new();
    };
    let pads = match window.navigator().get_gamepads() {
        Ok(pads) => pads,
        Err(err) => {
            log::debug!("gamepads unavailable: {err:?}");
            return Vec::new();
        }
    };
    pads.iter()
        .filter_map(|pad| pad.dyn_ref::<Gamepad>().cloned())
        .filter(Gamepad::connected)
        .map(|pad| pad.axes().iter().filter_map(|a| a.as_f64()).collect())
        .collect()
}

#[wasm_bindgen]
pub struct Harness {
    frame_loop: Rc<RefCell<FrameLoop<JsRenderer>>>,
    inbox: Inbox,
    listener: Option<ListenerId>,
}

#[wasm_bindgen]
impl Harness {
    /// Wrap `renderer`. `config` is an optional partial [`ControlConfig`] object.
    #[wasm_bindgen(constructor)]
    pub fn new(renderer: JsRenderer, config: JsValue) -> Result<Harness, JsValue> {
        let config: ControlConfig =
            if config.is_undefined() || config.is_null() { ControlConfig::default() } else { from_js(&config)? };
        let frame_loop = FrameLoop::new(renderer, config);
        let inbox = frame_loop.inbox();
        Ok(Self { frame_loop: Rc::new(RefCell::new(frame_loop)), inbox, listener: None })
    }

    /// Forward every committed settings snapshot to the renderer.
    pub fn subscribe(&mut self) -> Result<(), JsValue> {
        if self.listener.is_some() {
            return Ok(());
        }
        let bridge = snapshot_bridge(Rc::clone(&self.frame_loop), Rc::clone(&self.inbox));
        let id = with_panel(|panel| panel.add_settings_change_listener(move |s| bridge(s)))?;
        self.listener = Some(id);
        Ok(())
    }

    /// Stop forwarding settings snapshots.
    pub fn unsubscribe(&mut self) -> Result<bool, JsValue> {
        match self.listener.take() {
            Some(id) => Ok(with_panel(|panel| panel.remove_settings_change_listener(id))?),
            None => Ok(false),
        }
    }

    /// `from_input` is true when the event target is a form input.
    pub fn key_down(&self, key: &str, from_input: bool) -> bool {
        match self.frame_loop.try_borrow_mut() {
            Ok(mut frame_loop) => frame_loop.controls.key_down(key, from_input),
            Err(_) => false,
        }
    }

    pub fn key_up(&self, key: &str, from_input: bool) -> bool {
        match self.frame_loop.try_borrow_mut() {
            Ok(mut frame_loop) => frame_loop.controls.key_up(key, from_input),
            Err(_) => false,
        }
    }

    pub fn resize(&self) {
        match self.frame_loop.try_borrow_mut() {
            Ok(mut frame_loop) => frame_loop.resize(),
            Err(_) => log::warn!("renderer busy; skipping resize"),
        }
    }

    /// Run one animation frame at timestamp `time` (milliseconds).
    pub fn frame(&self, time: f64) -> f64 {
        let gamepads = poll_gamepads();
        match self.frame_loop.try_borrow_mut() {
            Ok(mut frame_loop) => frame_loop.tick(time, &gamepads),
            Err(_) => {
                log::warn!("renderer busy; skipping frame");
                0.0
            }
        }
    }
}
