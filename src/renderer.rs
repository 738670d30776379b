//! Renderer collaborator contract and the per-frame driver.
//!
//! The WebGL renderer itself lives outside this crate. [`Renderer`] is the
//! method contract the harness calls on it; [`FrameLoop`] owns one renderer
//! and runs it once per animation frame: compute `dt`, apply camera controls,
//! `update`, then `render_gl`. Settings snapshots reach the renderer through
//! [`snapshot_bridge`]; one that arrives while the loop is busy waits in the
//! loop's [`Inbox`] and is applied at the start of the next frame.

#[cfg(test)]
#[path = "renderer_test.rs"]
mod renderer_test;

use std::cell::RefCell;
use std::rc::Rc;

use crate::coalesce::coalesce;
use crate::config::ControlConfig;
use crate::consts::MS_PER_SECOND;
use crate::controls::CameraControls;
use crate::listeners::Listener;
use crate::snapshot::Snapshot;

/// Error reported by a renderer's `update` step.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("renderer update failed: {0}")]
pub struct RenderError(pub String);

/// Handle for nudging the scene camera.
pub trait CameraHandle {
    fn add_position(&self, dx: f64, dy: f64, dz: f64);
    fn add_angle(&self, dx: f64, dy: f64, dz: f64);
}

/// The renderer collaborator contract.
pub trait Renderer {
    type Camera: CameraHandle;

    /// Match the drawing surface to its container.
    fn resize(&mut self);

    /// Advance the scene by `dt` seconds.
    ///
    /// # Errors
    ///
    /// Returns a [`RenderError`] when the scene could not be advanced; the
    /// frame loop logs it and keeps running.
    fn update(&mut self, dt: f64) -> Result<(), RenderError>;

    fn render_gl(&mut self);

    fn camera_handle(&self) -> Self::Camera;

    /// Apply a committed settings snapshot.
    fn handle_client_update(&mut self, snapshot: &Snapshot);
}

/// Slot holding the newest settings snapshot not yet applied to the renderer.
pub type Inbox = Rc<RefCell<Option<Snapshot>>>;

/// Drives one renderer from animation-frame timestamps.
pub struct FrameLoop<R: Renderer> {
    renderer: R,
    camera: R::Camera,
    pub controls: CameraControls,
    last_ms: f64,
    inbox: Inbox,
}

impl<R: Renderer> FrameLoop<R> {
    #[must_use]
    pub fn new(renderer: R, config: ControlConfig) -> Self {
        let camera = renderer.camera_handle();
        Self { renderer, camera, controls: CameraControls::new(config), last_ms: 0.0, inbox: Inbox::default() }
    }

    /// The slot [`snapshot_bridge`] parks updates in while this loop is borrowed.
    #[must_use]
    pub fn inbox(&self) -> Inbox {
        Rc::clone(&self.inbox)
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    /// Run one frame at timestamp `now_ms`, returning the elapsed seconds.
    ///
    /// The first frame measures from time zero, as `requestAnimationFrame`
    /// timestamps do. A parked settings update is applied first.
    pub fn tick(&mut self, now_ms: f64, gamepads: &[Vec<f64>]) -> f64 {
        let parked = self.inbox.borrow_mut().take();
        if let Some(snapshot) = parked {
            self.renderer.handle_client_update(&snapshot);
        }

        let dt = (now_ms - self.last_ms) / MS_PER_SECOND;
        self.last_ms = now_ms;

        self.controls.apply(&self.camera, dt, gamepads);

        if let Err(err) = self.renderer.update(dt) {
            log::error!("{err}");
        }
        self.renderer.render_gl();
        dt
    }

    pub fn resize(&mut self) {
        self.renderer.resize();
    }

    pub fn client_update(&mut self, snapshot: &Snapshot) {
        self.renderer.handle_client_update(snapshot);
    }
}

/// A coalesced listener forwarding snapshots to `target`'s renderer.
///
/// `inbox` must be `target`'s [`FrameLoop::inbox`]. A snapshot arriving while
/// the frame loop is borrowed elsewhere replaces whatever is parked there and
/// is applied on the next [`FrameLoop::tick`].
#[must_use]
pub fn snapshot_bridge<R: Renderer + 'static>(target: Rc<RefCell<FrameLoop<R>>>, inbox: Inbox) -> Listener {
    coalesce(Rc::new(move |snapshot: &Snapshot| match target.try_borrow_mut() {
        Ok(mut frame_loop) => {
            *inbox.borrow_mut() = None;
            frame_loop.client_update(snapshot);
        }
        Err(_) => {
            log::debug!("renderer busy; parking settings update");
            *inbox.borrow_mut() = Some(snapshot.clone());
        }
    }))
}
