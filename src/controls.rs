//! Camera controls: keyboard movement flags and gamepad sticks.
//!
//! Keys toggle movement flags on keydown/keyup. Once per frame the flags and
//! every connected gamepad's axes are turned into position and angle deltas
//! for the renderer's camera handle, scaled by the frame's elapsed seconds.

#[cfg(test)]
#[path = "controls_test.rs"]
mod controls_test;

use crate::config::ControlConfig;
use crate::renderer::CameraHandle;

/// Which movement directions are currently held.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Movement {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub forward: bool,
    pub back: bool,
}

impl Movement {
    /// Update the flag bound to `key`. Returns whether the key is bound.
    pub fn apply_key(&mut self, key: &str, pressed: bool) -> bool {
        let flag = match key {
            "w" => &mut self.back,
            "s" => &mut self.forward,
            "a" => &mut self.left,
            "d" => &mut self.right,
            _ => return false,
        };
        *flag = pressed;
        true
    }

    /// Unit direction per axis: `+1`, `-1`, or `0` when neither or both are held.
    #[must_use]
    pub fn direction(&self) -> [f64; 3] {
        fn axis(positive: bool, negative: bool) -> f64 {
            f64::from(i8::from(positive) - i8::from(negative))
        }
        [axis(self.right, self.left), axis(self.up, self.down), axis(self.forward, self.back)]
    }
}

/// Keyboard state plus the tuning that scales it.
#[derive(Debug, Clone, Default)]
pub struct CameraControls {
    pub config: ControlConfig,
    pub movement: Movement,
}

impl CameraControls {
    #[must_use]
    pub fn new(config: ControlConfig) -> Self {
        Self { config, movement: Movement::default() }
    }

    /// Handle a keydown. Keys typed into a form input are ignored.
    pub fn key_down(&mut self, key: &str, from_input: bool) -> bool {
        !from_input && self.movement.apply_key(key, true)
    }

    /// Handle a keyup. Keys typed into a form input are ignored.
    pub fn key_up(&mut self, key: &str, from_input: bool) -> bool {
        !from_input && self.movement.apply_key(key, false)
    }

    /// Zero out axes inside the dead zone.
    #[must_use]
    pub fn filter_axis(&self, value: f64) -> f64 {
        if value * value > self.config.dead_zone { value } else { 0.0 }
    }

    /// Keyboard translation for a frame of `dt` seconds.
    #[must_use]
    pub fn keyboard_delta(&self, dt: f64) -> [f64; 3] {
        let step = self.config.move_speed * dt;
        self.movement.direction().map(|d| d * step)
    }

    /// Translation and rotation for one gamepad's axes over `dt` seconds.
    ///
    /// Axes 0/1 move along x/z, axis 3 pitches and axis 2 yaws. Missing axes
    /// read as zero.
    #[must_use]
    pub fn gamepad_delta(&self, axes: &[f64], dt: f64) -> ([f64; 3], [f64; 3]) {
        let axis = |i: usize| self.filter_axis(axes.get(i).copied().unwrap_or(0.0));
        let step = self.config.move_speed * dt;
        let position = [axis(0) * step, 0.0, axis(1) * step];
        let angle = [
            -self.config.sensitivity_x * axis(3) * dt,
            -self.config.sensitivity_y * axis(2) * dt,
            0.0,
        ];
        (position, angle)
    }

    /// Push this frame's deltas into `camera`.
    ///
    /// The keyboard translation is always sent; each gamepad adds one
    /// translation and one rotation.
    pub fn apply(&self, camera: &impl CameraHandle, dt: f64, gamepads: &[Vec<f64>]) {
        let [dx, dy, dz] = self.keyboard_delta(dt);
        camera.add_position(dx, dy, dz);

        for axes in gamepads {
            let ([px, py, pz], [ax, ay, az]) = self.gamepad_delta(axes, dt);
            camera.add_position(px, py, pz);
            camera.add_angle(ax, ay, az);
        }
    }
}
