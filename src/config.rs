//! Runtime configuration for the panel and the camera controls.
//!
//! Both structs deserialize from a partial JSON object supplied by the host
//! page; any missing key falls back to the value in [`crate::consts`].

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};

use crate::consts::{AXIS_DEAD_ZONE, MOVE_SPEED, SENSITIVITY_X, SENSITIVITY_Y, SETTINGS_CONTAINER_ID};

/// Where the panel renders and how loudly it logs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelConfig {
    /// Id of the container element replaced on every `set_settings`.
    pub container_id: String,
    /// Minimum log level for the browser console backend.
    pub log_level: String,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self { container_id: SETTINGS_CONTAINER_ID.to_owned(), log_level: "debug".to_owned() }
    }
}

impl PanelConfig {
    /// Parsed log level, falling back to `Debug` for unrecognized names.
    #[must_use]
    pub fn level(&self) -> log::Level {
        self.log_level.parse().unwrap_or(log::Level::Debug)
    }
}

/// Tuning for keyboard and gamepad camera movement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlConfig {
    /// Translation speed in world units per second.
    pub move_speed: f64,
    /// Rotation rate driven by the right stick's vertical axis.
    pub sensitivity_x: f64,
    /// Rotation rate driven by the right stick's horizontal axis.
    pub sensitivity_y: f64,
    /// Squared deflection an axis must exceed to count.
    pub dead_zone: f64,
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self {
            move_speed: MOVE_SPEED,
            sensitivity_x: SENSITIVITY_X,
            sensitivity_y: SENSITIVITY_Y,
            dead_zone: AXIS_DEAD_ZONE,
        }
    }
}
