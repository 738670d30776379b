//! Shared constants for the settings panel and camera harness.

// ── Panel ───────────────────────────────────────────────────────

/// Id of the DOM element the settings panel renders into.
pub const SETTINGS_CONTAINER_ID: &str = "settings";

/// Class shared by every field wrapper element.
pub const FIELD_CLASS: &str = "field";

/// Class on the element holding a control or a group's children.
pub const INPUT_CLASS: &str = "input";

// ── Schema bounds ───────────────────────────────────────────────

/// Lower bound for sliders and vectors when the schema omits `min`.
pub const DEFAULT_MIN: f64 = 0.0;

/// Upper bound for sliders and vectors when the schema omits `max`.
pub const DEFAULT_MAX: f64 = 1.0;

/// Step for sliders and vectors when the schema omits `inc`.
pub const DEFAULT_INC: f64 = 0.01;

/// Labels for the three sub-inputs of a vector field.
pub const VECTOR_AXES: [&str; 3] = ["x", "y", "z"];

// ── Camera controls ─────────────────────────────────────────────

/// Camera translation speed in world units per second.
pub const MOVE_SPEED: f64 = 1000.0;

/// Gamepad yaw/pitch sensitivity around the x axis, in degrees per second.
pub const SENSITIVITY_X: f64 = 50.0;

/// Gamepad sensitivity around the y axis, in degrees per second.
pub const SENSITIVITY_Y: f64 = 50.0;

/// Squared stick deflection below which an axis is ignored.
pub const AXIS_DEAD_ZONE: f64 = 0.02;

/// Animation-frame timestamps are in milliseconds.
pub const MS_PER_SECOND: f64 = 1000.0;
