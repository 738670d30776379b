//! Settings panel generator and camera harness for the WebGL front-end.
//!
//! This crate is compiled to WebAssembly and runs in the browser. Its core
//! renders a settings form from a declarative schema, keeps the current value
//! snapshot for every field, and streams each committed snapshot to registered
//! listeners. The construction pass seeds every field through the same
//! callbacks a user edit uses, so a broadcast gate keeps those seeding calls
//! away from listeners until the form exists.
//!
//! Everything except the [`web`] module is browser-independent: the renderers
//! produce a [`view::Node`] tree whose inputs can be driven directly, and the
//! [`web`] layer mounts that tree into the real DOM.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`schema`] | Field and settings schema types plus a builder API |
//! | [`snapshot`] | The id to value mapping bubbled on every edit |
//! | [`view`] | Browser-independent element tree and live input handles |
//! | [`fields`] | Leaf renderers: text, slider, vector3, check |
//! | [`tree`] | Recursive settings group renderer |
//! | [`listeners`] | Change listener registry |
//! | [`gate`] | Broadcast gate suppressing the seeding pass |
//! | [`panel`] | Panel context object and the `set_settings` entry point |
//! | [`coalesce`] | Listener wrapper that drops superseded snapshots |
//! | [`controls`] | Keyboard and gamepad camera controls |
//! | [`renderer`] | Renderer collaborator contract and the frame loop |
//! | [`config`] | Panel and control configuration |
//! | [`consts`] | Shared constants (container id, control tuning, bounds) |
//! | [`error`] | Crate error type |
//! | [`web`] | `wasm_bindgen` exports and DOM mounting |

pub mod coalesce;
pub mod config;
pub mod consts;
pub mod controls;
pub mod error;
pub mod fields;
pub mod gate;
pub mod listeners;
pub mod panel;
pub mod renderer;
pub mod schema;
pub mod snapshot;
pub mod tree;
pub mod view;
pub mod web;
