//! Platform abstraction layer
//!
//! Handles browser/native differences for input events. Key names follow
//! `KeyboardEvent.key` so the same bindings work on every front end.

pub mod input;

pub use input::{Action, InputState, KeyBindings};
