//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key and mouse events into [`map::GameInput`] values,
//! including the fixed pointer-to-cell geometry.

pub mod map;

pub use map::{handle_key_event, handle_mouse_event, should_quit, GameInput, PointerMap};
