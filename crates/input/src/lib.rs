//! Terminal input module (engine-facing).
//!
//! Independent of any UI framework. It maps `crossterm` key and mouse events
//! into [`InputEvent`]s: keyboard commands become [`crate::types::GameAction::Start`]
//! or a quit request, and left-button mouse gestures become drag actions carrying
//! board-space points computed from the renderer's [`crate::types::BoardGeometry`].

pub mod map;

pub use tui_sumten_types as types;

pub use map::{handle_event, handle_key_event, handle_mouse_event, should_quit, InputEvent};
