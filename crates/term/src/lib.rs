//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer for terminal gameplay. It avoids
//! widget toolkits and renders into a framebuffer that is diffed and flushed to
//! the terminal backend.
//!
//! - [`GameView`] turns a `SessionSnapshot` into a [`FrameBuffer`] and reports the
//!   [`crate::types::BoardGeometry`] the input layer maps mouse events through
//! - [`TerminalRenderer`] owns raw mode, the alternate screen and mouse capture
//! - [`RenderThrottle`] skips frames when nothing visible changed

pub mod fb;
pub mod game_view;
pub mod render_throttle;
pub mod renderer;

pub use tui_sumten_core as core;
pub use tui_sumten_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{AdapterStatusView, AnchorY, GameView, Viewport};
pub use render_throttle::RenderThrottle;
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
