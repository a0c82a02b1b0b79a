//! TUI Sum Ten (workspace facade crate).
//!
//! Re-exports the workspace crates under one name so the binary, integration
//! tests and benches can use `tui_sumten::{core,adapter,term,input,types}`.

pub mod logging;

pub use tui_sumten_adapter as adapter;
pub use tui_sumten_core as core;
pub use tui_sumten_input as input;
pub use tui_sumten_term as term;
pub use tui_sumten_types as types;
