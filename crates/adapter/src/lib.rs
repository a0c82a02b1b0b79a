//! Adapter module - how the outside world drives a session
//!
//! Two layers live here:
//!
//! - [`Controller`] owns a `Session` and a [`TickSource`], applies actions and
//!   notifies subscribers with a fresh `SessionSnapshot` on every observable
//!   change. The terminal binary and tests drive the game through it.
//! - An optional TCP server lets external agents play over a line-delimited
//!   JSON protocol. It runs on its own tokio runtime and only talks to the
//!   single-threaded game loop through channels ([`Adapter`]).
//!
//! # Protocol Overview
//!
//! 1. **Connection**: Client connects to TCP socket (default: 127.0.0.1:7878)
//! 2. **Handshake**: Client sends `hello`, server responds with `welcome`
//! 3. **Observation Streaming**: Server sends an `observation` after every change
//! 4. **Commanding**: Client sends `command` messages; each is answered with
//!    `ack` (carrying the outcome) or `error`
//!
//! Error codes: `not_ready` (command before hello), `protocol_mismatch`,
//! `invalid_command`, `backpressure` (command queue full).
//!
//! Lines longer than [`MAX_LINE_BYTES`] are discarded with `invalid_command`.
//! A line that is not UTF-8 closes the connection.
//!
//! # Environment Variables
//!
//! - `SUMTEN_AI_HOST`: Bind address (default: "127.0.0.1")
//! - `SUMTEN_AI_PORT`: Port number (default: 7878)
//! - `SUMTEN_AI_MAX_PENDING`: Command queue depth (default: 10)
//! - `SUMTEN_AI_LOG_PATH`: Append every wire line to this file
//! - `SUMTEN_AI_DISABLED`: Set to "1" or "true" to disable the server
//!
//! # Example Protocol Flow
//!
//! ```text
//! Client -> Server: {"type":"hello","seq":1,"ts":1,"client":{"name":"my-ai","version":"0.1.0"},"protocol_version":"1.0.0"}
//! Server -> Client: {"type":"welcome","seq":1,"ts":2,"protocol_version":"1.0.0","client_id":1,"game_id":"tui-sumten",...}
//! Server -> Client: {"type":"observation","seq":1,"ts":2,"phase":"idle",...}
//! Client -> Server: {"type":"command","seq":2,"ts":3,"action":"start"}
//! Server -> Client: {"type":"ack","seq":2,"ts":3,"status":"ok","outcome":"started"}
//! Client -> Server: {"type":"command","seq":3,"ts":4,"action":"beginDrag","x":10,"y":10}
//! Client -> Server: {"type":"command","seq":4,"ts":5,"action":"endDrag","x":110,"y":10}
//! ```

pub mod controller;
pub mod protocol;
pub mod runtime;
pub mod server;
pub mod tick;

pub use tui_sumten_core as core;
pub use tui_sumten_types as types;

pub use controller::{Controller, SubscriptionId, TickReport};
pub use protocol::*;
pub use runtime::{Adapter, InboundCommand, InboundPayload, OutboundMessage};
pub use server::{run_server, run_server_with_state, ServerConfig, ServerState, MAX_LINE_BYTES};
pub use tick::{IntervalTicker, ManualTicks, TickSource};
