//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains all the game rules, state management, and simulation logic.
//! It has **zero dependencies** on UI, networking, or I/O, making it:
//!
//! - **Deterministic**: Same cell source produces identical games
//! - **Testable**: Scripted cell sources and synchronous ticks drive every rule
//! - **Portable**: Can run in any environment (terminal, TCP adapter, headless)
//! - **Small**: A 16-cell grid and a handful of counters, no allocation per action
//!
//! # Module Structure
//!
//! - [`board`]: 4x4 grid with column gravity and top refill
//! - [`rng`]: the [`CellSource`] seam, a seeded LCG and scripted sequences
//! - [`selector`]: board-space points to clamped cell rectangles, sums
//! - [`scoring`]: sum-to-ten reward rule and combo counter
//! - [`session`]: Idle -> Running -> Over lifecycle, countdown, gestures
//! - [`snapshot`]: copyable view of everything a renderer needs
//!
//! # Game Rules
//!
//! - A gesture selects every cell inside the rectangle between its start and end point
//! - If the selected values sum to exactly 10, the cells clear
//! - Survivors fall to the bottom of their column; fresh values enter at the top
//! - A match scores 10, and 15 when the previous commit was also a match
//! - Any miss resets the combo; the board is untouched
//! - The session ends after 30 ticks
//!
//! # Example
//!
//! ```
//! use tui_sumten_core::{Outcome, ScriptedCells, Session};
//! use tui_sumten_types::{BoardPoint, GameAction, PhaseKind};
//!
//! // Every fresh cell is a 5, so any two cells make ten.
//! let mut session = Session::new(ScriptedCells::constant(5));
//! session.apply(GameAction::Start).unwrap();
//!
//! session.apply(GameAction::BeginDrag(BoardPoint::new(10, 10))).unwrap();
//! session.apply(GameAction::MoveDrag(BoardPoint::new(150, 10))).unwrap();
//! let out = session.apply(GameAction::EndDrag(BoardPoint::new(150, 10))).unwrap();
//!
//! assert!(matches!(out, Outcome::Committed(_)));
//! assert_eq!(session.score(), 10);
//! assert_eq!(session.phase_kind(), PhaseKind::Running);
//! ```
//!
//! # Timing
//!
//! The session holds no clock. Call [`Session::tick`] once per second
//! (`TICK_MS`); the tick that takes the timer from 1 to 0 ends the game.

pub mod board;
pub mod error;
pub mod rng;
pub mod scoring;
pub mod selector;
pub mod session;
pub mod snapshot;

pub use tui_sumten_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use error::{CoreError, CoreResult};
pub use rng::{CellSource, ScriptedCells, SimpleRng};
pub use scoring::{match_reward, MatchOutcome, Scoring};
pub use selector::{cell_at, cells_in, rect_from_points, sum_of, CellList};
pub use session::{CommitReport, Outcome, Phase, Running, Session, SessionConfig};
pub use snapshot::SessionSnapshot;
