//! Error types for the core engine.
//!
//! Gestures delivered outside a running session are not errors; the session
//! ignores them. What remains are programmer errors (bad indices, bad test
//! scripts) and a cell source that can no longer produce values.

use std::fmt;

use crate::types::Cell;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoreError {
    /// `(row, col)` outside the 4x4 grid.
    OutOfBounds { row: usize, col: usize },
    /// A cell source produced a value outside `1..=9`.
    InvalidCell(Cell),
    /// A finite cell source ran out of values.
    SourceExhausted,
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoreError::OutOfBounds { row, col } => {
                write!(f, "cell ({row}, {col}) is outside the board")
            }
            CoreError::InvalidCell(v) => write!(f, "cell value {v} is outside 1..=9"),
            CoreError::SourceExhausted => write!(f, "cell source exhausted"),
        }
    }
}

impl std::error::Error for CoreError {}

pub type CoreResult<T> = Result<T, CoreError>;
