//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core logic, terminal rendering, AI protocol).
//!
//! # Board Dimensions
//!
//! - **Grid**: 4 rows x 4 columns, `(row, col)` with row 0 at the top
//! - **Cell values**: live cells hold an integer in `1..=9`
//! - **Board space**: gesture points are pixels, `CELL_SIZE` pixels per cell
//!
//! # Game Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `GRID_SIZE` | 4 | Rows and columns on the board |
//! | `GAME_TIME` | 30 | Session length in seconds |
//! | `MATCH_TARGET` | 10 | Sum a selection must reach to clear |
//! | `BASE_REWARD` | 10 | Points for any match |
//! | `COMBO_BONUS` | 5 | Extra points from the second consecutive match on |
//! | `CELL_SIZE` | 100 | Default pixels per cell |
//! | `COMPACT_CELL_SIZE` | 60 | Pixels per cell on narrow displays |
//! | `TICK_MS` | 1000 | One countdown tick per second |
//!
//! # Examples
//!
//! ```
//! use tui_sumten_types::{BoardPoint, DragRect, GameAction, GRID_SIZE, MATCH_TARGET};
//!
//! // Parse a protocol action name
//! let action = GameAction::from_parts("beginDrag", Some(BoardPoint::new(10, 20))).unwrap();
//! assert_eq!(action, GameAction::BeginDrag(BoardPoint::new(10, 20)));
//!
//! // The provisional rectangle is normalized regardless of drag direction
//! let rect = DragRect::from_points(BoardPoint::new(50, 40), BoardPoint::new(10, 90));
//! assert_eq!((rect.left, rect.top, rect.width, rect.height), (10, 40, 40, 50));
//!
//! assert_eq!(GRID_SIZE, 4);
//! assert_eq!(MATCH_TARGET, 10);
//! ```

use std::ops::RangeInclusive;

/// Board rows and columns (4x4)
pub const GRID_SIZE: u8 = 4;

/// Number of cells on the board
pub const CELL_COUNT: usize = (GRID_SIZE as usize) * (GRID_SIZE as usize);

/// Default renderer cell size in board-space pixels
pub const CELL_SIZE: u32 = 100;

/// Cell size used by narrow viewports
pub const COMPACT_CELL_SIZE: u32 = 60;

/// Session length in seconds
pub const GAME_TIME: u32 = 30;

/// Countdown tick interval in milliseconds (1 Hz)
pub const TICK_MS: u64 = 1000;

/// Smallest live cell value
pub const CELL_MIN: u8 = 1;

/// Largest live cell value
pub const CELL_MAX: u8 = 9;

/// Domain of live cell values
pub const CELL_VALUE_RANGE: RangeInclusive<u8> = CELL_MIN..=CELL_MAX;

/// A selection matches when its values sum to exactly this
pub const MATCH_TARGET: u32 = 10;

/// Points awarded for every match
pub const BASE_REWARD: u32 = 10;

/// Bonus awarded from the second consecutive match onward
pub const COMBO_BONUS: u32 = 5;

/// A live cell value (`1..=9`).
pub type Cell = u8;

/// Returns true if `value` is a legal live cell value.
#[inline]
pub fn is_live_cell(value: Cell) -> bool {
    CELL_VALUE_RANGE.contains(&value)
}

/// A board position in cell units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellPos {
    pub row: u8,
    pub col: u8,
}

impl CellPos {
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }
}

/// A point in board-space pixels.
///
/// Coordinates are signed because a drag may leave the board area on any side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct BoardPoint {
    pub x: i32,
    pub y: i32,
}

impl BoardPoint {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Inclusive rectangle of cell indices.
///
/// Always normalized: `row_min <= row_max` and `col_min <= col_max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IndexRect {
    pub row_min: u8,
    pub row_max: u8,
    pub col_min: u8,
    pub col_max: u8,
}

impl IndexRect {
    /// Build a normalized rectangle spanning two positions.
    pub fn spanning(a: CellPos, b: CellPos) -> Self {
        Self {
            row_min: a.row.min(b.row),
            row_max: a.row.max(b.row),
            col_min: a.col.min(b.col),
            col_max: a.col.max(b.col),
        }
    }

    pub fn rows(&self) -> u8 {
        self.row_max - self.row_min + 1
    }

    pub fn cols(&self) -> u8 {
        self.col_max - self.col_min + 1
    }

    /// Number of cells covered
    pub fn area(&self) -> usize {
        (self.rows() as usize) * (self.cols() as usize)
    }

    pub fn contains(&self, pos: CellPos) -> bool {
        (self.row_min..=self.row_max).contains(&pos.row)
            && (self.col_min..=self.col_max).contains(&pos.col)
    }
}

/// Provisional drag rectangle in board-space pixels (left, top, width, height).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DragRect {
    pub left: i32,
    pub top: i32,
    pub width: u32,
    pub height: u32,
}

impl DragRect {
    /// Normalize an anchor and the current pointer position into a rectangle.
    pub fn from_points(anchor: BoardPoint, current: BoardPoint) -> Self {
        Self {
            left: anchor.x.min(current.x),
            top: anchor.y.min(current.y),
            width: anchor.x.abs_diff(current.x),
            height: anchor.y.abs_diff(current.y),
        }
    }
}

/// Session lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PhaseKind {
    #[default]
    Idle,
    Running,
    Over,
}

impl PhaseKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PhaseKind::Idle => "idle",
            PhaseKind::Running => "running",
            PhaseKind::Over => "over",
        }
    }
}

/// Events that drive the session state machine
///
/// These actions are used by terminal input, the tick driver and AI control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Start (or restart) a session
    Start,
    /// One countdown second elapsed
    Tick,
    /// Pointer pressed at a board-space point
    BeginDrag(BoardPoint),
    /// Pointer moved while pressed
    MoveDrag(BoardPoint),
    /// Pointer released; commits the gesture
    EndDrag(BoardPoint),
}

impl GameAction {
    /// Build an action from its protocol name and optional point
    ///
    /// Names are matched case-insensitively. Drag actions require a point.
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_sumten_types::{BoardPoint, GameAction};
    ///
    /// assert_eq!(GameAction::from_parts("start", None), Some(GameAction::Start));
    /// assert_eq!(GameAction::from_parts("endDrag", None), None);
    /// assert_eq!(GameAction::from_parts("jump", None), None);
    /// ```
    pub fn from_parts(name: &str, point: Option<BoardPoint>) -> Option<Self> {
        match (name.to_lowercase().as_str(), point) {
            ("start", _) | ("restart", _) => Some(GameAction::Start),
            ("tick", _) => Some(GameAction::Tick),
            ("begindrag", Some(p)) => Some(GameAction::BeginDrag(p)),
            ("movedrag", Some(p)) => Some(GameAction::MoveDrag(p)),
            ("enddrag", Some(p)) => Some(GameAction::EndDrag(p)),
            _ => None,
        }
    }

    /// Convert to camelCase string for AI protocol
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::Start => "start",
            GameAction::Tick => "tick",
            GameAction::BeginDrag(_) => "beginDrag",
            GameAction::MoveDrag(_) => "moveDrag",
            GameAction::EndDrag(_) => "endDrag",
        }
    }

    /// True for the three gesture callbacks
    pub fn is_gesture(&self) -> bool {
        matches!(
            self,
            GameAction::BeginDrag(_) | GameAction::MoveDrag(_) | GameAction::EndDrag(_)
        )
    }
}

/// Where the board is drawn in a terminal, and how terminal cells map to board space.
///
/// `origin_x`/`origin_y` is the terminal cell of the board's top-left corner
/// (inside the frame). Each board cell is `cell_w` x `cell_h` terminal cells and
/// `cell_size` board-space pixels square.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardGeometry {
    pub origin_x: u16,
    pub origin_y: u16,
    pub cell_w: u16,
    pub cell_h: u16,
    pub cell_size: u32,
}

impl BoardGeometry {
    /// Map a terminal cell to the board-space pixel at its center.
    ///
    /// Terminal cells left of or above the board produce negative coordinates;
    /// the selector clamps them to the nearest edge cell.
    pub fn to_board_point(&self, column: u16, row: u16) -> BoardPoint {
        let cell_w = self.cell_w.max(1) as i64;
        let cell_h = self.cell_h.max(1) as i64;
        let size = self.cell_size as i64;

        let dx = column as i64 - self.origin_x as i64;
        let dy = row as i64 - self.origin_y as i64;

        // Sample the middle of the terminal cell so column boundaries map cleanly.
        // Floor division keeps cells left of / above the board negative.
        let x = ((2 * dx + 1) * size).div_euclid(2 * cell_w);
        let y = ((2 * dy + 1) * size).div_euclid(2 * cell_h);
        BoardPoint::new(saturate_i32(x), saturate_i32(y))
    }

    /// Board width in terminal columns
    pub fn width(&self) -> u16 {
        (GRID_SIZE as u16) * self.cell_w
    }

    /// Board height in terminal rows
    pub fn height(&self) -> u16 {
        (GRID_SIZE as u16) * self.cell_h
    }
}

fn saturate_i32(v: i64) -> i32 {
    v.clamp(i32::MIN as i64, i32::MAX as i64) as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn game_constants_match_rules() {
        assert_eq!(GRID_SIZE, 4);
        assert_eq!(CELL_COUNT, 16);
        assert_eq!(GAME_TIME, 30);
        assert_eq!(MATCH_TARGET, 10);
        assert_eq!(BASE_REWARD, 10);
        assert_eq!(COMBO_BONUS, 5);
        assert_eq!(CELL_VALUE_RANGE, 1..=9);
    }

    #[test]
    fn live_cell_domain() {
        assert!(!is_live_cell(0));
        assert!(is_live_cell(1));
        assert!(is_live_cell(9));
        assert!(!is_live_cell(10));
    }

    #[test]
    fn index_rect_is_normalized() {
        let r = IndexRect::spanning(CellPos::new(3, 0), CellPos::new(1, 2));
        assert_eq!(r.row_min, 1);
        assert_eq!(r.row_max, 3);
        assert_eq!(r.col_min, 0);
        assert_eq!(r.col_max, 2);
        assert_eq!(r.area(), 9);
        assert!(r.contains(CellPos::new(2, 1)));
        assert!(!r.contains(CellPos::new(0, 1)));
    }

    #[test]
    fn drag_rect_zero_area() {
        let p = BoardPoint::new(7, 9);
        let r = DragRect::from_points(p, p);
        assert_eq!((r.left, r.top, r.width, r.height), (7, 9, 0, 0));
    }

    #[test]
    fn action_names_roundtrip() {
        let p = BoardPoint::new(1, 2);
        for action in [
            GameAction::Start,
            GameAction::Tick,
            GameAction::BeginDrag(p),
            GameAction::MoveDrag(p),
            GameAction::EndDrag(p),
        ] {
            assert_eq!(GameAction::from_parts(action.as_str(), Some(p)), Some(action));
        }
        assert!(GameAction::EndDrag(p).is_gesture());
        assert!(!GameAction::Tick.is_gesture());
    }

    #[test]
    fn geometry_maps_terminal_cells_to_board_pixels() {
        let g = BoardGeometry {
            origin_x: 10,
            origin_y: 5,
            cell_w: 6,
            cell_h: 3,
            cell_size: 60,
        };

        // First terminal column of the board lands inside cell 0.
        let p = g.to_board_point(10, 5);
        assert_eq!(p, BoardPoint::new(5, 10));

        // Last terminal column of the board lands inside cell 3.
        let p = g.to_board_point(10 + 23, 5 + 11);
        assert_eq!(p.x / 60, 3);
        assert_eq!(p.y / 60, 3);

        // Left of the board is negative.
        let p = g.to_board_point(9, 4);
        assert!(p.x < 0);
        assert!(p.y < 0);

        assert_eq!(g.width(), 24);
        assert_eq!(g.height(), 12);
    }
}
