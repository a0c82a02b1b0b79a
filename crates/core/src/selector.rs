//! Selector - maps board-space gestures onto cell rectangles
//!
//! Stateless: a gesture's anchor and end point go in, an inclusive
//! [`IndexRect`] comes out. Points outside the board are clamped to the nearest
//! edge cell on every side, so a drag that leaves the board still selects
//! something and a zero-area drag selects exactly one cell.

use arrayvec::ArrayVec;

use crate::board::Board;
use crate::types::{BoardPoint, CellPos, IndexRect, CELL_COUNT, GRID_SIZE};

/// Cells of a selection in row-major order (at most the whole board).
pub type CellList = ArrayVec<CellPos, CELL_COUNT>;

/// Map one pixel coordinate to a clamped cell index.
#[inline]
fn axis_index(px: i32, cell_size: u32) -> u8 {
    let size = cell_size.max(1) as i64;
    let idx = (px as i64).div_euclid(size);
    idx.clamp(0, GRID_SIZE as i64 - 1) as u8
}

/// Cell under a board-space point, clamped to the board.
pub fn cell_at(p: BoardPoint, cell_size: u32) -> CellPos {
    CellPos::new(axis_index(p.y, cell_size), axis_index(p.x, cell_size))
}

/// Inclusive index rectangle spanned by two board-space points.
///
/// Symmetric in its arguments.
pub fn rect_from_points(p0: BoardPoint, p1: BoardPoint, cell_size: u32) -> IndexRect {
    IndexRect::spanning(cell_at(p0, cell_size), cell_at(p1, cell_size))
}

/// Cells covered by `rect`, row-major.
pub fn cells_in(rect: IndexRect) -> CellList {
    let mut out = CellList::new();
    for row in rect.row_min..=rect.row_max {
        for col in rect.col_min..=rect.col_max {
            out.push(CellPos::new(row, col));
        }
    }
    out
}

/// Sum of the values at `cells`. Positions off the board contribute nothing.
pub fn sum_of(board: &Board, cells: &[CellPos]) -> u32 {
    cells
        .iter()
        .filter_map(|&p| board.get(p))
        .map(u32::from)
        .sum()
}
