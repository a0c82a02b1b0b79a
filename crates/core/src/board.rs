//! Board module - manages the game grid
//!
//! The board is a 4x4 grid of live cell values (`1..=9`).
//! Uses a flat array for better cache locality and zero-allocation.
//! Coordinates: (row, col) where row 0 is the top and col 0 is the left edge.
//!
//! Clearing never leaves holes: [`Board::clear_and_refill`] applies column
//! gravity (survivors fall to the bottom) and restocks each column from the top
//! with fresh values from a [`CellSource`].

use arrayvec::ArrayVec;

use crate::error::{CoreError, CoreResult};
use crate::rng::CellSource;
use crate::types::{is_live_cell, Cell, CellPos, CELL_COUNT, GRID_SIZE};

const SIZE: usize = GRID_SIZE as usize;

/// Transient marker for a cleared cell. Only ever present inside
/// `clear_and_refill`; a returned board never contains it.
const CLEARED: Cell = 0;

/// The game board - 4 rows x 4 columns using flat array storage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    /// Flat array of cells, row-major order (row * SIZE + col)
    cells: [Cell; CELL_COUNT],
}

impl Board {
    /// Create a board filled from `rng`, drawing in row-major order
    pub fn generate<R: CellSource + ?Sized>(rng: &mut R) -> CoreResult<Self> {
        let mut cells = [CLEARED; CELL_COUNT];
        for cell in &mut cells {
            *cell = rng.next_cell()?;
        }
        Ok(Self { cells })
    }

    /// Create from explicit rows, rejecting values outside `1..=9`
    pub fn from_rows(rows: [[Cell; SIZE]; SIZE]) -> CoreResult<Self> {
        let mut cells = [CLEARED; CELL_COUNT];
        for (r, row) in rows.iter().enumerate() {
            for (c, &v) in row.iter().enumerate() {
                if !is_live_cell(v) {
                    return Err(CoreError::InvalidCell(v));
                }
                cells[r * SIZE + c] = v;
            }
        }
        Ok(Self { cells })
    }

    /// Calculate flat index from (row, col)
    #[inline(always)]
    fn index(row: usize, col: usize) -> Option<usize> {
        if row >= SIZE || col >= SIZE {
            return None;
        }
        Some(row * SIZE + col)
    }

    /// Value at (row, col)
    ///
    /// Fails with [`CoreError::OutOfBounds`] outside `0..=3`.
    pub fn value_at(&self, row: usize, col: usize) -> CoreResult<Cell> {
        Self::index(row, col)
            .map(|idx| self.cells[idx])
            .ok_or(CoreError::OutOfBounds { row, col })
    }

    /// Value at a position, `None` if out of bounds
    pub fn get(&self, pos: CellPos) -> Option<Cell> {
        Self::index(pos.row as usize, pos.col as usize).map(|idx| self.cells[idx])
    }

    /// Top-to-bottom values of one column
    pub fn column(&self, col: usize) -> CoreResult<[Cell; SIZE]> {
        if col >= SIZE {
            return Err(CoreError::OutOfBounds { row: 0, col });
        }
        Ok(std::array::from_fn(|row| self.cells[row * SIZE + col]))
    }

    /// The grid as rows, row 0 first
    pub fn rows(&self) -> [[Cell; SIZE]; SIZE] {
        let mut out = [[CLEARED; SIZE]; SIZE];
        self.write_u8_grid(&mut out);
        out
    }

    /// Copy the grid into an existing row array (allocation-free snapshot path)
    pub fn write_u8_grid(&self, out: &mut [[u8; SIZE]; SIZE]) {
        for (r, row) in out.iter_mut().enumerate() {
            row.copy_from_slice(&self.cells[r * SIZE..(r + 1) * SIZE]);
        }
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// True when every cell holds a live value
    pub fn is_all_live(&self) -> bool {
        self.cells.iter().all(|&v| is_live_cell(v))
    }

    /// Clear `positions`, apply column gravity and restock from `rng`.
    ///
    /// Columns are processed left to right. Within a column the survivors keep
    /// their top-to-bottom order and settle at the bottom; each fresh value is
    /// prepended, so the last value drawn for a column ends up in row 0.
    ///
    /// Duplicate positions are idempotent and an empty list returns an identical
    /// board without touching `rng`. On any error `self` is left as it was.
    pub fn clear_and_refill<R: CellSource + ?Sized>(
        &self,
        positions: &[CellPos],
        rng: &mut R,
    ) -> CoreResult<Board> {
        let mut cells = self.cells;
        for pos in positions {
            let (row, col) = (pos.row as usize, pos.col as usize);
            let idx = Self::index(row, col).ok_or(CoreError::OutOfBounds { row, col })?;
            cells[idx] = CLEARED;
        }

        for col in 0..SIZE {
            let mut column: ArrayVec<Cell, SIZE> = (0..SIZE)
                .map(|row| cells[row * SIZE + col])
                .filter(|&v| v != CLEARED)
                .collect();

            while !column.is_full() {
                column.insert(0, rng.next_cell()?);
            }

            for (row, &v) in column.iter().enumerate() {
                cells[row * SIZE + col] = v;
            }
        }

        Ok(Board { cells })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::ScriptedCells;

    fn rows_1_to_16() -> [[Cell; 4]; 4] {
        // Values wrap into 1..=9 so the board stays legal.
        std::array::from_fn(|r| std::array::from_fn(|c| ((r * 4 + c) % 9 + 1) as Cell))
    }

    #[test]
    fn test_board_index_calculation() {
        assert_eq!(Board::index(0, 0), Some(0));
        assert_eq!(Board::index(0, 3), Some(3));
        assert_eq!(Board::index(1, 0), Some(4));
        assert_eq!(Board::index(3, 3), Some(15));
        assert_eq!(Board::index(4, 0), None);
        assert_eq!(Board::index(0, 4), None);
    }

    #[test]
    fn test_generate_draws_row_major() {
        let mut rng = ScriptedCells::once((1..=9).chain(1..=7));
        let board = Board::generate(&mut rng).unwrap();
        assert_eq!(board.rows()[0], [1, 2, 3, 4]);
        assert_eq!(board.rows()[1], [5, 6, 7, 8]);
        assert_eq!(board.rows()[2], [9, 1, 2, 3]);
        assert_eq!(board.rows()[3], [4, 5, 6, 7]);
        assert_eq!(rng.remaining(), Some(0));
    }

    #[test]
    fn test_generate_surfaces_exhaustion() {
        let mut rng = ScriptedCells::once([1, 2, 3]);
        assert_eq!(Board::generate(&mut rng), Err(CoreError::SourceExhausted));
    }

    #[test]
    fn test_value_at_out_of_bounds() {
        let board = Board::from_rows(rows_1_to_16()).unwrap();
        assert_eq!(board.value_at(3, 3), Ok(7));
        assert_eq!(
            board.value_at(4, 0),
            Err(CoreError::OutOfBounds { row: 4, col: 0 })
        );
        assert_eq!(
            board.value_at(0, 7),
            Err(CoreError::OutOfBounds { row: 0, col: 7 })
        );
    }

    #[test]
    fn test_from_rows_rejects_cleared_marker() {
        let mut rows = rows_1_to_16();
        rows[2][1] = 0;
        assert_eq!(Board::from_rows(rows), Err(CoreError::InvalidCell(0)));
    }

    #[test]
    fn test_refill_prepends_fresh_values() {
        // Column 0 top-to-bottom: 1, 5, 9, 4. Clear rows 1 and 2.
        let board = Board::from_rows(rows_1_to_16()).unwrap();
        let mut rng = ScriptedCells::once([7, 8]);
        let next = board
            .clear_and_refill(&[CellPos::new(1, 0), CellPos::new(2, 0)], &mut rng)
            .unwrap();

        // 7 drawn first, then 8 prepended above it; survivors 1, 4 at the bottom.
        assert_eq!(next.column(0).unwrap(), [8, 7, 1, 4]);
        for col in 1..4 {
            assert_eq!(next.column(col), board.column(col));
        }
    }

    #[test]
    fn test_refill_full_column() {
        let board = Board::from_rows([[5; 4]; 4]).unwrap();
        let cleared: Vec<_> = (0..4).map(|r| CellPos::new(r, 2)).collect();
        let mut rng = ScriptedCells::once([1, 2, 3, 4]);
        let next = board.clear_and_refill(&cleared, &mut rng).unwrap();
        assert_eq!(next.column(2).unwrap(), [4, 3, 2, 1]);
        assert!(next.is_all_live());
    }

    #[test]
    fn test_refill_empty_is_identity() {
        let board = Board::from_rows(rows_1_to_16()).unwrap();
        let mut rng = ScriptedCells::once(Vec::<Cell>::new());
        assert_eq!(board.clear_and_refill(&[], &mut rng), Ok(board));
    }

    #[test]
    fn test_refill_duplicates_are_idempotent() {
        let board = Board::from_rows(rows_1_to_16()).unwrap();
        let p = CellPos::new(0, 1);

        let once = board
            .clear_and_refill(&[p], &mut ScriptedCells::constant(9))
            .unwrap();
        let twice = board
            .clear_and_refill(&[p, p, p], &mut ScriptedCells::constant(9))
            .unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_refill_columns_draw_left_to_right() {
        let board = Board::from_rows([[5; 4]; 4]).unwrap();
        let mut rng = ScriptedCells::once([1, 2]);
        let next = board
            .clear_and_refill(&[CellPos::new(3, 3), CellPos::new(0, 0)], &mut rng)
            .unwrap();
        assert_eq!(next.column(0).unwrap(), [1, 5, 5, 5]);
        assert_eq!(next.column(3).unwrap(), [2, 5, 5, 5]);
    }

    #[test]
    fn test_refill_failure_leaves_board_untouched() {
        let board = Board::from_rows(rows_1_to_16()).unwrap();
        let mut rng = ScriptedCells::once([3]);
        let cleared = [CellPos::new(0, 0), CellPos::new(1, 0)];
        assert_eq!(
            board.clear_and_refill(&cleared, &mut rng),
            Err(CoreError::SourceExhausted)
        );
        assert_eq!(board, Board::from_rows(rows_1_to_16()).unwrap());
    }

    #[test]
    fn test_refill_rejects_out_of_bounds_position() {
        let board = Board::from_rows(rows_1_to_16()).unwrap();
        let mut rng = ScriptedCells::constant(1);
        assert_eq!(
            board.clear_and_refill(&[CellPos::new(0, 4)], &mut rng),
            Err(CoreError::OutOfBounds { row: 0, col: 4 })
        );
    }
}
