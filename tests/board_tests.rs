//! Board tests - construction, lookup, and clear + refill

use tui_sumten::core::{Board, CellSource, CoreError, ScriptedCells, SimpleRng};
use tui_sumten::types::{CellPos, GRID_SIZE};

fn sample_rows() -> [[u8; 4]; 4] {
    [[1, 2, 3, 4], [5, 6, 7, 8], [9, 1, 2, 3], [4, 5, 6, 7]]
}

#[test]
fn test_board_from_rows_round_trips() {
    let board = Board::from_rows(sample_rows()).unwrap();
    assert_eq!(board.rows(), sample_rows());
    assert_eq!(board.value_at(2, 0), Ok(9));
    assert_eq!(board.get(CellPos::new(3, 3)), Some(7));
    assert_eq!(board.column(1), Ok([2, 6, 1, 5]));
    assert!(board.is_all_live());
}

#[test]
fn test_board_rejects_dead_values() {
    let mut rows = sample_rows();
    rows[1][2] = 0;
    assert_eq!(Board::from_rows(rows), Err(CoreError::InvalidCell(0)));
    rows[1][2] = 10;
    assert_eq!(Board::from_rows(rows), Err(CoreError::InvalidCell(10)));
}

#[test]
fn test_board_out_of_bounds_lookup() {
    let board = Board::from_rows(sample_rows()).unwrap();
    assert_eq!(
        board.value_at(4, 0),
        Err(CoreError::OutOfBounds { row: 4, col: 0 })
    );
    assert_eq!(board.get(CellPos::new(0, 4)), None);
    assert!(board.column(4).is_err());
}

#[test]
fn test_generate_is_deterministic_per_seed() {
    let a = Board::generate(&mut SimpleRng::new(42)).unwrap();
    let b = Board::generate(&mut SimpleRng::new(42)).unwrap();
    assert_eq!(a, b);
    assert!(a.is_all_live());
}

#[test]
fn test_clear_nothing_is_identity() {
    let board = Board::from_rows(sample_rows()).unwrap();
    let mut rng = ScriptedCells::once(Vec::<u8>::new());
    let next = board.clear_and_refill(&[], &mut rng).unwrap();
    assert_eq!(next, board);
    assert_eq!(rng.drawn(), 0);
}

#[test]
fn test_clear_single_cell_drops_column() {
    let board = Board::from_rows(sample_rows()).unwrap();
    let mut rng = ScriptedCells::once([9]);
    let next = board
        .clear_and_refill(&[CellPos::new(2, 1)], &mut rng)
        .unwrap();

    // Column 1 was [2, 6, 1, 5]; the 1 goes, the rest fall, 9 enters on top.
    assert_eq!(next.column(1), Ok([9, 2, 6, 5]));
    for col in [0, 2, 3] {
        assert_eq!(next.column(col), board.column(col));
    }
}

#[test]
fn test_refill_prepends_so_last_draw_is_on_top() {
    let board = Board::from_rows(sample_rows()).unwrap();
    let column: Vec<CellPos> = (0..4).map(|row| CellPos::new(row, 3)).collect();
    let mut rng = ScriptedCells::once([6, 7, 8, 9]);
    let next = board.clear_and_refill(&column, &mut rng).unwrap();
    assert_eq!(next.column(3), Ok([9, 8, 7, 6]));
}

#[test]
fn test_columns_are_refilled_left_to_right() {
    let board = Board::from_rows(sample_rows()).unwrap();
    let mut rng = ScriptedCells::once([8, 9]);
    let next = board
        .clear_and_refill(&[CellPos::new(0, 2), CellPos::new(0, 0)], &mut rng)
        .unwrap();
    assert_eq!(next.value_at(0, 0), Ok(8));
    assert_eq!(next.value_at(0, 2), Ok(9));
}

#[test]
fn test_duplicate_positions_clear_once() {
    let board = Board::from_rows(sample_rows()).unwrap();
    let mut rng = ScriptedCells::once([9]);
    let pos = CellPos::new(1, 1);
    let next = board.clear_and_refill(&[pos, pos, pos], &mut rng).unwrap();
    assert_eq!(rng.drawn(), 1);
    assert_eq!(next.column(1), Ok([9, 2, 1, 5]));
}

#[test]
fn test_refill_errors_leave_board_untouched() {
    let board = Board::from_rows(sample_rows()).unwrap();

    let mut empty = ScriptedCells::once(Vec::<u8>::new());
    assert_eq!(
        board.clear_and_refill(&[CellPos::new(0, 0)], &mut empty),
        Err(CoreError::SourceExhausted)
    );

    let mut rng = ScriptedCells::constant(5);
    assert_eq!(
        board.clear_and_refill(&[CellPos::new(5, 0)], &mut rng),
        Err(CoreError::OutOfBounds { row: 5, col: 0 })
    );
    assert_eq!(board.rows(), sample_rows());
}

#[test]
fn test_gravity_keeps_survivors_as_column_suffix() {
    let mut picker = SimpleRng::new(7);
    let mut fresh = SimpleRng::new(99);
    let mut board = Board::generate(&mut fresh).unwrap();

    for _ in 0..200 {
        let count = picker.next_range(6) as usize;
        let positions: Vec<CellPos> = (0..count)
            .map(|_| {
                CellPos::new(
                    picker.next_range(GRID_SIZE as u32) as u8,
                    picker.next_range(GRID_SIZE as u32) as u8,
                )
            })
            .collect();

        let next = board.clear_and_refill(&positions, &mut fresh).unwrap();
        assert!(next.is_all_live());

        for col in 0..GRID_SIZE as usize {
            let before = board.column(col).unwrap();
            let survivors: Vec<u8> = (0..GRID_SIZE as usize)
                .filter(|&row| !positions.contains(&CellPos::new(row as u8, col as u8)))
                .map(|row| before[row])
                .collect();
            let after = board_column(&next, col);
            assert_eq!(
                &after[after.len() - survivors.len()..],
                survivors.as_slice(),
                "column {} survivors must settle at the bottom in order",
                col
            );
        }
        board = next;
    }
}

fn board_column(board: &Board, col: usize) -> Vec<u8> {
    board.column(col).unwrap().to_vec()
}

#[test]
fn test_simple_rng_stays_in_cell_range() {
    let mut rng = SimpleRng::new(12345);
    for _ in 0..1000 {
        let v = rng.next_cell().unwrap();
        assert!((1..=9).contains(&v));
    }
}
