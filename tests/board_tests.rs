//! Board tests - grid storage, collision and row clearing

use classic_tetris::core::Board;
use classic_tetris::types::{PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

fn fill_row(board: &mut Board, y: i8, kind: PieceKind) {
    for x in 0..BOARD_WIDTH as i8 {
        board.set(x, y, Some(kind));
    }
}

#[test]
fn test_board_new_empty() {
    let board = Board::new();
    assert_eq!(board.width(), BOARD_WIDTH);
    assert_eq!(board.height(), BOARD_HEIGHT);

    for y in 0..BOARD_HEIGHT as i8 {
        for x in 0..BOARD_WIDTH as i8 {
            assert_eq!(board.get(x, y), Some(None), "cell ({x}, {y})");
        }
    }
    assert!(board.find_full_rows().is_empty());
}

#[test]
fn test_board_get_out_of_bounds() {
    let board = Board::new();

    assert_eq!(board.get(-1, 0), None);
    assert_eq!(board.get(0, -1), None);
    assert_eq!(board.get(BOARD_WIDTH as i8, 0), None);
    assert_eq!(board.get(0, BOARD_HEIGHT as i8), None);
}

#[test]
fn test_board_set_and_get() {
    let mut board = Board::new();

    assert!(board.set(5, 10, Some(PieceKind::T)));
    assert_eq!(board.get(5, 10), Some(Some(PieceKind::T)));

    assert!(board.set(5, 10, None));
    assert_eq!(board.get(5, 10), Some(None));

    assert!(!board.set(10, 0, Some(PieceKind::I)));
    assert!(!board.set(0, -1, Some(PieceKind::I)));
}

#[test]
fn test_blocked_walls_and_floor() {
    let board = Board::new();

    assert!(board.is_blocked(-1, 5));
    assert!(board.is_blocked(BOARD_WIDTH as i8, 5));
    assert!(board.is_blocked(4, BOARD_HEIGHT as i8));
    assert!(!board.is_blocked(0, 0));
    assert!(!board.is_blocked(9, 19));
}

#[test]
fn test_rows_above_grid_are_open() {
    let mut board = Board::new();
    fill_row(&mut board, 0, PieceKind::Z);

    assert!(!board.is_blocked(3, -1));
    assert!(!board.is_blocked(3, -4));
    // Walls still apply above the grid.
    assert!(board.is_blocked(-1, -1));
    assert!(board.is_blocked(3, 0));
}

#[test]
fn test_lock_cells_skips_rows_above_grid() {
    let mut board = Board::new();
    board.lock_cells(&[(3, -1), (4, -1), (3, 0), (4, 0)], PieceKind::O);

    assert_eq!(board.get(3, 0), Some(Some(PieceKind::O)));
    assert_eq!(board.get(4, 0), Some(Some(PieceKind::O)));
    assert_eq!(board.cells().iter().filter(|c| c.is_some()).count(), 2);
}

#[test]
fn test_find_full_rows_ascending() {
    let mut board = Board::new();
    fill_row(&mut board, 17, PieceKind::I);
    fill_row(&mut board, 4, PieceKind::J);
    board.set(0, 10, Some(PieceKind::L));

    assert_eq!(board.find_full_rows().as_slice(), &[4, 17]);
}

#[test]
fn test_clear_single_row_shifts_down() {
    let mut board = Board::new();
    board.set(2, 18, Some(PieceKind::S));
    fill_row(&mut board, 19, PieceKind::I);

    assert_eq!(board.clear_row(19), 1);
    assert_eq!(board.get(2, 19), Some(Some(PieceKind::S)));
    assert_eq!(board.get(2, 18), Some(None));
    assert!(board.row(0).iter().all(|c| c.is_none()));
}

#[test]
fn test_clear_non_adjacent_rows() {
    let mut board = Board::new();
    fill_row(&mut board, 5, PieceKind::I);
    fill_row(&mut board, 7, PieceKind::I);
    board.set(1, 6, Some(PieceKind::T));
    board.set(8, 2, Some(PieceKind::O));
    board.set(4, 19, Some(PieceKind::Z));

    let full = board.find_full_rows();
    assert_eq!(board.clear_rows(&full), 2);

    // Row 6 dropped one row, row 2 dropped two, row 19 untouched.
    assert_eq!(board.get(1, 7), Some(Some(PieceKind::T)));
    assert_eq!(board.get(8, 4), Some(Some(PieceKind::O)));
    assert_eq!(board.get(4, 19), Some(Some(PieceKind::Z)));
    assert_eq!(board.cells().iter().filter(|c| c.is_some()).count(), 3);
    assert!(board.find_full_rows().is_empty());
}

#[test]
fn test_clear_four_rows() {
    let mut board = Board::new();
    for y in 16..20 {
        fill_row(&mut board, y, PieceKind::I);
    }
    board.set(0, 15, Some(PieceKind::L));

    let full = board.find_full_rows();
    assert_eq!(full.len(), 4);
    assert_eq!(board.clear_rows(&full), 4);
    assert_eq!(board.get(0, 19), Some(Some(PieceKind::L)));
}

#[test]
fn test_write_u8_grid() {
    let mut board = Board::new();
    board.set(0, 0, Some(PieceKind::I));
    board.set(9, 19, Some(PieceKind::L));

    let mut grid = [[0u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];
    board.write_u8_grid(&mut grid);

    assert_eq!(grid[0][0], 1);
    assert_eq!(grid[19][9], 7);
    assert_eq!(grid.iter().flatten().filter(|&&v| v != 0).count(), 2);
}

#[test]
fn test_board_clear() {
    let mut board = Board::new();
    fill_row(&mut board, 3, PieceKind::T);
    board.clear();
    assert_eq!(board, Board::new());
}
