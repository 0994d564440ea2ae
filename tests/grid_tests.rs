//! Grid tests - occupancy, row clearing and top-out

use tick_tetris::core::Grid;
use tick_tetris::types::Cell;

fn full_row(width: u16, row: i32) -> Vec<Cell> {
    (0..width as i32).map(|c| (c, row)).collect()
}

#[test]
fn test_grid_new_empty() {
    let grid = Grid::new(10, 40);
    assert_eq!(grid.width(), 10);
    assert_eq!(grid.height(), 40);
    assert_eq!(grid.occupied_count(), 0);
    for row in 0..40 {
        assert!(!grid.is_row_full(row));
    }
}

#[test]
fn test_out_of_range_queries_are_free() {
    let mut grid = Grid::new(10, 8);
    grid.set_occupied(&[(0, 0), (9, 7)]);

    assert!(!grid.is_occupied(-1, 0));
    assert!(!grid.is_occupied(0, -1));
    assert!(!grid.is_occupied(10, 0));
    assert!(!grid.is_occupied(9, 8));
    assert!(grid.is_occupied(9, 7));
}

#[test]
fn test_set_occupied_skips_cells_above_the_field() {
    let mut grid = Grid::new(10, 8);
    grid.set_occupied(&[(3, 7), (3, 8), (3, 9)]);
    assert_eq!(grid.occupied_cells(), vec![(3, 7)]);
}

#[test]
fn test_clearing_keeps_order_of_surviving_rows() {
    let mut grid = Grid::new(10, 8);
    grid.set_occupied(&full_row(10, 0));
    grid.set_occupied(&[(3, 1)]);
    grid.set_occupied(&full_row(10, 2));
    grid.set_occupied(&[(7, 3)]);

    let result = grid.clear_full_rows_and_check_top_out();

    assert_eq!(result.rows_cleared, 2);
    assert!(!result.top_out);
    assert_eq!(grid.occupied_cells(), vec![(3, 0), (7, 1)]);
}

#[test]
fn test_clearing_k_rows_leaves_k_empty_rows_on_top() {
    for k in 1..=4 {
        let mut grid = Grid::new(6, 10);
        // A marker in every row below the full block so each row is non-empty.
        for row in 0..k {
            grid.set_occupied(&full_row(6, row));
        }
        for row in k..6 {
            grid.set_occupied(&[(0, row)]);
        }

        let non_empty_before = (0..10).filter(|&r| grid.row_occupied_count(r) > 0).count();
        let result = grid.clear_full_rows_and_check_top_out();
        let non_empty_after = (0..10).filter(|&r| grid.row_occupied_count(r) > 0).count();

        assert_eq!(result.rows_cleared, k as u32);
        assert_eq!(non_empty_before - non_empty_after, k as usize);
        for row in (10 - k as usize)..10 {
            assert_eq!(grid.row_occupied_count(row), 0, "row {} should be empty", row);
        }
    }
}

#[test]
fn test_adjacent_full_rows_all_cleared() {
    let mut grid = Grid::new(4, 8);
    for row in 0..3 {
        grid.set_occupied(&full_row(4, row));
    }
    grid.set_occupied(&[(1, 3)]);

    let result = grid.clear_full_rows_and_check_top_out();
    assert_eq!(result.rows_cleared, 3);
    assert_eq!(grid.occupied_cells(), vec![(1, 0)]);
}

#[test]
fn test_top_out_checks_second_row_from_top() {
    let mut grid = Grid::new(10, 8);
    grid.set_occupied(&[(0, 6)]);
    assert!(grid.clear_full_rows_and_check_top_out().top_out);

    // The very top row alone does not top out.
    let mut grid = Grid::new(10, 8);
    grid.set_occupied(&[(0, 7)]);
    assert!(!grid.clear_full_rows_and_check_top_out().top_out);
}

#[test]
fn test_top_out_is_checked_after_clearing() {
    // A full row in the kill zone is cleared first.
    let mut grid = Grid::new(10, 8);
    grid.set_occupied(&full_row(10, 6));
    let result = grid.clear_full_rows_and_check_top_out();
    assert_eq!(result.rows_cleared, 1);
    assert!(!result.top_out);

    // Content above it drops into row height-2 and tops out.
    let mut grid = Grid::new(10, 8);
    grid.set_occupied(&full_row(10, 6));
    grid.set_occupied(&[(2, 7)]);
    let result = grid.clear_full_rows_and_check_top_out();
    assert_eq!(result.rows_cleared, 1);
    assert!(result.top_out);
}

#[test]
fn test_display_top_row_first() {
    let mut grid = Grid::new(4, 3);
    grid.set_occupied(&[(0, 0), (3, 2)]);
    assert_eq!(grid.to_string(), "---X\n----\nX---\n");
}
