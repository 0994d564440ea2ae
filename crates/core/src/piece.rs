//! Piece module - the falling tetromino
//!
//! A piece is pure geometry: a kind (which fixes its rotation-0 block offsets),
//! an anchor position and a rotation state. It holds no reference to the field;
//! every check that needs the settled blocks takes the [`Grid`] explicitly.
//!
//! Rotation turns offsets about the anchor block (see [`Rotation`]). Rejected
//! moves and rotations are dropped as-is: no wall kicks.

use crate::grid::Grid;
use crate::types::{Cell, PieceKind, Rotation};

/// Active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    kind: PieceKind,
    col: i32,
    row: i32,
    rotation: Rotation,
}

impl Piece {
    /// Create a piece at an explicit anchor, rotation 0
    pub fn new(kind: PieceKind, col: i32, row: i32) -> Self {
        Self {
            kind,
            col,
            row,
            rotation: Rotation::R0,
        }
    }

    /// Create a piece at the spawn position of a `width` x `height` field:
    /// horizontally centered (truncated) and one row above the top.
    pub fn spawn(kind: PieceKind, width: u16, height: u16) -> Self {
        Self::new(kind, (width / 2) as i32, height as i32)
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    /// Anchor position (col, row)
    pub fn anchor(&self) -> Cell {
        (self.col, self.row)
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    /// Absolute cells of the piece as it stands
    pub fn occupied_cells(&self) -> [Cell; 4] {
        self.cells_after(0, 0, 0)
    }

    /// Absolute cells the piece would occupy after the given change
    pub fn cells_after(&self, d_col: i32, d_row: i32, d_rotation: i32) -> [Cell; 4] {
        let rotation = self.rotation.rotated_by(d_rotation);
        self.kind.offsets().map(|offset| {
            let (dx, dy) = rotation.apply(offset);
            (self.col + d_col + dx, self.row + d_row + dy)
        })
    }

    /// Check whether a proposed change keeps the piece inside the walls, above
    /// the floor and clear of settled blocks.
    ///
    /// Rows at or above the top of the field are never invalid by themselves.
    pub fn can_apply(&self, grid: &Grid, d_col: i32, d_row: i32, d_rotation: i32) -> bool {
        let max_col = grid.width() as i32 - 1;
        self.cells_after(d_col, d_row, d_rotation)
            .iter()
            .all(|&(col, row)| {
                col >= 0 && col <= max_col && row >= 0 && !grid.is_occupied(col, row)
            })
    }

    /// Move down one row without any check.
    ///
    /// Gravity never validates: a blocked descent has to merge the piece, which
    /// the caller detects by looking below first.
    pub fn move_down(&mut self) {
        self.row -= 1;
    }

    /// Rotate one quarter turn clockwise if the result is valid
    pub fn rotate_clockwise(&mut self, grid: &Grid) -> bool {
        self.try_apply(grid, 0, 0, 1)
    }

    /// Rotate one quarter turn counter-clockwise if the result is valid
    pub fn rotate_counterclockwise(&mut self, grid: &Grid) -> bool {
        self.try_apply(grid, 0, 0, -1)
    }

    /// Move one column left if the result is valid
    pub fn move_left(&mut self, grid: &Grid) -> bool {
        self.try_apply(grid, -1, 0, 0)
    }

    /// Move one column right if the result is valid
    pub fn move_right(&mut self, grid: &Grid) -> bool {
        self.try_apply(grid, 1, 0, 0)
    }

    fn try_apply(&mut self, grid: &Grid, d_col: i32, d_row: i32, d_rotation: i32) -> bool {
        if !self.can_apply(grid, d_col, d_row, d_rotation) {
            return false;
        }
        self.col += d_col;
        self.row += d_row;
        self.rotation = self.rotation.rotated_by(d_rotation);
        true
    }
}
