//! Grid module - the settled blocks ("crumble")
//!
//! The grid is a fixed-size occupancy bitmap. Row 0 is the bottom of the field
//! and rows grow upward. Uses a flat vector (row-major, bottom row first) so a
//! row is a contiguous slice.
//!
//! Anything at or above `height` reads as free: a freshly spawned piece sits one
//! row above the field and must be able to look down without bounds errors.

use crate::types::{Cell, ClearResult};

/// Settled-block bitmap
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: u16,
    height: u16,
    /// Flat array of cells, row-major order (row * width + col)
    cells: Vec<bool>,
}

impl Grid {
    /// Create a new empty grid
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![false; width as usize * height as usize],
        }
    }

    /// Calculate flat index from (col, row) coordinates
    #[inline(always)]
    fn index(&self, col: i32, row: i32) -> Option<usize> {
        if col < 0 || col >= self.width as i32 || row < 0 || row >= self.height as i32 {
            return None;
        }
        Some(row as usize * self.width as usize + col as usize)
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Check if a cell holds a settled block.
    ///
    /// Rows at or above the top are always free. Columns outside the field and
    /// negative rows are collision cases the caller screens separately; they
    /// also report free here.
    pub fn is_occupied(&self, col: i32, row: i32) -> bool {
        match self.index(col, row) {
            Some(idx) => self.cells[idx],
            None => false,
        }
    }

    /// Mark every given cell occupied.
    ///
    /// Cells above the field are skipped: a piece may merge while some of its
    /// blocks have not entered the field yet.
    pub fn set_occupied(&mut self, cells: &[Cell]) {
        for &(col, row) in cells {
            if let Some(idx) = self.index(col, row) {
                self.cells[idx] = true;
            }
        }
    }

    fn row(&self, row: usize) -> &[bool] {
        let w = self.width as usize;
        &self.cells[row * w..(row + 1) * w]
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, row: usize) -> bool {
        if row >= self.height as usize {
            return false;
        }
        self.row(row).iter().all(|&occupied| occupied)
    }

    /// Number of occupied cells in a row (0 for rows outside the grid)
    pub fn row_occupied_count(&self, row: usize) -> usize {
        if row >= self.height as usize {
            return 0;
        }
        self.row(row).iter().filter(|&&occupied| occupied).count()
    }

    /// Remove every full row, then report whether the stack reached the kill
    /// zone.
    ///
    /// Full rows are decided once, before anything moves. Surviving rows are
    /// compacted downward (two-pointer, no allocation) and the vacated rows at
    /// the top are cleared, so each removal leaves one empty row at the top.
    /// Top-out is checked on row `height - 2` after the compaction.
    pub fn clear_full_rows_and_check_top_out(&mut self) -> ClearResult {
        let width = self.width as usize;
        let height = self.height as usize;
        let mut write_row = 0usize;
        let mut rows_cleared = 0u32;

        // Scan bottom to top
        for read_row in 0..height {
            if self.is_row_full(read_row) {
                rows_cleared += 1;
                continue;
            }
            if write_row != read_row {
                let src = read_row * width;
                self.cells.copy_within(src..src + width, write_row * width);
            }
            write_row += 1;
        }

        // Clear the vacated rows at the top
        for cell in &mut self.cells[write_row * width..] {
            *cell = false;
        }

        let top_out = height >= 2 && self.row_occupied_count(height - 2) > 0;

        ClearResult {
            rows_cleared,
            top_out,
        }
    }

    /// All settled cells, bottom row first, left to right
    pub fn occupied_cells(&self) -> Vec<Cell> {
        let width = self.width as usize;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, occupied)| **occupied)
            .map(|(idx, _)| ((idx % width) as i32, (idx / width) as i32))
            .collect()
    }

    /// Total number of settled cells
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|&&occupied| occupied).count()
    }
}

impl std::fmt::Display for Grid {
    /// Top row first; `X` for a settled block, `-` for free.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in (0..self.height as usize).rev() {
            for &occupied in self.row(row) {
                f.write_str(if occupied { "X" } else { "-" })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
