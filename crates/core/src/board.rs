//! Board module - manages the game grid
//!
//! The board is a `rows x cols` grid where each cell is either [`EMPTY`] or the
//! rep id of the piece kind committed there.
//! Uses a flat vector in row-major order for cache locality.
//! Coordinates: `(row, col)` where row 0 is the top row and col 0 the leftmost column.

use std::fmt;

use crate::types::{CellValue, Coord, PieceKind, EMPTY, MIN_COLS, MIN_ROWS};

/// The game board, stored as a flat row-major vector of cell values
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    rows: u16,
    cols: u16,
    /// Flat array of cells, row-major order (row * cols + col)
    cells: Vec<CellValue>,
}

impl Board {
    /// Create a new empty board; dimensions below the 4x4 minimum are clamped up
    pub fn new(rows: u16, cols: u16) -> Self {
        let rows = rows.max(MIN_ROWS);
        let cols = cols.max(MIN_COLS);
        Self {
            rows,
            cols,
            cells: vec![EMPTY; rows as usize * cols as usize],
        }
    }

    /// Build a board from text rows, top row first
    ///
    /// `.` is empty, a piece letter (`I`, `J`, ...) stores that kind's rep id and any
    /// other character stores rep id 1. Short rows are padded with empty cells.
    ///
    /// ```
    /// use auto_tetris_core::Board;
    ///
    /// let board = Board::from_rows(&["....", "....", "....", "OOI."]);
    /// assert_eq!(board.cell_at(3, 0), Some(4));
    /// assert_eq!(board.cell_at(3, 3), Some(0));
    /// ```
    pub fn from_rows(rows: &[&str]) -> Self {
        let cols = rows.iter().map(|r| r.len()).max().unwrap_or(0) as u16;
        let mut board = Self::new(rows.len() as u16, cols);
        for (r, line) in rows.iter().enumerate() {
            for (c, ch) in line.chars().enumerate() {
                let value = match ch {
                    '.' => EMPTY,
                    other => PieceKind::from_str(&other.to_string())
                        .map(|k| k.rep())
                        .unwrap_or(1),
                };
                board.set(r as i32, c as i32, value);
            }
        }
        board
    }

    /// Calculate flat index from (row, col) coordinates
    #[inline(always)]
    fn index(&self, row: i32, col: i32) -> Option<usize> {
        if !self.in_bounds(row, col) {
            return None;
        }
        Some(row as usize * self.cols as usize + col as usize)
    }

    pub fn rows(&self) -> u16 {
        self.rows
    }

    pub fn cols(&self) -> u16 {
        self.cols
    }

    /// Check if (row, col) lies on the board
    pub fn in_bounds(&self, row: i32, col: i32) -> bool {
        row >= 0 && row < self.rows as i32 && col >= 0 && col < self.cols as i32
    }

    /// Get cell at (row, col); `None` if out of bounds
    pub fn cell_at(&self, row: i32, col: i32) -> Option<CellValue> {
        self.index(row, col).map(|idx| self.cells[idx])
    }

    /// Set cell at (row, col)
    /// Returns false if out of bounds
    pub fn set(&mut self, row: i32, col: i32, value: CellValue) -> bool {
        match self.index(row, col) {
            Some(idx) => {
                self.cells[idx] = value;
                true
            }
            None => false,
        }
    }

    /// Check if position is within bounds and empty
    pub fn is_free(&self, row: i32, col: i32) -> bool {
        self.cell_at(row, col) == Some(EMPTY)
    }

    /// Check if position is within bounds and filled
    pub fn is_occupied(&self, row: i32, col: i32) -> bool {
        matches!(self.cell_at(row, col), Some(v) if v != EMPTY)
    }

    /// True iff every cell is on the board and empty
    pub fn fits(&self, cells: &[Coord]) -> bool {
        cells.iter().all(|&(row, col)| self.is_free(row, col))
    }

    fn row_slice(&self, row: i32) -> Option<&[CellValue]> {
        if row < 0 || row >= self.rows as i32 {
            return None;
        }
        let width = self.cols as usize;
        let start = row as usize * width;
        Some(&self.cells[start..start + width])
    }

    /// Check if a row is completely filled; off-board rows are never complete
    pub fn is_row_complete(&self, row: i32) -> bool {
        self.row_slice(row)
            .is_some_and(|cells| cells.iter().all(|&v| v != EMPTY))
    }

    /// Check if a row has no filled cells; off-board rows count as empty
    pub fn is_row_empty(&self, row: i32) -> bool {
        self.row_slice(row)
            .map_or(true, |cells| cells.iter().all(|&v| v == EMPTY))
    }

    /// Write `rep` into every given cell
    /// Returns false without writing anything if any cell is out of bounds or occupied
    pub fn commit_cells(&mut self, cells: &[Coord], rep: CellValue) -> bool {
        if !self.fits(cells) {
            return false;
        }
        for &(row, col) in cells {
            self.set(row, col, rep);
        }
        true
    }

    /// Remove every complete row and return how many were removed
    ///
    /// Scans bottom to top with a read and a write cursor: incomplete rows are
    /// copied down to the write cursor, complete rows are skipped, and whatever is
    /// left above the write cursor is emptied. Handles non-contiguous complete rows
    /// and keeps the surviving rows in their original order.
    pub fn clear_completed_rows(&mut self) -> usize {
        let width = self.cols as usize;
        let mut write_row = self.rows as usize;
        let mut cleared = 0;

        for read_row in (0..self.rows as usize).rev() {
            if self.is_row_complete(read_row as i32) {
                cleared += 1;
            } else {
                write_row -= 1;
                if write_row != read_row {
                    let src_start = read_row * width;
                    self.cells
                        .copy_within(src_start..src_start + width, write_row * width);
                }
            }
        }

        self.cells[..write_row * width].fill(EMPTY);
        cleared
    }

    /// Change dimensions, clamped to the 4x4 minimum
    ///
    /// Rows are removed from or added at the top, so the stack at the bottom is
    /// kept. Columns are removed from or added on the right.
    pub fn resize(&mut self, rows: u16, cols: u16) {
        let rows = rows.max(MIN_ROWS);
        let cols = cols.max(MIN_COLS);
        if rows == self.rows && cols == self.cols {
            return;
        }

        let mut cells = vec![EMPTY; rows as usize * cols as usize];
        let keep_rows = rows.min(self.rows) as usize;
        let keep_cols = cols.min(self.cols) as usize;
        let old_top = self.rows as usize - keep_rows;
        let new_top = rows as usize - keep_rows;

        for i in 0..keep_rows {
            let src = (old_top + i) * self.cols as usize;
            let dst = (new_top + i) * cols as usize;
            cells[dst..dst + keep_cols].copy_from_slice(&self.cells[src..src + keep_cols]);
        }

        self.rows = rows;
        self.cols = cols;
        self.cells = cells;
    }

    /// Number of filled cells
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|&&v| v != EMPTY).count()
    }

    /// Get a reference to the internal row-major cell array
    pub fn cells(&self) -> &[CellValue] {
        &self.cells
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.cols as usize) {
            for &v in row {
                let ch = PieceKind::from_rep(v).map_or('.', |k| k.letter());
                write!(f, "{ch}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
