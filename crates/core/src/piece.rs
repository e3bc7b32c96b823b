//! Falling piece - position, rotation state and the move/rotate protocol
//!
//! Every mutation is checked against a [`Board`]: a move or rotation is kept
//! only if all four resulting cells are on the board and empty, otherwise the
//! piece is left exactly as it was.

use crate::board::Board;
use crate::pieces::get_offsets;
use crate::types::{Coord, PieceKind, Rotation};

/// Translation directions available to a falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
    Down,
}

impl Direction {
    /// `(d_row, d_col)` for one step in this direction
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
            Direction::Down => (1, 0),
        }
    }
}

/// The piece currently under driver control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FallingPiece {
    pub kind: PieceKind,
    pub rotation: Rotation,
    /// Board row under the anchor cell
    pub row: i32,
    /// Board column under the anchor cell
    pub col: i32,
}

impl FallingPiece {
    /// Create a piece in rotation state 0 with its anchor at (row, col)
    pub fn new(kind: PieceKind, row: i32, col: i32) -> Self {
        Self {
            kind,
            rotation: Rotation::North,
            row,
            col,
        }
    }

    /// Absolute occupied cells for the current state and position
    pub fn cells(&self) -> [Coord; 4] {
        self.cells_offset(0, 0)
    }

    /// Occupied cells as if the piece were translated by (d_row, d_col)
    pub fn cells_offset(&self, d_row: i32, d_col: i32) -> [Coord; 4] {
        let (row, col) = (self.row + d_row, self.col + d_col);
        get_offsets(self.kind, self.rotation).map(|(dr, dc)| (row + dr, col + dc))
    }

    pub fn fits(&self, board: &Board) -> bool {
        board.fits(&self.cells())
    }

    /// True iff the translated piece would be on the board and overlap nothing
    pub fn can_move_to(&self, board: &Board, d_row: i32, d_col: i32) -> bool {
        board.fits(&self.cells_offset(d_row, d_col))
    }

    /// Move one step if the destination fits; position is unchanged otherwise
    pub fn try_move(&mut self, board: &Board, direction: Direction) -> bool {
        let (d_row, d_col) = direction.delta();
        if !self.can_move_to(board, d_row, d_col) {
            return false;
        }
        self.row += d_row;
        self.col += d_col;
        true
    }

    /// Rotate about the anchor if the new state fits at the same position
    ///
    /// No kicks are attempted: a rotation blocked in place fails and the previous
    /// rotation state is restored.
    pub fn try_rotate(&mut self, board: &Board, clockwise: bool) -> bool {
        let previous = self.rotation;
        self.rotate(clockwise);
        if self.fits(board) {
            return true;
        }
        self.rotation = previous;
        false
    }

    /// Unchecked rotation (used while a piece is still being placed above the board)
    pub fn rotate(&mut self, clockwise: bool) {
        self.rotation = if clockwise {
            self.rotation.rotate_cw()
        } else {
            self.rotation.rotate_ccw()
        };
    }

    /// Rows the piece can fall before it rests; 0 if it does not currently fit
    pub fn drop_distance(&self, board: &Board) -> i32 {
        if !self.fits(board) {
            return 0;
        }
        let mut distance = 0;
        while self.can_move_to(board, distance + 1, 0) {
            distance += 1;
        }
        distance
    }

    /// Landing preview: the cells the piece would occupy after falling as far as it can
    pub fn shadow(&self, board: &Board) -> [Coord; 4] {
        self.cells_offset(self.drop_distance(board), 0)
    }

    /// Smallest absolute row among the occupied cells
    pub fn min_row(&self) -> i32 {
        self.cells()
            .iter()
            .map(|&(row, _)| row)
            .min()
            .unwrap_or(self.row)
    }
}
