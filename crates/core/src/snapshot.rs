use std::fmt;

use crate::board::Board;
use crate::piece::FallingPiece;
use crate::types::{CellValue, Coord, PieceKind, Rotation, EMPTY};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FallingSnapshot {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub row: i32,
    pub col: i32,
    pub cells: [Coord; 4],
}

impl From<FallingPiece> for FallingSnapshot {
    fn from(value: FallingPiece) -> Self {
        Self {
            kind: value.kind,
            rotation: value.rotation,
            row: value.row,
            col: value.col,
            cells: value.cells(),
        }
    }
}

/// Read-only view of a game for renderers and observers
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub rows: u16,
    pub cols: u16,
    /// Committed cells, row-major
    pub board: Vec<CellValue>,
    pub falling: FallingSnapshot,
    pub shadow: [Coord; 4],
    pub score: u32,
    pub lines: u32,
    pub pieces_placed: u32,
    pub seed: u32,
    pub paused: bool,
    pub game_over: bool,
}

impl GameSnapshot {
    pub(crate) fn empty(falling: FallingPiece) -> Self {
        Self {
            rows: 0,
            cols: 0,
            board: Vec::new(),
            falling: FallingSnapshot::from(falling),
            shadow: falling.cells(),
            score: 0,
            lines: 0,
            pieces_placed: 0,
            seed: 0,
            paused: false,
            game_over: false,
        }
    }

    /// Committed value at (row, col); `None` if out of bounds
    pub fn cell_at(&self, row: i32, col: i32) -> Option<CellValue> {
        if row < 0 || col < 0 || row >= self.rows as i32 || col >= self.cols as i32 {
            return None;
        }
        self.board
            .get(row as usize * self.cols as usize + col as usize)
            .copied()
    }
}

/// Flatten `board` to row-major 0/1 occupancy and overlay `falling` as 1s
///
/// Falling cells outside the board are skipped.
pub fn write_occupancy(board: &Board, falling: &[Coord], out: &mut Vec<u8>) {
    out.clear();
    out.extend(board.cells().iter().map(|&v| u8::from(v != EMPTY)));
    let cols = board.cols() as usize;
    for &(row, col) in falling {
        if board.in_bounds(row, col) {
            out[row as usize * cols + col as usize] = 1;
        }
    }
}

impl fmt::Display for GameSnapshot {
    /// Text dump: committed cells as uppercase letters, the falling piece in
    /// lowercase, its landing shadow as `+`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "score {}  lines {}", self.score, self.lines)?;
        for row in 0..self.rows as i32 {
            for col in 0..self.cols as i32 {
                let ch = if self.falling.cells.contains(&(row, col)) {
                    self.falling.kind.letter().to_ascii_lowercase()
                } else if let Some(kind) = self.cell_at(row, col).and_then(PieceKind::from_rep) {
                    kind.letter()
                } else if self.shadow.contains(&(row, col)) {
                    '+'
                } else {
                    '.'
                };
                write!(f, "{ch}")?;
            }
            writeln!(f)?;
        }
        if self.game_over {
            writeln!(f, "game over")?;
        } else if self.paused {
            writeln!(f, "paused")?;
        }
        Ok(())
    }
}
