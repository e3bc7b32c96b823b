//! RNG module - deterministic piece generation
//!
//! [`SimpleRng`] is a small LCG whose whole state is one `u32`, so a game is
//! reproducible from its seed alone. [`PieceGenerator`] turns draws from that
//! source into freshly spawned pieces; it holds no randomness of its own and is
//! handed the game's RNG for every spawn.

use crate::piece::FallingPiece;
use crate::pieces::max_dimension;
use crate::types::PieceKind;

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// Scales by the high bits; the low bits of an LCG with a power-of-two modulus
    /// cycle with very short periods.
    pub fn next_range(&mut self, max: u32) -> u32 {
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    /// Current internal state
    pub fn state(&self) -> u32 {
        self.state
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}

/// Spawns pieces above the board and lowers them into view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceGenerator {
    /// Anchor row of a fresh piece, high enough that no orientation reaches row 0
    spawn_row: i32,
}

impl PieceGenerator {
    pub fn new() -> Self {
        Self {
            spawn_row: 1 - max_dimension(),
        }
    }

    pub fn spawn_row(&self) -> i32 {
        self.spawn_row
    }

    /// Anchor column of a fresh piece on a board `cols` wide
    pub fn spawn_col(cols: u16) -> i32 {
        cols as i32 / 2 - 1
    }

    /// Draw the next piece
    ///
    /// Draws the kind, then 0..=3 clockwise quarter turns, both from `rng`, then
    /// moves the piece down until its top cell sits on row 0. The result may
    /// overlap the stack; the caller decides whether that ends the game.
    pub fn next_piece(&self, rng: &mut SimpleRng, cols: u16) -> FallingPiece {
        let kind = PieceKind::ALL[rng.next_range(PieceKind::ALL.len() as u32) as usize];
        let mut piece = FallingPiece::new(kind, self.spawn_row, Self::spawn_col(cols));

        for _ in 0..rng.next_range(4) {
            piece.rotate(true);
        }

        let min_row = piece.min_row();
        debug_assert!(min_row <= 0, "spawn row must be above the board");
        piece.row -= min_row;
        piece
    }
}

impl Default for PieceGenerator {
    fn default() -> Self {
        Self::new()
    }
}
