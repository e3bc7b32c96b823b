//! Game configuration
//!
//! Board dimensions and the RNG seed a game is built from. Dimensions below the
//! playable minimum are clamped here, before any game exists.

use crate::types::{DEFAULT_COLS, DEFAULT_ROWS, MIN_COLS, MIN_ROWS};

/// Game configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    pub rows: u16,
    pub cols: u16,
    pub seed: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            seed: 1,
        }
    }
}

impl GameConfig {
    pub fn new(rows: u16, cols: u16, seed: u32) -> Self {
        Self { rows, cols, seed }.clamped()
    }

    /// Create from environment variables
    ///
    /// - `AUTO_TETRIS_ROWS` (default 15)
    /// - `AUTO_TETRIS_COLS` (default 10)
    /// - `AUTO_TETRIS_SEED` (default 1)
    ///
    /// Unparseable values fall back to the default.
    pub fn from_env() -> Self {
        use std::env;

        let defaults = Self::default();
        let rows = env::var("AUTO_TETRIS_ROWS")
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.rows);
        let cols = env::var("AUTO_TETRIS_COLS")
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.cols);
        let seed = env::var("AUTO_TETRIS_SEED")
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.seed);

        Self::new(rows, cols, seed)
    }

    /// Same configuration with dimensions raised to the 4x4 minimum
    pub fn clamped(self) -> Self {
        Self {
            rows: self.rows.max(MIN_ROWS),
            cols: self.cols.max(MIN_COLS),
            ..self
        }
    }

    pub fn with_seed(self, seed: u32) -> Self {
        Self { seed, ..self }
    }
}
