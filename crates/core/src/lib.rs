//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains the game rules, state management, and simulation logic.
//! It has **no dependencies** on rendering, networking, timing or I/O, making it:
//!
//! - **Deterministic**: Same seed and commands produce identical games (for replays and automated play)
//! - **Driver-agnostic**: Human input handlers, scripted controllers and remote agents all use the same command protocol
//! - **Testable**: Every rule is a plain synchronous function call
//!
//! # Module Structure
//!
//! - [`pieces`]: Tetromino geometry tables, four precomputed rotation states per kind
//! - [`board`]: Configurable grid with collision queries and row compaction
//! - [`piece`]: The falling piece and its move/rotate protocol
//! - [`rng`]: Seeded LCG and the piece generator built on it
//! - [`scoring`]: Points per commit
//! - [`game`]: Game state machine and command dispatch
//! - [`snapshot`]: Read-only views for renderers and decision-makers
//! - [`config`]: Board dimensions and seed
//!
//! # Game Rules
//!
//! - **Spawning**: a uniformly drawn kind in a uniformly drawn orientation, centred, lowered until its top cell is on row 0
//! - **Rotation**: about the piece's anchor cell, no wall kicks
//! - **Gravity**: one row per [`Game::step`]; a piece that cannot fall is committed
//! - **Scoring**: 0/40/100/300/1200 points for 0-4 rows cleared by one commit
//! - **Game over**: a freshly spawned piece overlaps the stack
//!
//! # Example
//!
//! ```
//! use auto_tetris_core::Game;
//! use auto_tetris_types::Command;
//!
//! let mut game = Game::new(12345);
//!
//! game.apply(Command::MoveRight);
//! game.apply(Command::Rotate { clockwise: true });
//! game.apply(Command::HardDrop);
//!
//! assert_eq!(game.pieces_placed(), 1);
//! assert_eq!(game.score(), 0); // one piece cannot fill a row
//! ```

pub mod board;
pub mod config;
pub mod game;
pub mod piece;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use auto_tetris_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use config::GameConfig;
pub use game::{Game, GameStatus, Placement};
pub use piece::{Direction, FallingPiece};
pub use pieces::{geometry, get_offsets, get_state, PieceGeometry, RotationState};
pub use rng::{PieceGenerator, SimpleRng};
pub use scoring::points_for_rows;
pub use snapshot::{FallingSnapshot, GameSnapshot};
