//! auto-tetris (workspace facade crate).
//!
//! Re-exports the workspace members as `auto_tetris::{types,core,adapter}` so
//! the binary, integration tests and benches share one import path.

pub use auto_tetris_adapter as adapter;
pub use auto_tetris_core as core;
pub use auto_tetris_types as types;
