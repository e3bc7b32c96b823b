//! Adapter module - everything that drives a game from outside
//!
//! - [`controller`]: decision-makers that pick one command per turn from the
//!   board occupancy
//! - [`session`]: a controller playing a game, with optional move recording
//! - [`record`]: recorded games as JSON files, replayable move for move
//! - [`protocol`] and [`server`]: remote controllers over a line-delimited JSON
//!   TCP protocol
//!
//! # Protocol Overview
//!
//! 1. **Connection**: client connects (default: 127.0.0.1:7777) and receives an
//!    `observation` of the shared game
//! 2. **Commanding**: client sends `command` (up to 32 commands) or `pause`
//! 3. **Reply**: server answers with `ack` listing per-command success followed
//!    by a fresh `observation`, or with an `error`
//!
//! `seq` must increase strictly per connection.

pub mod controller;
pub mod protocol;
pub mod record;
pub mod server;
pub mod session;

pub use controller::{Controller, RandomController, ScriptedController};
pub use record::GameRecord;
pub use server::{run_server, start_server, ServerConfig, ServerHandle};
pub use session::Session;
