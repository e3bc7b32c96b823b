//! Decision-makers that drive a game one command at a time
//!
//! A controller sees only the row-major 0/1 occupancy of the board (falling
//! piece included) and answers with one [`Command`]. It never touches the game.

use auto_tetris_core::SimpleRng;
use auto_tetris_types::Command;

pub trait Controller {
    /// Pick the next command for the given occupancy snapshot
    fn choose(&mut self, occupancy: &[u8]) -> Command;
}

impl<F> Controller for F
where
    F: FnMut(&[u8]) -> Command,
{
    fn choose(&mut self, occupancy: &[u8]) -> Command {
        self(occupancy)
    }
}

/// Uniform choice over [`Command::ALL`], reproducible from its seed
#[derive(Debug, Clone)]
pub struct RandomController {
    rng: SimpleRng,
}

impl RandomController {
    pub fn new(seed: u32) -> Self {
        Self {
            rng: SimpleRng::new(seed),
        }
    }
}

impl Controller for RandomController {
    fn choose(&mut self, _occupancy: &[u8]) -> Command {
        Command::ALL[self.rng.next_range(Command::ALL.len() as u32) as usize]
    }
}

/// Plays back a fixed list of commands, then answers `NoOp` forever
#[derive(Debug, Clone, Default)]
pub struct ScriptedController {
    moves: Vec<Command>,
    next: usize,
}

impl ScriptedController {
    pub fn new(moves: Vec<Command>) -> Self {
        Self { moves, next: 0 }
    }

    pub fn remaining(&self) -> usize {
        self.moves.len() - self.next
    }

    pub fn is_exhausted(&self) -> bool {
        self.next >= self.moves.len()
    }
}

impl Controller for ScriptedController {
    fn choose(&mut self, _occupancy: &[u8]) -> Command {
        match self.moves.get(self.next) {
            Some(&command) => {
                self.next += 1;
                command
            }
            None => Command::NoOp,
        }
    }
}
