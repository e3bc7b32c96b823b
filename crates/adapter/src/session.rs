//! Automated sessions - a controller playing a game turn by turn

use auto_tetris_core::{Game, GameConfig};
use auto_tetris_types::Command;

use crate::controller::{Controller, ScriptedController};
use crate::record::GameRecord;

/// A game driven by a [`Controller`]
///
/// Each turn the controller is shown the occupancy snapshot and its answer is
/// applied to the game. With recording on, every applied command is kept so the
/// game can be saved and replayed.
pub struct Session<C> {
    game: Game,
    controller: C,
    record: Option<GameRecord>,
    occupancy: Vec<u8>,
    moves_made: usize,
}

impl<C: Controller> Session<C> {
    pub fn new(controller: C, config: &GameConfig, record_moves: bool) -> Self {
        let game = Game::with_config(config);
        let record = record_moves.then(|| GameRecord::new(config));
        Self {
            occupancy: Vec::with_capacity(game.board().cells().len()),
            game,
            controller,
            record,
            moves_made: 0,
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn controller(&self) -> &C {
        &self.controller
    }

    pub fn score(&self) -> u32 {
        self.game.score()
    }

    pub fn game_over(&self) -> bool {
        self.game.game_over()
    }

    pub fn moves_made(&self) -> usize {
        self.moves_made
    }

    pub fn toggle_pause(&mut self) -> bool {
        self.game.toggle_pause()
    }

    /// Play one turn
    ///
    /// Returns false without consulting the controller when the game is over or
    /// paused, so a paused session neither consumes nor records commands.
    pub fn step(&mut self) -> bool {
        if self.game.game_over() || self.game.paused() {
            return false;
        }

        self.game.occupancy_into(&mut self.occupancy);
        let command = self.controller.choose(&self.occupancy);
        if let Some(record) = self.record.as_mut() {
            record.push(command);
        }
        self.game.apply(command);
        self.moves_made += 1;
        true
    }

    /// Play until the game ends, the session is paused, or `max_moves` turns
    /// have been played. Returns the number of turns played by this call.
    pub fn play(&mut self, max_moves: Option<usize>) -> usize {
        let mut played = 0;
        while max_moves.map_or(true, |max| played < max) && self.step() {
            played += 1;
        }
        played
    }

    /// Recorded moves so far; empty when recording is off
    pub fn moves(&self) -> &[Command] {
        match &self.record {
            Some(record) => &record.moves,
            None => &[],
        }
    }

    /// Snapshot of the record, or `None` when recording is off
    pub fn record(&self) -> Option<GameRecord> {
        self.record.clone()
    }
}

impl Session<ScriptedController> {
    /// Session that plays back `record` from its starting state
    ///
    /// The replay records its own moves, so its record equals the input once
    /// [`Session::replay_to_end`] has run.
    pub fn replay(record: &GameRecord) -> Self {
        let controller = ScriptedController::new(record.moves.clone());
        Self::new(controller, &record.config(), true)
    }

    /// Apply exactly the remaining recorded moves
    ///
    /// Moves recorded after the game ended are never reached. Returns the number
    /// of moves applied.
    pub fn replay_to_end(&mut self) -> usize {
        let mut applied = 0;
        while !self.controller.is_exhausted() && self.step() {
            applied += 1;
        }
        applied
    }
}
