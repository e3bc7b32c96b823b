//! Recorded games
//!
//! A game is fully determined by its seed, its board dimensions and the
//! commands applied to it, so that is all a record stores.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use auto_tetris_core::{Game, GameConfig};
use auto_tetris_types::Command;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    pub seed: u32,
    pub rows: u16,
    pub cols: u16,
    #[serde(with = "command_names")]
    pub moves: Vec<Command>,
}

impl GameRecord {
    /// Empty record for a game built from `config`
    pub fn new(config: &GameConfig) -> Self {
        let config = config.clamped();
        Self {
            seed: config.seed,
            rows: config.rows,
            cols: config.cols,
            moves: Vec::new(),
        }
    }

    pub fn config(&self) -> GameConfig {
        GameConfig::new(self.rows, self.cols, self.seed)
    }

    pub fn push(&mut self, command: Command) {
        self.moves.push(command);
    }

    /// Fresh game in the record's starting state
    pub fn new_game(&self) -> Game {
        Game::with_config(&self.config())
    }

    /// Apply every recorded move to a fresh game
    pub fn final_game(&self) -> Game {
        let mut game = self.new_game();
        for &command in &self.moves {
            game.apply(command);
        }
        game
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("failed to serialize game record")
    }

    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("failed to parse game record")
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let text = self.to_json()?;
        fs::write(path, text).with_context(|| format!("failed to write {}", path.display()))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text =
            fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("invalid record in {}", path.display()))
    }
}

mod command_names {
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::protocol::CommandName;
    use auto_tetris_types::Command;

    pub fn serialize<S>(moves: &[Command], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(moves.iter().map(|&c| CommandName(c)))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<Command>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let names = Vec::<CommandName>::deserialize(deserializer)?;
        Ok(names.into_iter().map(|CommandName(c)| c).collect())
    }
}
