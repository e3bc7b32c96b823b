//! Wire protocol - line-delimited JSON messages
//!
//! Every message is one JSON object on one line with a `type` field.
//!
//! Client to server:
//! - `{"type":"command","seq":1,"commands":["moveLeft","hardDrop"]}`
//! - `{"type":"pause","seq":2}`
//!
//! Server to client: `observation`, `ack` and `error`.

use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use auto_tetris_core::{FallingPiece, Game};
use auto_tetris_types::{Command, Coord, PieceKind};

/// Upper bound on commands carried by a single `command` message
pub const MAX_COMMANDS_PER_MESSAGE: usize = 32;

/// [`Command`] under its camelCase wire name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CommandName(pub Command);

impl Serialize for CommandName {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.0.as_str())
    }
}

impl<'de> Deserialize<'de> for CommandName {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = <std::borrow::Cow<'de, str>>::deserialize(deserializer)?;
        Command::from_str(&s)
            .map(CommandName)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown command: {s}")))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandList(pub ArrayVec<Command, MAX_COMMANDS_PER_MESSAGE>);

impl<'de> Deserialize<'de> for CommandList {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct V;
        impl<'de> serde::de::Visitor<'de> for V {
            type Value = CommandList;

            fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                write!(f, "an array of command strings")
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: serde::de::SeqAccess<'de>,
            {
                let mut out = ArrayVec::<Command, MAX_COMMANDS_PER_MESSAGE>::new();
                while let Some(CommandName(c)) = seq.next_element::<CommandName>()? {
                    out.try_push(c)
                        .map_err(|_| serde::de::Error::custom("too many commands"))?;
                }
                Ok(CommandList(out))
            }
        }

        deserializer.deserialize_seq(V)
    }
}

// ============== Client -> Server Messages ==============

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    Command { seq: u64, commands: CommandList },
    Pause { seq: u64 },
}

impl ClientMessage {
    pub fn seq(&self) -> u64 {
        match self {
            ClientMessage::Command { seq, .. } | ClientMessage::Pause { seq } => *seq,
        }
    }
}

// ============== Server -> Client Messages ==============

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    #[serde(rename = "invalid_message")]
    InvalidMessage,
    #[serde(rename = "invalid_seq")]
    InvalidSeq,
    #[serde(rename = "game_over")]
    GameOver,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::InvalidMessage => "invalid_message",
            ErrorCode::InvalidSeq => "invalid_seq",
            ErrorCode::GameOver => "game_over",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FallingInfo {
    pub kind: String,
    pub rotation: String,
    pub row: i32,
    pub col: i32,
    pub cells: Vec<Coord>,
}

impl From<&FallingPiece> for FallingInfo {
    fn from(piece: &FallingPiece) -> Self {
        Self {
            kind: piece.kind.as_str().to_string(),
            rotation: piece.rotation.as_str().to_string(),
            row: piece.row,
            col: piece.col,
            cells: piece.cells().to_vec(),
        }
    }
}

impl FallingInfo {
    pub fn piece_kind(&self) -> Option<PieceKind> {
        PieceKind::from_str(&self.kind)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "observation")]
pub struct ObservationMessage {
    pub seq: u64,
    pub rows: u16,
    pub cols: u16,
    /// Row-major 0/1 occupancy, falling piece included
    pub board: Vec<u8>,
    /// Row-major committed cell values (piece reps)
    pub cells: Vec<u8>,
    pub falling: FallingInfo,
    pub score: u32,
    pub lines: u32,
    pub paused: bool,
    pub game_over: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "ack")]
pub struct AckMessage {
    pub seq: u64,
    /// Per-command success, in request order
    pub applied: Vec<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "error")]
pub struct ErrorMessage {
    pub seq: u64,
    pub code: ErrorCode,
    pub message: String,
}

pub fn build_observation(game: &Game, seq: u64) -> ObservationMessage {
    ObservationMessage {
        seq,
        rows: game.rows(),
        cols: game.cols(),
        board: game.occupancy(),
        cells: game.board().cells().to_vec(),
        falling: FallingInfo::from(game.falling()),
        score: game.score(),
        lines: game.lines(),
        paused: game.paused(),
        game_over: game.game_over(),
    }
}

pub fn create_ack(seq: u64, applied: Vec<bool>) -> AckMessage {
    AckMessage { seq, applied }
}

pub fn create_error(seq: u64, code: ErrorCode, message: &str) -> ErrorMessage {
    ErrorMessage {
        seq,
        code,
        message: message.to_string(),
    }
}

/// Parse one inbound line
pub fn parse_message(line: &str) -> Result<ClientMessage, serde_json::Error> {
    serde_json::from_str(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_command_message() {
        let msg = parse_message(r#"{"type":"command","seq":7,"commands":["moveLeft","rotateCcw","drop"]}"#)
            .unwrap();
        match msg {
            ClientMessage::Command { seq, commands } => {
                assert_eq!(seq, 7);
                assert_eq!(
                    commands.0.as_slice(),
                    &[
                        Command::MoveLeft,
                        Command::Rotate { clockwise: false },
                        Command::HardDrop
                    ]
                );
            }
            other => panic!("unexpected message {other:?}"),
        }
    }

    #[test]
    fn test_parse_pause_message() {
        let msg = parse_message(r#"{"type":"pause","seq":3}"#).unwrap();
        assert_eq!(msg.seq(), 3);
        assert!(matches!(msg, ClientMessage::Pause { .. }));
    }

    #[test]
    fn test_unknown_command_is_rejected() {
        assert!(parse_message(r#"{"type":"command","seq":1,"commands":["hold"]}"#).is_err());
    }

    #[test]
    fn test_command_list_is_bounded() {
        let names = vec!["\"noOp\""; MAX_COMMANDS_PER_MESSAGE + 1].join(",");
        let line = format!(r#"{{"type":"command","seq":1,"commands":[{names}]}}"#);
        let err = parse_message(&line).unwrap_err();
        assert!(err.to_string().contains("too many commands"));

        let names = vec!["\"noOp\""; MAX_COMMANDS_PER_MESSAGE].join(",");
        let line = format!(r#"{{"type":"command","seq":1,"commands":[{names}]}}"#);
        assert!(parse_message(&line).is_ok());
    }

    #[test]
    fn test_observation_shape() {
        let game = Game::new(11);
        let obs = build_observation(&game, 5);
        let value: serde_json::Value = serde_json::to_value(&obs).unwrap();
        assert_eq!(value["type"], "observation");
        assert_eq!(value["seq"], 5);
        assert_eq!(value["rows"], 15);
        assert_eq!(value["board"].as_array().unwrap().len(), 150);
        assert_eq!(value["falling"]["cells"].as_array().unwrap().len(), 4);
        assert_eq!(value["game_over"], false);
        let ones = obs.board.iter().filter(|&&v| v == 1).count();
        assert_eq!(ones, 4);
    }

    #[test]
    fn test_error_serializes_code() {
        let err = create_error(9, ErrorCode::InvalidMessage, "bad json");
        let text = serde_json::to_string(&err).unwrap();
        assert!(text.contains(r#""type":"error""#));
        assert!(text.contains(r#""code":"invalid_message""#));
        assert_eq!(ErrorCode::GameOver.as_str(), "game_over");
    }
}
