//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (engine logic, controllers, the remote protocol).
//!
//! # Board Dimensions
//!
//! The playfield is configurable, with these defaults:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DEFAULT_ROWS` | 15 | Rows in a fresh game |
//! | `DEFAULT_COLS` | 10 | Columns in a fresh game |
//! | `MIN_ROWS` | 4 | Smallest accepted row count |
//! | `MIN_COLS` | 4 | Smallest accepted column count |
//!
//! Coordinates are `(row, col)` with row 0 at the top of the board.
//!
//! # Cell Values
//!
//! A board cell is a `u8`: [`EMPTY`] (0) or the rep id (1..=7) of the piece that
//! was committed there. See [`PieceKind::rep`].
//!
//! # Examples
//!
//! ```
//! use auto_tetris_types::{Command, PieceKind, Rotation};
//!
//! assert_eq!(PieceKind::O.rep(), 4);
//! assert_eq!(PieceKind::from_rep(4), Some(PieceKind::O));
//!
//! assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
//! assert_eq!(Rotation::from_index(3), Some(Rotation::West));
//!
//! assert_eq!(Command::from_str("hardDrop"), Some(Command::HardDrop));
//! assert_eq!(Command::Rotate { clockwise: true }.as_str(), "rotateCw");
//! ```

/// Default board height in rows
pub const DEFAULT_ROWS: u16 = 15;

/// Default board width in columns
pub const DEFAULT_COLS: u16 = 10;

/// Smallest playable board height
pub const MIN_ROWS: u16 = 4;

/// Smallest playable board width
pub const MIN_COLS: u16 = 4;

/// Value of an empty board cell
pub const EMPTY: u8 = 0;

/// A board cell: [`EMPTY`] or a piece rep id (1..=7)
pub type CellValue = u8;

/// Absolute board coordinate `(row, col)`
///
/// Signed so that cells of a piece that is still above the board (negative rows)
/// or hanging off an edge can be represented and rejected by bounds checks.
pub type Coord = (i32, i32);

/// Line clear scoring table, indexed by the number of rows cleared in one commit
///
/// - 0 lines: 0 points
/// - 1 line: 40 points
/// - 2 lines: 100 points
/// - 3 lines: 300 points
/// - 4 lines: 1200 points
pub const LINE_SCORES: [u32; 5] = [0, 40, 100, 300, 1200];

/// The seven tetromino piece kinds
///
/// Declared in rep-id order: `I` = 1 through `Z` = 7.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PieceKind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl PieceKind {
    /// All kinds, in rep-id order. The piece generator draws an index into this.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::T,
        PieceKind::Z,
    ];

    /// Rep id written into board cells when a piece of this kind is committed
    pub fn rep(&self) -> CellValue {
        match self {
            PieceKind::I => 1,
            PieceKind::J => 2,
            PieceKind::L => 3,
            PieceKind::O => 4,
            PieceKind::S => 5,
            PieceKind::T => 6,
            PieceKind::Z => 7,
        }
    }

    /// Inverse of [`PieceKind::rep`]; `None` for 0 and anything above 7
    pub fn from_rep(rep: CellValue) -> Option<Self> {
        match rep {
            1..=7 => Some(Self::ALL[(rep - 1) as usize]),
            _ => None,
        }
    }

    /// Index into [`PieceKind::ALL`]
    pub fn index(&self) -> usize {
        (self.rep() - 1) as usize
    }

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use auto_tetris_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("T"), Some(PieceKind::T));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            "o" => Some(PieceKind::O),
            "s" => Some(PieceKind::S),
            "t" => Some(PieceKind::T),
            "z" => Some(PieceKind::Z),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::J => "j",
            PieceKind::L => "l",
            PieceKind::O => "o",
            PieceKind::S => "s",
            PieceKind::T => "t",
            PieceKind::Z => "z",
        }
    }

    /// Single uppercase letter, used by text dumps of the board
    pub fn letter(&self) -> char {
        match self {
            PieceKind::I => 'I',
            PieceKind::J => 'J',
            PieceKind::L => 'L',
            PieceKind::O => 'O',
            PieceKind::S => 'S',
            PieceKind::T => 'T',
            PieceKind::Z => 'Z',
        }
    }
}

/// Rotation states of a piece
///
/// - **North**: spawn-table orientation (state 0)
/// - **East**: rotated 90° clockwise (state 1)
/// - **South**: rotated 180° (state 2)
/// - **West**: rotated 270° clockwise (state 3)
///
/// The rotation cycle goes: North → East → South → West → North
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rotation {
    North,
    East,
    South,
    West,
}

impl Rotation {
    pub const ALL: [Rotation; 4] = [
        Rotation::North,
        Rotation::East,
        Rotation::South,
        Rotation::West,
    ];

    /// Rotate clockwise (90°)
    ///
    /// # Examples
    ///
    /// ```
    /// use auto_tetris_types::Rotation;
    ///
    /// assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
    /// assert_eq!(Rotation::West.rotate_cw(), Rotation::North);
    /// ```
    pub fn rotate_cw(&self) -> Self {
        match self {
            Rotation::North => Rotation::East,
            Rotation::East => Rotation::South,
            Rotation::South => Rotation::West,
            Rotation::West => Rotation::North,
        }
    }

    /// Rotate counter-clockwise (-90° or 270°)
    ///
    /// # Examples
    ///
    /// ```
    /// use auto_tetris_types::Rotation;
    ///
    /// assert_eq!(Rotation::North.rotate_ccw(), Rotation::West);
    /// assert_eq!(Rotation::East.rotate_ccw(), Rotation::North);
    /// ```
    pub fn rotate_ccw(&self) -> Self {
        match self {
            Rotation::North => Rotation::West,
            Rotation::West => Rotation::South,
            Rotation::South => Rotation::East,
            Rotation::East => Rotation::North,
        }
    }

    /// Rotation-state index (0..=3)
    pub fn index(&self) -> usize {
        match self {
            Rotation::North => 0,
            Rotation::East => 1,
            Rotation::South => 2,
            Rotation::West => 3,
        }
    }

    /// State for a rotation index; `None` outside 0..=3
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Parse rotation from string
    ///
    /// Accepts full names or single letters (case-insensitive):
    /// "north" | "n", "east" | "e", "south" | "s", "west" | "w"
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "north" | "n" => Some(Rotation::North),
            "east" | "e" => Some(Rotation::East),
            "south" | "s" => Some(Rotation::South),
            "west" | "w" => Some(Rotation::West),
            _ => None,
        }
    }

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Rotation::North => "north",
            Rotation::East => "east",
            Rotation::South => "south",
            Rotation::West => "west",
        }
    }
}

/// Discrete commands a driver can issue to a game, one per turn
///
/// These are used by human drivers, automated controllers, recorded games and
/// the remote protocol alike.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// Move the falling piece one column left
    MoveLeft,
    /// Move the falling piece one column right
    MoveRight,
    /// Rotate the falling piece in place
    Rotate { clockwise: bool },
    /// Soft drop: one gravity step, committing the piece if it is resting
    MoveDown,
    /// Gravity steps until the falling piece is committed
    HardDrop,
    /// Advance one gravity tick without any other movement
    NoOp,
}

impl Command {
    /// The six command symbols offered to decision-makers
    pub const ALL: [Command; 6] = [
        Command::MoveLeft,
        Command::MoveRight,
        Command::Rotate { clockwise: true },
        Command::MoveDown,
        Command::HardDrop,
        Command::NoOp,
    ];

    /// Parse command from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use auto_tetris_types::Command;
    ///
    /// assert_eq!(Command::from_str("moveLeft"), Some(Command::MoveLeft));
    /// assert_eq!(Command::from_str("rotateccw"), Some(Command::Rotate { clockwise: false }));
    /// assert_eq!(Command::from_str("hold"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" | "left" => Some(Command::MoveLeft),
            "moveright" | "right" => Some(Command::MoveRight),
            "rotatecw" | "rotate" => Some(Command::Rotate { clockwise: true }),
            "rotateccw" => Some(Command::Rotate { clockwise: false }),
            "movedown" | "down" => Some(Command::MoveDown),
            "harddrop" | "drop" => Some(Command::HardDrop),
            "noop" | "nop" => Some(Command::NoOp),
            _ => None,
        }
    }

    /// Convert to camelCase string for records and the remote protocol
    pub fn as_str(&self) -> &'static str {
        match self {
            Command::MoveLeft => "moveLeft",
            Command::MoveRight => "moveRight",
            Command::Rotate { clockwise: true } => "rotateCw",
            Command::Rotate { clockwise: false } => "rotateCcw",
            Command::MoveDown => "moveDown",
            Command::HardDrop => "hardDrop",
            Command::NoOp => "noOp",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rep_ids_follow_declaration_order() {
        for (i, kind) in PieceKind::ALL.iter().enumerate() {
            assert_eq!(kind.rep() as usize, i + 1);
            assert_eq!(kind.index(), i);
            assert_eq!(PieceKind::from_rep(kind.rep()), Some(*kind));
        }
        assert_eq!(PieceKind::from_rep(EMPTY), None);
        assert_eq!(PieceKind::from_rep(8), None);
    }

    #[test]
    fn rotation_index_roundtrip() {
        for r in Rotation::ALL {
            assert_eq!(Rotation::from_index(r.index()), Some(r));
            assert_eq!(r.rotate_cw().rotate_ccw(), r);
        }
        assert_eq!(Rotation::from_index(4), None);
    }

    #[test]
    fn command_names_parse_back() {
        for cmd in Command::ALL {
            assert_eq!(Command::from_str(cmd.as_str()), Some(cmd));
        }
        let ccw = Command::Rotate { clockwise: false };
        assert_eq!(Command::from_str(ccw.as_str()), Some(ccw));
    }

    #[test]
    fn scoring_table_matches_classic_values() {
        assert_eq!(LINE_SCORES, [0, 40, 100, 300, 1200]);
    }
}
