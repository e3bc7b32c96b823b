//! Game module - ties board, falling piece, RNG and scoring together
//!
//! A [`Game`] is advanced only by its driver: every command is a plain function
//! call that finishes before it returns. There are no timers; gravity happens
//! when the driver calls [`Game::step`] (or issues [`Command::NoOp`]).
//!
//! # States
//!
//! - **Running**: commands move, rotate and drop the falling piece.
//! - **Paused**: gameplay commands are accepted and ignored; only
//!   [`Game::toggle_pause`] has an effect.
//! - **GameOver**: a freshly spawned piece did not fit. Nothing has an effect any
//!   more; drivers start a new `Game`.
//!
//! # Determinism
//!
//! All randomness (piece kinds and initial rotations) comes from one
//! [`SimpleRng`] seeded at construction. Two games built with the same seed and
//! dimensions and fed the same commands stay identical after every command.

use crate::board::Board;
use crate::config::GameConfig;
use crate::piece::{Direction, FallingPiece};
use crate::rng::{PieceGenerator, SimpleRng};
use crate::scoring::points_for_rows;
use crate::snapshot::{write_occupancy, FallingSnapshot, GameSnapshot};
use crate::types::{Command, Coord, PieceKind};

/// Coarse game state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameStatus {
    Running,
    Paused,
    GameOver,
}

/// What happened when a piece was committed to the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Placement {
    pub kind: PieceKind,
    /// Cells the piece was written to, before any rows were cleared
    pub cells: [Coord; 4],
    pub rows_cleared: u32,
    pub points: u32,
}

/// Complete game state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    board: Board,
    falling: FallingPiece,
    generator: PieceGenerator,
    rng: SimpleRng,
    /// Seed the RNG was created with; with the command log this reproduces the game
    seed: u32,
    score: u32,
    lines: u32,
    pieces_placed: u32,
    /// Last commit (consumed by observers)
    last_placement: Option<Placement>,
    paused: bool,
    game_over: bool,
}

impl Game {
    /// Create a new game on a default-sized board with the given RNG seed
    pub fn new(seed: u32) -> Self {
        Self::with_config(&GameConfig::default().with_seed(seed))
    }

    pub fn with_config(config: &GameConfig) -> Self {
        let config = config.clamped();
        Self::from_board(Board::new(config.rows, config.cols), config.seed)
    }

    /// Start a game on an existing board; the first piece is spawned immediately
    ///
    /// If that piece does not fit, the game is over from the start.
    pub fn from_board(board: Board, seed: u32) -> Self {
        let mut rng = SimpleRng::new(seed);
        let generator = PieceGenerator::new();
        let falling = generator.next_piece(&mut rng, board.cols());
        let game_over = !falling.fits(&board);

        Self {
            board,
            falling,
            generator,
            rng,
            seed,
            score: 0,
            lines: 0,
            pieces_placed: 0,
            last_placement: None,
            paused: false,
            game_over,
        }
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn rows(&self) -> u16 {
        self.board.rows()
    }

    pub fn cols(&self) -> u16 {
        self.board.cols()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn falling(&self) -> &FallingPiece {
        &self.falling
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Total rows cleared so far
    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn pieces_placed(&self) -> u32 {
        self.pieces_placed
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn status(&self) -> GameStatus {
        if self.game_over {
            GameStatus::GameOver
        } else if self.paused {
            GameStatus::Paused
        } else {
            GameStatus::Running
        }
    }

    fn running(&self) -> bool {
        !self.paused && !self.game_over
    }

    /// Flip between Running and Paused
    /// Returns false (and does nothing) once the game is over
    pub fn toggle_pause(&mut self) -> bool {
        if self.game_over {
            return false;
        }
        self.paused = !self.paused;
        true
    }

    /// Apply one driver command
    ///
    /// Returns the success of the underlying operation: whether the piece moved
    /// or rotated, whether a gravity step moved it down, or whether a hard drop
    /// ran. Always false while paused or over.
    pub fn apply(&mut self, command: Command) -> bool {
        match command {
            Command::MoveLeft => self.try_move(Direction::Left),
            Command::MoveRight => self.try_move(Direction::Right),
            Command::Rotate { clockwise } => self.try_rotate(clockwise),
            Command::MoveDown | Command::NoOp => self.step(),
            Command::HardDrop => self.hard_drop(),
        }
    }

    /// Move the falling piece one cell; no commit happens if it is blocked
    pub fn try_move(&mut self, direction: Direction) -> bool {
        if !self.running() {
            return false;
        }
        self.falling.try_move(&self.board, direction)
    }

    /// Move the falling piece down one row without committing it when blocked
    pub fn try_move_down(&mut self) -> bool {
        self.try_move(Direction::Down)
    }

    pub fn try_rotate(&mut self, clockwise: bool) -> bool {
        if !self.running() {
            return false;
        }
        self.falling.try_rotate(&self.board, clockwise)
    }

    /// One gravity tick
    ///
    /// Moves the falling piece down a row. If it cannot move, it is committed,
    /// complete rows are cleared and scored, and the next piece is spawned; if
    /// that piece does not fit the game is over. Returns whether the piece moved.
    pub fn step(&mut self) -> bool {
        if !self.running() {
            return false;
        }
        if self.falling.try_move(&self.board, Direction::Down) {
            return true;
        }

        self.commit_falling_piece();
        self.spawn_piece();
        false
    }

    /// Step until the falling piece is committed
    ///
    /// Each successful step lowers the piece by one row, so this finishes within
    /// `rows` steps. Returns false only if the game was not running.
    pub fn hard_drop(&mut self) -> bool {
        if !self.running() {
            return false;
        }
        while self.step() {}
        true
    }

    fn commit_falling_piece(&mut self) {
        let piece = self.falling;
        let cells = piece.cells();
        let committed = self.board.commit_cells(&cells, piece.kind.rep());
        debug_assert!(committed, "a resting piece always fits where it rests");

        let rows_cleared = self.board.clear_completed_rows();
        let points = points_for_rows(rows_cleared);
        self.score = self.score.saturating_add(points);
        self.lines = self.lines.saturating_add(rows_cleared as u32);
        self.pieces_placed = self.pieces_placed.saturating_add(1);

        self.last_placement = Some(Placement {
            kind: piece.kind,
            cells,
            rows_cleared: rows_cleared as u32,
            points,
        });
    }

    /// Replace the falling piece with a fresh one; ends the game if it does not fit
    fn spawn_piece(&mut self) {
        self.falling = self.generator.next_piece(&mut self.rng, self.board.cols());
        if !self.falling.fits(&self.board) {
            self.game_over = true;
        }
    }

    /// Take and clear the last commit record.
    pub fn take_last_placement(&mut self) -> Option<Placement> {
        self.last_placement.take()
    }

    /// Change the board dimensions (clamped to 4x4)
    ///
    /// Rows come and go at the top, columns on the right. If the falling piece no
    /// longer fits afterwards, a fresh one is spawned in its place.
    pub fn resize(&mut self, rows: u16, cols: u16) {
        self.board.resize(rows, cols);
        if !self.falling.fits(&self.board) {
            self.spawn_piece();
        }
    }

    /// Cells the falling piece would occupy if dropped now
    pub fn shadow(&self) -> [Coord; 4] {
        self.falling.shadow(&self.board)
    }

    /// Row-major 0/1 occupancy of the board with the falling piece overlaid
    pub fn occupancy(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.board.cells().len());
        self.occupancy_into(&mut out);
        out
    }

    /// [`Game::occupancy`] into a reusable buffer
    pub fn occupancy_into(&self, out: &mut Vec<u8>) {
        write_occupancy(&self.board, &self.falling.cells(), out);
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.rows = self.board.rows();
        out.cols = self.board.cols();
        out.board.clear();
        out.board.extend_from_slice(self.board.cells());
        out.falling = FallingSnapshot::from(self.falling);
        out.shadow = self.shadow();
        out.score = self.score;
        out.lines = self.lines;
        out.pieces_placed = self.pieces_placed;
        out.seed = self.seed;
        out.paused = self.paused;
        out.game_over = self.game_over;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::empty(self.falling);
        self.snapshot_into(&mut s);
        s
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Rotation, EMPTY};

    fn game_with(board: Board, falling: FallingPiece) -> Game {
        let mut game = Game::from_board(board, 1);
        game.game_over = false;
        game.falling = falling;
        game
    }

    #[test]
    fn test_new_game_state() {
        let game = Game::new(12345);

        assert_eq!(game.status(), GameStatus::Running);
        assert_eq!(game.score(), 0);
        assert_eq!(game.lines(), 0);
        assert_eq!(game.pieces_placed(), 0);
        assert_eq!((game.rows(), game.cols()), (15, 10));
        assert_eq!(game.falling().min_row(), 0);
        assert!(game.falling().fits(game.board()));
    }

    #[test]
    fn test_step_moves_piece_down() {
        let mut game = Game::new(12345);
        let row = game.falling().row;
        assert!(game.step());
        assert_eq!(game.falling().row, row + 1);
    }

    #[test]
    fn test_step_commits_resting_piece() {
        let board = Board::new(15, 10);
        let mut game = game_with(board, FallingPiece::new(PieceKind::T, 14, 4));

        assert!(!game.step());
        assert_eq!(game.pieces_placed(), 1);
        assert_eq!(game.board().cell_at(13, 4), Some(PieceKind::T.rep()));
        assert_eq!(game.board().cell_at(14, 3), Some(PieceKind::T.rep()));

        let placement = game.take_last_placement().unwrap();
        assert_eq!(placement.kind, PieceKind::T);
        assert_eq!(placement.rows_cleared, 0);
        assert!(game.take_last_placement().is_none());
    }

    #[test]
    fn test_counters_saturate_at_max() {
        let board = Board::from_rows(&[
            "..........",
            "..........",
            "ZZZZ..ZZZZ",
        ]);
        let mut game = game_with(board, FallingPiece::new(PieceKind::O, 1, 4));
        game.score = u32::MAX;
        game.lines = u32::MAX;
        game.pieces_placed = u32::MAX;

        assert!(!game.step());
        let placement = game.take_last_placement().unwrap();
        assert_eq!(placement.rows_cleared, 1);
        assert_eq!(game.score(), u32::MAX);
        assert_eq!(game.lines(), u32::MAX);
        assert_eq!(game.pieces_placed(), u32::MAX);
    }

    #[test]
    fn test_gap_fill_clears_row_and_scores_40() {
        // bottom row has a single gap at column 9
        let mut board = Board::new(15, 10);
        for col in 0..9 {
            board.set(14, col, PieceKind::Z.rep());
        }
        let mut piece = FallingPiece::new(PieceKind::I, 0, 9);
        piece.rotation = Rotation::East;
        piece.row = 2;
        let mut game = game_with(board, piece);

        assert!(game.apply(Command::HardDrop));

        assert_eq!(game.score(), 40);
        assert_eq!(game.lines(), 1);
        assert_eq!(game.rows(), 15);
        assert!(game.board().is_row_empty(0));
        // the three I cells above the cleared row shifted down by one
        for row in 12..15 {
            assert_eq!(game.board().cell_at(row, 9), Some(PieceKind::I.rep()));
        }
        for col in 0..9 {
            assert_eq!(game.board().cell_at(14, col), Some(EMPTY));
        }
        assert_eq!(game.board().occupied_count(), 3);
    }

    #[test]
    fn test_two_separate_rows_score_100() {
        // rows 14 and 12 one cell short at column 0, row 13 has a second hole
        let board = Board::from_rows(&[
            "..........",
            "..........",
            "..........",
            "..........",
            "..........",
            "..........",
            "..........",
            "..........",
            "..........",
            "..........",
            "..........",
            "..........",
            ".ZZZZZZZZZ",
            ".SSSS.SSSS",
            ".TTTTTTTTT",
        ]);
        let mut piece = FallingPiece::new(PieceKind::I, 5, 0);
        piece.rotation = Rotation::East;
        let mut game = game_with(board, piece);

        // vertical I fills (11..=14, 0): completes rows 12 and 14 but not 13
        assert!(game.hard_drop());

        assert_eq!(game.score(), 100);
        assert_eq!(game.lines(), 2);
        assert_eq!(
            game.board().to_string().lines().last(),
            Some("ISSSS.SSSS")
        );
        assert!(game.board().is_row_empty(12));
        assert!(game.board().is_row_empty(0));
        assert_eq!(game.board().cell_at(13, 0), Some(PieceKind::I.rep()));
    }

    #[test]
    fn test_spawn_into_stack_ends_game() {
        let mut board = Board::new(15, 10);
        for row in 0..2 {
            for col in 2..8 {
                board.set(row, col, PieceKind::J.rep());
            }
        }
        let game = Game::from_board(board, 3);
        assert!(game.game_over());
        assert_eq!(game.status(), GameStatus::GameOver);
    }

    #[test]
    fn test_game_over_absorbs_commands() {
        let mut board = Board::new(15, 10);
        for col in 2..8 {
            board.set(0, col, PieceKind::J.rep());
            board.set(1, col, PieceKind::J.rep());
        }
        let mut game = Game::from_board(board, 3);
        let before = game.clone();

        for cmd in Command::ALL {
            assert!(!game.apply(cmd));
        }
        assert!(!game.toggle_pause());
        assert_eq!(game, before);
    }

    #[test]
    fn test_pause_absorbs_commands() {
        let mut game = Game::new(42);
        assert!(game.toggle_pause());
        assert_eq!(game.status(), GameStatus::Paused);
        let before = game.clone();

        for cmd in Command::ALL {
            assert!(!game.apply(cmd));
        }
        assert_eq!(game, before);

        assert!(game.toggle_pause());
        assert_eq!(game.status(), GameStatus::Running);
        assert!(game.step());
    }

    #[test]
    fn test_try_move_down_never_commits() {
        let mut game = game_with(Board::new(15, 10), FallingPiece::new(PieceKind::O, 13, 4));
        assert!(!game.try_move_down());
        assert_eq!(game.pieces_placed(), 0);
        assert_eq!(game.board().occupied_count(), 0);
    }

    #[test]
    fn test_resize_respawns_piece_that_no_longer_fits() {
        let mut game = game_with(Board::new(15, 10), FallingPiece::new(PieceKind::O, 5, 8));
        game.resize(15, 8);
        assert_eq!(game.cols(), 8);
        assert!(game.falling().fits(game.board()));
        assert_eq!(game.falling().min_row(), 0);
        assert_eq!(game.falling().col, 3);
    }

    #[test]
    fn test_resize_keeps_fitting_piece() {
        let mut game = game_with(Board::new(15, 10), FallingPiece::new(PieceKind::O, 5, 2));
        let before = *game.falling();
        game.resize(20, 12);
        assert_eq!(*game.falling(), before);
        assert_eq!(game.rows(), 20);
    }

    #[test]
    fn test_snapshot_matches_state() {
        let mut game = Game::new(8);
        game.hard_drop();
        let snap = game.snapshot();
        assert_eq!(snap.rows, game.rows());
        assert_eq!(snap.board, game.board().cells());
        assert_eq!(snap.falling.cells, game.falling().cells());
        assert_eq!(snap.shadow, game.shadow());
        assert_eq!(snap.score, game.score());
        assert_eq!(snap.seed, 8);
    }

    #[test]
    fn test_occupancy_overlays_falling_piece() {
        let game = game_with(Board::from_rows(&[
            "..........",
            "..........",
            "..........",
            "..........",
            "J.........",
        ]), FallingPiece::new(PieceKind::O, 0, 4));
        let occ = game.occupancy();
        assert_eq!(occ.len(), 50);
        assert_eq!(occ.iter().filter(|&&v| v == 1).count(), 5);
        assert_eq!(occ[4], 1);
        assert_eq!(occ[15], 1);
        assert_eq!(occ[40], 1);
    }
}
