//! Integration tests for the game state machine

use auto_tetris::core::{Board, Game, GameConfig, GameStatus};
use auto_tetris::types::{Command, PieceKind};

/// First seed at or after `from` whose opening piece is `kind`
fn seed_with_first_piece(kind: PieceKind, from: u32) -> u32 {
    (from..from + 10_000)
        .find(|&seed| Game::new(seed).falling().kind == kind)
        .expect("no seed opens with the requested piece")
}

#[test]
fn test_new_game_state() {
    let game = Game::new(12345);
    assert_eq!(game.status(), GameStatus::Running);
    assert_eq!(game.score(), 0);
    assert_eq!(game.pieces_placed(), 0);
    assert_eq!(game.board().occupied_count(), 0);

    let cells = game.falling().cells();
    assert_eq!(cells.iter().map(|&(r, _)| r).min(), Some(0));
    assert!(game.board().fits(&cells));
}

#[test]
fn test_fresh_narrow_games_start_running() {
    for cols in [4, 5] {
        for seed in 1..2000 {
            let game = Game::with_config(&GameConfig::new(4, cols, seed));
            assert!(!game.game_over(), "{cols} columns, seed {seed}");
            assert!(game.board().fits(&game.falling().cells()), "{cols} columns, seed {seed}");
        }
    }
}

#[test]
fn test_o_piece_hard_drop_lands_on_floor() {
    let seed = seed_with_first_piece(PieceKind::O, 1);
    let mut game = Game::new(seed);

    assert!(game.apply(Command::HardDrop));
    assert_eq!(game.pieces_placed(), 1);
    assert_eq!(game.score(), 0);

    let board = game.board();
    assert_eq!(board.occupied_count(), 4);
    for (row, col) in [(13, 4), (13, 5), (14, 4), (14, 5)] {
        assert_eq!(board.cell_at(row, col), Some(PieceKind::O.rep()));
    }
}

#[test]
fn test_hard_drop_finishes_within_rows_steps() {
    let mut game = Game::new(77);
    let mut moved = 0;
    while game.step() {
        moved += 1;
    }
    assert!(moved < game.rows() as usize);
    assert_eq!(game.pieces_placed(), 1);
}

#[test]
fn test_hard_drop_matches_shadow() {
    let mut game = Game::new(2024);
    let shadow = game.shadow();
    let kind = game.falling().kind;
    game.apply(Command::HardDrop);
    for (row, col) in shadow {
        assert_eq!(game.board().cell_at(row, col), Some(kind.rep()));
    }
}

#[test]
fn test_completing_bottom_row_scores_40() {
    let seed = 1;
    let shadow = Game::new(seed).shadow();

    // Bottom row full except where the first piece will land
    let mut board = Board::new(15, 10);
    for col in 0..10 {
        if !shadow.contains(&(14, col)) {
            board.set(14, col, PieceKind::Z.rep());
        }
    }
    let mut game = Game::from_board(board, seed);
    assert_eq!(game.shadow(), shadow);

    game.apply(Command::HardDrop);
    assert_eq!(game.score(), 40);
    assert_eq!(game.lines(), 1);

    let in_bottom = shadow.iter().filter(|&&(r, _)| r == 14).count();
    assert_eq!(game.board().occupied_count(), 4 - in_bottom);

    let placement = game.take_last_placement().unwrap();
    assert_eq!(placement.rows_cleared, 1);
    assert_eq!(placement.points, 40);
    assert!(game.take_last_placement().is_none());
}

#[test]
fn test_boxed_in_piece_cannot_move_or_rotate() {
    let seed = seed_with_first_piece(PieceKind::T, 1);
    let falling = *Game::new(seed).falling();

    // Everything occupied except the piece itself
    let mut board = Board::new(15, 10);
    for row in 0..15 {
        for col in 0..10 {
            if !falling.cells().contains(&(row, col)) {
                board.set(row, col, PieceKind::S.rep());
            }
        }
    }
    let mut game = Game::from_board(board, seed);
    assert_eq!(game.status(), GameStatus::Running);

    for command in [
        Command::MoveLeft,
        Command::MoveRight,
        Command::Rotate { clockwise: true },
        Command::Rotate { clockwise: false },
    ] {
        assert!(!game.apply(command), "{command:?} should fail");
        assert_eq!(*game.falling(), falling);
    }

    // Committing fills every row; all fifteen go at once and score like four
    assert!(!game.step());
    assert_eq!(game.lines(), 15);
    assert_eq!(game.score(), 1200);
    assert_eq!(game.board().occupied_count(), 0);
    assert_eq!(game.status(), GameStatus::Running);
}

#[test]
fn test_wall_blocks_further_moves() {
    let mut game = Game::new(9);
    while game.apply(Command::MoveLeft) {}
    let before = *game.falling();
    assert!(!game.apply(Command::MoveLeft));
    assert_eq!(*game.falling(), before);
    assert_eq!(before.cells().iter().map(|&(_, c)| c).min(), Some(0));
}

#[test]
fn test_same_seed_same_commands_same_game() {
    let commands = [
        Command::MoveLeft,
        Command::Rotate { clockwise: true },
        Command::NoOp,
        Command::HardDrop,
        Command::MoveRight,
        Command::MoveRight,
        Command::MoveDown,
        Command::HardDrop,
        Command::Rotate { clockwise: false },
        Command::HardDrop,
    ];

    let mut a = Game::new(555);
    let mut b = Game::new(555);
    for command in commands.iter().cycle().take(300) {
        assert_eq!(a.apply(*command), b.apply(*command));
        assert_eq!(a.snapshot(), b.snapshot());
    }
    assert_eq!(a.snapshot(), b.snapshot());
    assert_eq!(a.score(), b.score());
}

#[test]
fn test_stacking_in_the_middle_ends_the_game() {
    let mut game = Game::with_config(&GameConfig::new(10, 8, 3));
    let mut drops = 0;
    while !game.game_over() {
        assert!(game.apply(Command::HardDrop));
        drops += 1;
        assert!(drops < 100, "game never ended");
    }
    assert_eq!(game.status(), GameStatus::GameOver);

    let snapshot = game.snapshot();
    assert!(!game.apply(Command::HardDrop));
    assert!(!game.toggle_pause());
    assert_eq!(game.snapshot(), snapshot);
}

#[test]
fn test_pause_freezes_the_game() {
    let mut game = Game::new(4);
    assert!(game.toggle_pause());
    assert_eq!(game.status(), GameStatus::Paused);

    let snapshot = game.snapshot();
    for command in Command::ALL {
        assert!(!game.apply(command));
    }
    assert_eq!(game.snapshot(), snapshot);

    assert!(game.toggle_pause());
    assert_eq!(game.status(), GameStatus::Running);
    assert!(game.apply(Command::HardDrop));
}

#[test]
fn test_occupancy_overlays_falling_piece() {
    let mut game = Game::new(31);
    game.apply(Command::HardDrop);
    let occupancy = game.occupancy();
    assert_eq!(occupancy.len(), 150);
    assert_eq!(occupancy.iter().filter(|&&v| v == 1).count(), 8);
    assert!(occupancy.iter().all(|&v| v <= 1));
    for (row, col) in game.falling().cells() {
        assert_eq!(occupancy[row as usize * 10 + col as usize], 1);
    }
}

#[test]
fn test_resize_keeps_game_playable() {
    let mut game = Game::new(8);
    game.apply(Command::HardDrop);
    game.resize(20, 12);
    assert_eq!((game.rows(), game.cols()), (20, 12));
    assert_eq!(game.board().occupied_count(), 4);
    assert!(game.board().fits(&game.falling().cells()));
}
