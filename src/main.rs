//! auto-tetris command-line runner.
//!
//! Plays games with a random controller, replays recorded games, or serves the
//! shared game to remote controllers over TCP.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

use auto_tetris::adapter::{start_server, GameRecord, RandomController, ServerConfig, Session};
use auto_tetris::core::GameConfig;

#[derive(Debug, Parser)]
#[command(name = "auto-tetris")]
#[command(about = "Deterministic falling-block engine with automated controllers")]
struct Cli {
    /// Board rows (default: AUTO_TETRIS_ROWS or 15)
    #[arg(long, global = true)]
    rows: Option<u16>,
    /// Board columns (default: AUTO_TETRIS_COLS or 10)
    #[arg(long, global = true)]
    cols: Option<u16>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Play with a random controller
    Random {
        #[arg(long)]
        seed: Option<u32>,
        #[arg(long)]
        max_moves: Option<usize>,
        /// Retry with the next seed until a game scores
        #[arg(long, default_value_t = false)]
        until_score: bool,
        #[arg(long, default_value_t = 1000)]
        max_attempts: u32,
        /// Save the record of the last game played
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Replay a recorded game and print its final state
    Replay { file: PathBuf },
    /// Serve the game to remote controllers (AUTO_TETRIS_HOST/AUTO_TETRIS_PORT)
    Serve {
        #[arg(long)]
        seed: Option<u32>,
        /// Save the record on shutdown
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = GameConfig::from_env();
    if let Some(rows) = cli.rows {
        config.rows = rows;
    }
    if let Some(cols) = cli.cols {
        config.cols = cols;
    }
    let config = config.clamped();

    match cli.command {
        Commands::Random {
            seed,
            max_moves,
            until_score,
            max_attempts,
            out,
        } => cmd_random(
            config.with_seed(seed.unwrap_or(config.seed)),
            max_moves,
            until_score,
            max_attempts,
            out,
        ),
        Commands::Replay { file } => cmd_replay(&file),
        Commands::Serve { seed, out } => {
            cmd_serve(config.with_seed(seed.unwrap_or(config.seed)), out).await
        }
    }
}

/// Controller seed derived from the game seed so the two draw sequences differ
fn controller_seed(game_seed: u32) -> u32 {
    game_seed.rotate_left(16) ^ 0x9e37_79b9
}

fn cmd_random(
    config: GameConfig,
    max_moves: Option<usize>,
    until_score: bool,
    max_attempts: u32,
    out: Option<PathBuf>,
) -> Result<()> {
    let attempts = if until_score { max_attempts.max(1) } else { 1 };

    for attempt in 0..attempts {
        let config = config.with_seed(config.seed.wrapping_add(attempt));
        let controller = RandomController::new(controller_seed(config.seed));
        let mut session = Session::new(controller, &config, true);
        let moves = session.play(max_moves);

        println!(
            "[Record] seed {} moves {} score {}{}",
            config.seed,
            moves,
            session.score(),
            if session.game_over() { " (game over)" } else { "" }
        );

        if until_score && session.score() == 0 && attempt + 1 < attempts {
            continue;
        }

        print!("{}", session.game().snapshot());
        if let Some(path) = out.as_ref() {
            let record = session
                .record()
                .context("session was created without recording")?;
            record.save(path)?;
            println!("[Record] saved {} moves to {}", record.moves.len(), path.display());
        }
        if until_score && session.score() == 0 {
            bail!("no scoring game in {} attempts", attempts);
        }
        return Ok(());
    }

    Ok(())
}

fn cmd_replay(file: &Path) -> Result<()> {
    let record = GameRecord::load(file)?;
    let mut session = Session::replay(&record);
    let applied = session.replay_to_end();

    print!("{}", session.game().snapshot());
    println!(
        "[Replay] seed {} applied {}/{} moves, score {}",
        record.seed,
        applied,
        record.moves.len(),
        session.score()
    );
    Ok(())
}

async fn cmd_serve(config: GameConfig, out: Option<PathBuf>) -> Result<()> {
    let handle = start_server(ServerConfig::from_env(), config).await?;
    println!("[Server] seed {} board {}x{}", config.seed, config.rows, config.cols);

    tokio::signal::ctrl_c()
        .await
        .context("failed to listen for ctrl-c")?;
    println!("[Server] Shutting down");
    handle.shutdown();

    if let Some(path) = out {
        let record = handle.record().await;
        record.save(&path)?;
        println!("[Record] saved {} moves to {}", record.moves.len(), path.display());
    }
    Ok(())
}
