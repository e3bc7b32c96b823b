//! TCP server for remote controllers
//!
//! Every connection may drive the one shared game. Messages are handled one at
//! a time under the game lock, so commands from different clients interleave
//! only at message boundaries. Each connection gets an observation on connect
//! and after every message that reached the game.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, PoisonError};

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::{mpsc, oneshot, Mutex};
use tokio::task::JoinHandle;

use auto_tetris_core::{Game, GameConfig};

use crate::protocol::*;
use crate::record::GameRecord;

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 7777,
        }
    }
}

impl ServerConfig {
    /// Create from environment variables
    ///
    /// - `AUTO_TETRIS_HOST` (default 127.0.0.1)
    /// - `AUTO_TETRIS_PORT` (default 7777; 0 picks a free port)
    pub fn from_env() -> Self {
        use std::env;

        let defaults = Self::default();
        let host = env::var("AUTO_TETRIS_HOST")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or(defaults.host);
        let port = env::var("AUTO_TETRIS_PORT")
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.port);

        Self { host, port }
    }

    pub fn socket_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid listen address {}:{}", self.host, self.port))
    }
}

/// The shared game and the commands that reached it
struct Shared {
    game: Game,
    record: GameRecord,
}

type SharedState = Arc<Mutex<Shared>>;

/// Connection tasks, stopped together on shutdown
#[derive(Default)]
struct Clients {
    closed: AtomicBool,
    tasks: std::sync::Mutex<Vec<JoinHandle<()>>>,
}

impl Clients {
    fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    /// Keep a new connection task, or abort it if the server already closed
    fn track(&self, task: JoinHandle<()>) {
        let mut tasks = self.tasks.lock().unwrap_or_else(PoisonError::into_inner);
        if self.is_closed() {
            task.abort();
            return;
        }
        tasks.retain(|t| !t.is_finished());
        tasks.push(task);
    }

    fn close(&self) {
        let mut tasks = self.tasks.lock().unwrap_or_else(PoisonError::into_inner);
        self.closed.store(true, Ordering::SeqCst);
        for task in tasks.drain(..) {
            task.abort();
        }
    }
}

/// Running server
pub struct ServerHandle {
    addr: SocketAddr,
    state: SharedState,
    clients: Arc<Clients>,
    task: JoinHandle<Result<()>>,
}

impl ServerHandle {
    pub fn local_addr(&self) -> SocketAddr {
        self.addr
    }

    /// Commands applied to the shared game so far
    pub async fn record(&self) -> GameRecord {
        self.state.lock().await.record.clone()
    }

    /// Copy of the shared game
    pub async fn game(&self) -> Game {
        self.state.lock().await.game.clone()
    }

    /// Stop accepting connections and drop every connected client
    ///
    /// A message already being applied finishes; none start after this
    /// returns, so the record read afterwards is final.
    pub fn shutdown(&self) {
        self.task.abort();
        self.clients.close();
    }

    /// Wait for the accept loop; it only ends on an I/O error or shutdown
    pub async fn join(self) -> Result<()> {
        match self.task.await {
            Ok(result) => result,
            Err(e) if e.is_cancelled() => Ok(()),
            Err(e) => Err(e).context("server task failed"),
        }
    }
}

/// Bind the listener and start accepting clients in the background
pub async fn start_server(config: ServerConfig, game_config: GameConfig) -> Result<ServerHandle> {
    let addr = config.socket_addr()?;
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    let bound = listener.local_addr()?;
    println!("[Server] TCP server listening on {}", bound);

    let state = Arc::new(Mutex::new(Shared {
        game: Game::with_config(&game_config),
        record: GameRecord::new(&game_config),
    }));

    let clients = Arc::new(Clients::default());
    let task = tokio::spawn(accept_loop(listener, Arc::clone(&state), Arc::clone(&clients)));

    Ok(ServerHandle {
        addr: bound,
        state,
        clients,
        task,
    })
}

/// Start the server and run it until the accept loop fails
pub async fn run_server(
    config: ServerConfig,
    game_config: GameConfig,
    ready_tx: Option<oneshot::Sender<SocketAddr>>,
) -> Result<()> {
    let handle = start_server(config, game_config).await?;
    if let Some(tx) = ready_tx {
        let _ = tx.send(handle.local_addr());
    }
    handle.join().await
}

async fn accept_loop(listener: TcpListener, state: SharedState, clients: Arc<Clients>) -> Result<()> {
    let mut client_id_counter = 0usize;

    loop {
        let (socket, addr) = listener.accept().await?;
        client_id_counter += 1;
        let client_id = client_id_counter;

        println!("[Server] Client {} connected from {}", client_id, addr);

        let state = Arc::clone(&state);
        let task_clients = Arc::clone(&clients);
        let task = tokio::spawn(async move {
            if let Err(e) = handle_client(socket, state, task_clients).await {
                eprintln!("[Server] Client {} error: {}", client_id, e);
            }
            println!("[Server] Client {} disconnected", client_id);
        });
        clients.track(task);
    }
}

#[derive(Debug, Clone)]
enum ClientOutbound {
    Observation(ObservationMessage),
    Ack(AckMessage),
    Error(ErrorMessage),
}

/// Handle a single client connection
async fn handle_client(socket: TcpStream, state: SharedState, clients: Arc<Clients>) -> Result<()> {
    let (reader, mut writer) = tokio::io::split(socket);
    let mut reader = BufReader::new(reader);

    let (tx, mut rx) = mpsc::unbounded_channel::<ClientOutbound>();

    let write_task = tokio::spawn(async move {
        let mut buf: Vec<u8> = Vec::with_capacity(4096);
        while let Some(msg) = rx.recv().await {
            buf.clear();
            let encoded = match &msg {
                ClientOutbound::Observation(obs) => serde_json::to_writer(&mut buf, obs),
                ClientOutbound::Ack(ack) => serde_json::to_writer(&mut buf, ack),
                ClientOutbound::Error(err) => serde_json::to_writer(&mut buf, err),
            };
            if encoded.is_err() {
                continue;
            }
            buf.push(b'\n');
            if writer.write_all(&buf).await.is_err() {
                break;
            }
            if writer.flush().await.is_err() {
                break;
            }
        }
    });

    {
        let shared = state.lock().await;
        let _ = tx.send(ClientOutbound::Observation(build_observation(&shared.game, 0)));
    }

    let mut line = String::new();
    let mut last_seq: Option<u64> = None;

    loop {
        line.clear();
        let bytes_read = reader.read_line(&mut line).await?;
        if bytes_read == 0 {
            break;
        }

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let msg = match parse_message(trimmed) {
            Ok(msg) => msg,
            Err(e) => {
                let error = create_error(
                    extract_seq_best_effort(trimmed).unwrap_or(0),
                    ErrorCode::InvalidMessage,
                    &e.to_string(),
                );
                let _ = tx.send(ClientOutbound::Error(error));
                continue;
            }
        };

        let seq = msg.seq();
        if last_seq.is_some_and(|prev| seq <= prev) {
            let error = create_error(seq, ErrorCode::InvalidSeq, "seq must be strictly increasing");
            let _ = tx.send(ClientOutbound::Error(error));
            continue;
        }
        last_seq = Some(seq);

        let mut shared = state.lock().await;
        if clients.is_closed() {
            break;
        }
        for reply in handle_message(&mut shared, msg) {
            let _ = tx.send(reply);
        }
    }

    drop(tx);
    let _ = write_task.await;
    Ok(())
}

/// `seq` of a line that failed to parse as a message, if it has one
fn extract_seq_best_effort(line: &str) -> Option<u64> {
    let value: serde_json::Value = serde_json::from_str(line).ok()?;
    value.get("seq")?.as_u64()
}

/// Apply one message to the shared game; returns the replies in send order
fn handle_message(shared: &mut Shared, msg: ClientMessage) -> Vec<ClientOutbound> {
    let seq = msg.seq();
    if shared.game.game_over() {
        let error = create_error(seq, ErrorCode::GameOver, "game is over");
        return vec![ClientOutbound::Error(error)];
    }

    let applied = match msg {
        ClientMessage::Command { commands, .. } => {
            let mut applied = Vec::with_capacity(commands.0.len());
            for &command in &commands.0 {
                // Only commands that reach a running game are recorded.
                let running = !shared.game.paused() && !shared.game.game_over();
                if running {
                    shared.record.push(command);
                }
                applied.push(shared.game.apply(command));
            }
            applied
        }
        ClientMessage::Pause { .. } => vec![shared.game.toggle_pause()],
    };

    vec![
        ClientOutbound::Ack(create_ack(seq, applied)),
        ClientOutbound::Observation(build_observation(&shared.game, seq)),
    ]
}
