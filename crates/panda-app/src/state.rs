//! Driver state shared between the host thread and the game loop thread.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use anyhow::{anyhow, Result};

use panda_core::commands::SessionCommand;
use panda_core::input::InputSnapshot;
use panda_core::state::SceneSnapshot;
use panda_sim::SimConfig;

use crate::game_loop::{self, LoopOptions, LoopReport};

/// Commands sent from the host to the game loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// A session command to forward to the simulation engine.
    Session(SessionCommand),
    /// Replace the held input applied on every following frame.
    Input(InputSnapshot),
    /// Shut down the game loop thread gracefully.
    Shutdown,
}

/// Handle to a running game loop.
///
/// The latest snapshot lives behind `Arc<Mutex<..>>` so the host can poll it
/// without waiting on the loop.
pub struct AppState {
    command_tx: Mutex<Option<mpsc::Sender<GameLoopCommand>>>,
    handle: Mutex<Option<JoinHandle<LoopReport>>>,
    pub latest_snapshot: Arc<Mutex<Option<SceneSnapshot>>>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            command_tx: Mutex::new(None),
            handle: Mutex::new(None),
            latest_snapshot: Arc::new(Mutex::new(None)),
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.command_tx
            .lock()
            .map(|tx| tx.is_some())
            .unwrap_or(false)
    }

    /// Spawn the game loop thread. Fails if one is already running.
    pub fn start(&self, config: SimConfig, options: LoopOptions) -> Result<()> {
        let mut tx_lock = self.command_tx.lock().map_err(|e| anyhow!(e.to_string()))?;
        if tx_lock.is_some() {
            return Err(anyhow!("game loop already running"));
        }

        let (cmd_tx, handle) =
            game_loop::spawn_game_loop(config, options, self.latest_snapshot.clone())?;
        *tx_lock = Some(cmd_tx);
        *self.handle.lock().map_err(|e| anyhow!(e.to_string()))? = Some(handle);
        Ok(())
    }

    /// Forward a command to the loop.
    pub fn send(&self, command: GameLoopCommand) -> Result<()> {
        let tx_lock = self.command_tx.lock().map_err(|e| anyhow!(e.to_string()))?;
        let tx = tx_lock
            .as_ref()
            .ok_or_else(|| anyhow!("game loop not running"))?;
        tx.send(command)
            .map_err(|_| anyhow!("game loop has exited"))
    }

    /// Most recent snapshot published by the loop, if any.
    pub fn snapshot(&self) -> Option<SceneSnapshot> {
        self.latest_snapshot
            .lock()
            .ok()
            .and_then(|lock| lock.clone())
    }

    /// Ask the loop to stop and wait for it.
    pub fn stop(&self) -> Result<LoopReport> {
        let tx = self
            .command_tx
            .lock()
            .map_err(|e| anyhow!(e.to_string()))?
            .take()
            .ok_or_else(|| anyhow!("game loop not running"))?;
        // The loop may already have exited; joining below still collects its report.
        let _ = tx.send(GameLoopCommand::Shutdown);

        let handle = self
            .handle
            .lock()
            .map_err(|e| anyhow!(e.to_string()))?
            .take()
            .ok_or_else(|| anyhow!("game loop handle missing"))?;
        handle
            .join()
            .map_err(|_| anyhow!("game loop thread panicked"))
    }
}
