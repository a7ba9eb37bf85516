//! Control surface for a running game loop.
//!
//! Bridges callers (a renderer shell, the CLI) to the game loop thread via
//! the channel stored in [`AppState`].

use thiserror::Error;

use astrodefense_core::commands::PlayerCommand;
use astrodefense_core::state::GameStateSnapshot;
use astrodefense_sim::SimConfig;

use crate::game_loop::{self, SnapshotEmitter};
use crate::state::{AppState, GameLoopCommand};

/// Failures of the game-loop control surface.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("simulation already running")]
    AlreadyRunning,
    #[error("simulation not started")]
    NotStarted,
    #[error("game loop has stopped")]
    LoopStopped,
    #[error("game loop panicked")]
    LoopPanicked,
    #[error("shared state lock poisoned")]
    LockPoisoned,
    #[error("failed to spawn game loop thread: {0}")]
    Spawn(#[from] std::io::Error),
}

/// Start the simulation. Spawns the game loop thread if not already running.
pub fn start_simulation(
    state: &AppState,
    config: SimConfig,
    max_ticks: Option<u64>,
    emit: SnapshotEmitter,
) -> Result<(), AppError> {
    let mut tx_lock = state.command_tx.lock().map_err(|_| AppError::LockPoisoned)?;
    if tx_lock.is_some() {
        return Err(AppError::AlreadyRunning);
    }

    let (cmd_tx, handle) =
        game_loop::spawn_game_loop(config, max_ticks, state.latest_snapshot.clone(), emit)?;

    *tx_lock = Some(cmd_tx);
    *state.loop_handle.lock().map_err(|_| AppError::LockPoisoned)? = Some(handle);
    Ok(())
}

/// Send a player command to the simulation.
pub fn send_command(state: &AppState, command: PlayerCommand) -> Result<(), AppError> {
    let tx_lock = state.command_tx.lock().map_err(|_| AppError::LockPoisoned)?;

    match tx_lock.as_ref() {
        Some(tx) => tx
            .send(GameLoopCommand::PlayerCommand(command))
            .map_err(|_| AppError::LoopStopped),
        None => Err(AppError::NotStarted),
    }
}

/// Get the latest snapshot synchronously (for polling / initial state).
pub fn get_snapshot(state: &AppState) -> Result<Option<GameStateSnapshot>, AppError> {
    let lock = state.latest_snapshot.lock().map_err(|_| AppError::LockPoisoned)?;
    Ok(lock.clone())
}

/// Wait for the game loop to finish on its own (tick budget reached).
pub fn wait(state: &AppState) -> Result<(), AppError> {
    let handle = state
        .loop_handle
        .lock()
        .map_err(|_| AppError::LockPoisoned)?
        .take()
        .ok_or(AppError::NotStarted)?;
    handle.join().map_err(|_| AppError::LoopPanicked)?;
    state
        .command_tx
        .lock()
        .map_err(|_| AppError::LockPoisoned)?
        .take();
    Ok(())
}

/// Stop the game loop and wait for its thread to exit.
pub fn shutdown(state: &AppState) -> Result<(), AppError> {
    if let Some(tx) = state
        .command_tx
        .lock()
        .map_err(|_| AppError::LockPoisoned)?
        .as_ref()
    {
        // A loop that already stopped has dropped its receiver.
        let _ = tx.send(GameLoopCommand::Shutdown);
    }
    wait(state)
}
