//! Game loop thread: runs the simulation engine at 60 Hz and emits snapshots.
//!
//! The engine is created inside this thread because it's cleaner for ownership.
//! Commands arrive via `mpsc` channel. Snapshots go to the caller's emitter
//! and are stored in shared state for synchronous polling.

use std::io;
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use log::{debug, info};

use astrodefense_core::constants::TICK_RATE;
use astrodefense_core::state::GameStateSnapshot;
use astrodefense_sim::{SimConfig, SimulationEngine};

use crate::state::GameLoopCommand;

/// Nominal duration of one frame.
pub const TICK_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TICK_RATE as u64);

/// Receives every snapshot the loop produces.
pub type SnapshotEmitter = Box<dyn FnMut(&GameStateSnapshot) + Send>;

/// Spawns the game loop in a new thread.
///
/// The loop stops after `max_ticks` ticks when given, on `Shutdown`, or when
/// every sender is dropped. Returns the command sender and the thread handle.
pub fn spawn_game_loop(
    config: SimConfig,
    max_ticks: Option<u64>,
    latest_snapshot: Arc<Mutex<Option<GameStateSnapshot>>>,
    emit: SnapshotEmitter,
) -> io::Result<(mpsc::Sender<GameLoopCommand>, JoinHandle<()>)> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();

    let handle = std::thread::Builder::new()
        .name("astrodefense-game-loop".into())
        .spawn(move || {
            run_game_loop(config, max_ticks, cmd_rx, &latest_snapshot, emit);
        })?;

    Ok((cmd_tx, handle))
}

/// The game loop. Runs until Shutdown, channel disconnect or the tick budget.
fn run_game_loop(
    config: SimConfig,
    max_ticks: Option<u64>,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    latest_snapshot: &Mutex<Option<GameStateSnapshot>>,
    mut emit: SnapshotEmitter,
) {
    let mut engine = SimulationEngine::new(config);
    let mut next_tick_time = Instant::now();
    let mut ticks = 0u64;
    info!("game loop started");

    loop {
        // 1. Drain all pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(GameLoopCommand::PlayerCommand(cmd)) => {
                    engine.queue_command(cmd);
                }
                Ok(GameLoopCommand::Shutdown) | Err(mpsc::TryRecvError::Disconnected) => {
                    info!("game loop stopped after {} ticks", ticks);
                    return;
                }
                Err(mpsc::TryRecvError::Empty) => break,
            }
        }

        // 2. Advance one frame (engine handles pause semantics internally)
        let snapshot = engine.tick();
        ticks += 1;

        // 3. Hand the snapshot to the renderer / HUD
        emit(&snapshot);

        // 4. Store latest snapshot for synchronous polling
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot);
        }

        if max_ticks.is_some_and(|max| ticks >= max) {
            info!("game loop finished its {} tick budget", ticks);
            return;
        }

        // 5. Sleep until the next frame
        next_tick_time += TICK_DURATION;
        let now = Instant::now();
        if next_tick_time > now {
            std::thread::sleep(next_tick_time - now);
        } else if now - next_tick_time > TICK_DURATION * 2 {
            // Too far behind: reset to avoid catch-up spiral
            debug!("game loop fell behind, resetting frame clock");
            next_tick_time = now;
        }
    }
}
