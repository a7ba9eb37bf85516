//! Player commands sent from the input layer to the simulation.
//!
//! Commands are queued and processed at the next tick boundary. Commands
//! that arrive while input is locked are ignored, not reported as errors.

use serde::{Deserialize, Serialize};

use crate::types::Position;

/// All possible player actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    // --- Defender placement ---
    /// Move a defender. Rejected while a wave is active and unpaused.
    PlaceDefender { id: u32, position: Position },
    /// Set a defender's facing angle (radians). Same lock as placement.
    RotateDefender { id: u32, angle: f64 },

    // --- Simulation control ---
    /// Flip the pause flag.
    TogglePause,
    /// Start (or fully restart) the game at level 1.
    StartGame,
    /// Clear the field and replay the current level from wave 1.
    RestartLevel,
}
