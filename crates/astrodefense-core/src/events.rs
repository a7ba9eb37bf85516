//! Events emitted by the simulation for audio, announcements and HUD feedback.

use serde::{Deserialize, Serialize};

use crate::catalog::{HostileKind, WeaponKind};
use crate::enums::GamePhase;

/// Something that happened during a tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    /// A wave was spawned.
    WaveStarted {
        level: u32,
        wave: u32,
        size: u32,
        target_score: u32,
    },
    /// A defender fired.
    ProjectileFired { defender: u32, weapon: WeaponKind },
    /// A projectile struck a hostile (armor already applied to `damage`).
    HostileHit { kind: HostileKind, damage: f64 },
    /// A hostile was destroyed by fire.
    HostileKilled { kind: HostileKind, points: u32 },
    /// A hostile crossed the defended boundary.
    HostileLeaked { kind: HostileKind },
    /// The controller changed state.
    PhaseChanged { from: GamePhase, to: GamePhase },
    /// The last wave of a level met its score target.
    LevelCleared { level: u32 },
    /// The last wave of a level missed its score target.
    LevelFailed { level: u32 },
    /// Every level cleared.
    GameWon { final_score: u32 },
    /// Banner text for the HUD.
    Announcement { text: String },
}
