//! Game state snapshot: the complete visible state handed to the renderer and
//! HUD after each tick.

use serde::{Deserialize, Serialize};

use crate::catalog::{HostileKind, WeaponKind};
use crate::enums::{GamePhase, TransitionKind};
use crate::events::GameEvent;
use crate::types::{Position, SimTime, Velocity};

/// A transition armed for a future simulation time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScheduledTransition {
    pub kind: TransitionKind,
    /// Simulation time (ms) at or after which the transition fires.
    pub scheduled_at_ms: f64,
}

/// Complete game state broadcast after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub state: GamePhase,
    pub paused: bool,
    pub level: u32,
    /// 0 before the first wave of a level, then 1..=3.
    pub wave: u32,
    pub score: u32,
    /// Score earned in the current level attempt.
    pub level_score: u32,
    pub target_score: u32,
    pub alive_hostiles: u32,
    pub killed_this_wave: u32,
    pub spawned_this_wave: u32,
    pub pending_transition: Option<ScheduledTransition>,
    pub defenders: Vec<DefenderView>,
    pub hostiles: Vec<HostileView>,
    pub projectiles: Vec<ProjectileView>,
    pub events: Vec<GameEvent>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefenderView {
    pub id: u32,
    pub position: Position,
    pub facing_angle: f64,
    pub aim_angle: f64,
    pub weapon: WeaponKind,
    pub health: f64,
    /// Off cooldown at snapshot time.
    pub ready: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostileView {
    pub serial: u64,
    pub kind: HostileKind,
    pub position: Position,
    pub health: f64,
    pub max_health: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectileView {
    pub position: Position,
    pub velocity: Velocity,
    pub weapon: WeaponKind,
    pub distance_traveled: f64,
}
