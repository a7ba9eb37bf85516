//! ECS components for hecs entities.
//!
//! Components are plain data structs with no methods.
//! Game logic lives in systems, not components.

use serde::{Deserialize, Serialize};

use crate::catalog::{HostileKind, WeaponKind};

/// A stationary, auto-firing defender ("astronaut").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Defender {
    /// Stable id in creation order; also the input-layer handle.
    pub id: u32,
    /// Player-set orientation (radians). Centre of the firing arc.
    pub facing_angle: f64,
    /// Current weapon orientation (radians); lags `facing_angle` while tracking.
    pub aim_angle: f64,
    pub weapon: WeaponKind,
    /// 0..=100. Not drained by anything in the core.
    pub health: f64,
    /// Simulation time of the last shot, `None` if never fired.
    pub last_fired_at_ms: Option<f64>,
}

/// A hostile unit ("alien") walking toward the defended edge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hostile {
    pub kind: HostileKind,
    /// Always > 0 while the entity exists.
    pub health: f64,
    /// Monotonic spawn counter; defines stable iteration order.
    pub serial: u64,
}

/// A fire-and-forget projectile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub weapon: WeaponKind,
    /// Id of the defender that fired it.
    pub source: u32,
    /// Accumulated path length; never exceeds the weapon range while alive.
    pub distance_traveled: f64,
    /// Monotonic spawn counter; defines stable iteration order.
    pub serial: u64,
}
