//! Static weapon and hostile catalogs.
//!
//! Entries are immutable and shared by every entity of that kind. Entities
//! store the `Copy` kind and resolve it here, so a dangling catalog
//! reference cannot exist.

use serde::{Deserialize, Serialize};

use crate::constants::COLLISION_RADIUS_SCALE;

/// Weapon identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum WeaponKind {
    Pistol,
    Rifle,
    Plasma,
    Flamethrower,
    Railgun,
}

/// Hostile type identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum HostileKind {
    Runner,
    Tank,
    Sprinter,
}

/// Weapon stats.
#[derive(Debug, Clone, PartialEq)]
pub struct Weapon {
    pub name: &'static str,
    pub damage: f64,
    /// Maximum engagement and projectile travel distance.
    pub range: f64,
    /// Shots per second.
    pub fire_rate: f64,
    /// Half-angle of the firing cone around the defender's facing.
    pub firing_arc_degrees: f64,
    /// Cosmetic only.
    pub color: u32,
}

/// Hostile type stats.
#[derive(Debug, Clone, PartialEq)]
pub struct HostileType {
    pub name: &'static str,
    pub base_health: f64,
    /// Units per frame toward the defended edge.
    pub speed: f64,
    /// Incoming damage multiplier in (0, 1]; lower is tougher.
    pub armor: f64,
    pub point_value: u32,
    pub collision_radius: f64,
    /// Cosmetic only.
    pub color: u32,
}

static PISTOL: Weapon = Weapon {
    name: "Pistol",
    damage: 25.0,
    range: 30.0,
    fire_rate: 1.0,
    firing_arc_degrees: 5.0,
    color: 0x666666,
};

static RIFLE: Weapon = Weapon {
    name: "Rifle",
    damage: 40.0,
    range: 50.0,
    fire_rate: 2.0,
    firing_arc_degrees: 10.0,
    color: 0x444444,
};

static PLASMA: Weapon = Weapon {
    name: "Plasma Gun",
    damage: 60.0,
    range: 40.0,
    fire_rate: 1.5,
    firing_arc_degrees: 15.0,
    color: 0x00ff00,
};

static FLAMETHROWER: Weapon = Weapon {
    name: "Flamethrower",
    damage: 80.0,
    range: 20.0,
    fire_rate: 3.0,
    firing_arc_degrees: 30.0,
    color: 0xff4400,
};

static RAILGUN: Weapon = Weapon {
    name: "Rail Gun",
    damage: 100.0,
    range: 60.0,
    fire_rate: 0.5,
    firing_arc_degrees: 5.0,
    color: 0x0066ff,
};

static RUNNER: HostileType = HostileType {
    name: "Runner",
    base_health: 50.0,
    speed: 2.0,
    armor: 0.8,
    point_value: 100,
    collision_radius: 0.4 * COLLISION_RADIUS_SCALE,
    color: 0xff0000,
};

static TANK: HostileType = HostileType {
    name: "Tank",
    base_health: 200.0,
    speed: 0.5,
    armor: 0.4,
    point_value: 300,
    collision_radius: 0.8 * COLLISION_RADIUS_SCALE,
    color: 0x880000,
};

static SPRINTER: HostileType = HostileType {
    name: "Sprinter",
    base_health: 30.0,
    speed: 3.0,
    armor: 0.9,
    point_value: 150,
    collision_radius: 0.3 * COLLISION_RADIUS_SCALE,
    color: 0xff6600,
};

/// Weapons handed out at game start, in defender creation order.
pub const DEFAULT_LOADOUT: [WeaponKind; 4] = [
    WeaponKind::Rifle,
    WeaponKind::Plasma,
    WeaponKind::Flamethrower,
    WeaponKind::Railgun,
];

impl WeaponKind {
    pub const ALL: [WeaponKind; 5] = [
        WeaponKind::Pistol,
        WeaponKind::Rifle,
        WeaponKind::Plasma,
        WeaponKind::Flamethrower,
        WeaponKind::Railgun,
    ];

    pub fn stats(self) -> &'static Weapon {
        match self {
            WeaponKind::Pistol => &PISTOL,
            WeaponKind::Rifle => &RIFLE,
            WeaponKind::Plasma => &PLASMA,
            WeaponKind::Flamethrower => &FLAMETHROWER,
            WeaponKind::Railgun => &RAILGUN,
        }
    }
}

impl HostileKind {
    /// Catalog order. Random spawns draw uniformly from this list.
    pub const ALL: [HostileKind; 3] = [HostileKind::Runner, HostileKind::Tank, HostileKind::Sprinter];

    pub fn stats(self) -> &'static HostileType {
        match self {
            HostileKind::Runner => &RUNNER,
            HostileKind::Tank => &TANK,
            HostileKind::Sprinter => &SPRINTER,
        }
    }
}

impl Weapon {
    /// Minimum time between shots in milliseconds.
    pub fn cooldown_ms(&self) -> f64 {
        1000.0 / self.fire_rate
    }

    pub fn firing_arc_radians(&self) -> f64 {
        self.firing_arc_degrees.to_radians()
    }
}

/// Highest point value over all hostile types.
pub fn max_point_value() -> u32 {
    HostileKind::ALL
        .iter()
        .map(|kind| kind.stats().point_value)
        .max()
        .unwrap_or(0)
}
