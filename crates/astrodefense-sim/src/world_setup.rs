//! Entity spawn factories for setting up the simulation world.
//!
//! Creates defender, hostile and projectile entities with
//! appropriate component bundles.

use hecs::World;

use astrodefense_core::catalog::HostileKind;
use astrodefense_core::components::{Defender, Hostile, Projectile};
use astrodefense_core::constants::{DEFENDER_MAX_HEALTH, PROJECTILE_SPEED};
use astrodefense_core::types::{Position, Velocity};

use crate::config::LoadoutSlot;
use crate::systems::targeting::FireEvent;

/// Spawn one defender per loadout slot, ids in slot order.
pub fn spawn_loadout(world: &mut World, loadout: &[LoadoutSlot]) {
    for (id, slot) in loadout.iter().enumerate() {
        spawn_defender(world, id as u32, slot);
    }
}

/// Spawn a defender that has never fired, aimed along its facing.
pub fn spawn_defender(world: &mut World, id: u32, slot: &LoadoutSlot) -> hecs::Entity {
    world.spawn((
        slot.position,
        Defender {
            id,
            facing_angle: slot.facing_angle,
            aim_angle: slot.facing_angle,
            weapon: slot.weapon,
            health: DEFENDER_MAX_HEALTH,
            last_fired_at_ms: None,
        },
    ))
}

/// Spawn a full-health hostile walking toward the defended edge.
pub fn spawn_hostile(
    world: &mut World,
    kind: HostileKind,
    position: Position,
    serial: u64,
) -> hecs::Entity {
    let stats = kind.stats();
    world.spawn((
        position,
        Velocity::new(-stats.speed, 0.0),
        Hostile {
            kind,
            health: stats.base_health,
            serial,
        },
    ))
}

/// Spawn a projectile at the shooter, flying toward the target's position at fire time.
pub fn spawn_projectile(world: &mut World, fire: &FireEvent, serial: u64) -> hecs::Entity {
    world.spawn((
        fire.origin,
        Velocity::toward(&fire.origin, &fire.target, PROJECTILE_SPEED),
        Projectile {
            weapon: fire.weapon,
            source: fire.defender,
            distance_traveled: 0.0,
            serial,
        },
    ))
}
