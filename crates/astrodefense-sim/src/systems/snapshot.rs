//! Snapshot system: queries the ECS world and builds a complete GameStateSnapshot.
//!
//! This system is read-only: it never modifies the world.

use hecs::World;

use astrodefense_core::components::*;
use astrodefense_core::events::GameEvent;
use astrodefense_core::state::*;
use astrodefense_core::types::{Position, SimTime, Velocity};
use astrodefense_waves::WaveController;

use crate::systems::targeting;

/// Build a complete GameStateSnapshot from the current world state.
pub fn build_snapshot(
    world: &World,
    time: &SimTime,
    controller: &WaveController,
    paused: bool,
    events: Vec<GameEvent>,
) -> GameStateSnapshot {
    GameStateSnapshot {
        time: *time,
        state: controller.phase(),
        paused,
        level: controller.level(),
        wave: controller.wave(),
        score: controller.score(),
        level_score: controller.level_score(),
        target_score: controller.target_score(),
        alive_hostiles: controller.alive(),
        killed_this_wave: controller.killed_this_wave(),
        spawned_this_wave: controller.spawned_this_wave(),
        pending_transition: controller.pending(),
        defenders: build_defenders(world, time.elapsed_ms),
        hostiles: build_hostiles(world),
        projectiles: build_projectiles(world),
        events,
    }
}

fn build_defenders(world: &World, now_ms: f64) -> Vec<DefenderView> {
    let mut defenders: Vec<DefenderView> = world
        .query::<(&Position, &Defender)>()
        .iter()
        .map(|(_, (pos, defender))| DefenderView {
            id: defender.id,
            position: *pos,
            facing_angle: defender.facing_angle,
            aim_angle: defender.aim_angle,
            weapon: defender.weapon,
            health: defender.health,
            ready: targeting::ready_to_fire(
                defender.last_fired_at_ms,
                now_ms,
                defender.weapon.stats(),
            ),
        })
        .collect();

    defenders.sort_by_key(|d| d.id);
    defenders
}

fn build_hostiles(world: &World) -> Vec<HostileView> {
    let mut hostiles: Vec<(u64, HostileView)> = world
        .query::<(&Position, &Hostile)>()
        .iter()
        .map(|(_, (pos, hostile))| {
            debug_assert!(hostile.health > 0.0, "dead hostile left in the world");
            (
                hostile.serial,
                HostileView {
                    serial: hostile.serial,
                    kind: hostile.kind,
                    position: *pos,
                    health: hostile.health,
                    max_health: hostile.kind.stats().base_health,
                },
            )
        })
        .collect();

    hostiles.sort_by_key(|(serial, _)| *serial);
    hostiles.into_iter().map(|(_, view)| view).collect()
}

fn build_projectiles(world: &World) -> Vec<ProjectileView> {
    let mut projectiles: Vec<(u64, ProjectileView)> = world
        .query::<(&Position, &Velocity, &Projectile)>()
        .iter()
        .map(|(_, (pos, vel, projectile))| {
            debug_assert!(
                projectile.distance_traveled <= projectile.weapon.stats().range,
                "projectile outlived its range"
            );
            (
                projectile.serial,
                ProjectileView {
                    position: *pos,
                    velocity: *vel,
                    weapon: projectile.weapon,
                    distance_traveled: projectile.distance_traveled,
                },
            )
        })
        .collect();

    projectiles.sort_by_key(|(serial, _)| *serial);
    projectiles.into_iter().map(|(_, view)| view).collect()
}
