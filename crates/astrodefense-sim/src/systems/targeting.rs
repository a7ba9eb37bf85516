//! Targeting system: picks an engagement target for each defender, sweeps the
//! weapon toward it, and emits fire events for defenders off cooldown.

use hecs::World;
use log::trace;

use astrodefense_core::catalog::{Weapon, WeaponKind};
use astrodefense_core::components::Defender;
use astrodefense_core::constants::AIM_SMOOTHING;
use astrodefense_core::types::{angle_between, Position};

use crate::systems::spatial::{self, HostileSample, InRange};

/// A defender firing at a hostile this tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FireEvent {
    pub defender: u32,
    pub weapon: WeaponKind,
    pub origin: Position,
    /// Target position at fire time; the projectile is not re-homed.
    pub target: Position,
}

/// Run targeting for every defender in id order. `out` is cleared first.
pub fn run(world: &mut World, hostiles: &[HostileSample], now_ms: f64, out: &mut Vec<FireEvent>) {
    out.clear();

    let mut defenders: Vec<(&Position, &mut Defender)> = world
        .query_mut::<(&Position, &mut Defender)>()
        .into_iter()
        .map(|(_, (position, defender))| (position, defender))
        .collect();
    defenders.sort_by_key(|(_, defender)| defender.id);

    for (position, defender) in defenders {
        let weapon = defender.weapon.stats();
        let target = match select_target(position, defender.facing_angle, weapon, hostiles) {
            Some(t) => t,
            None => continue,
        };

        defender.aim_angle = next_aim_angle(
            defender.facing_angle,
            defender.aim_angle,
            target.bearing,
            weapon.firing_arc_radians(),
        );

        if ready_to_fire(defender.last_fired_at_ms, now_ms, weapon) {
            defender.last_fired_at_ms = Some(now_ms);
            trace!(
                "defender {} fires at ({:.1}, {:.1}) from {:.1}",
                defender.id,
                target.position.x,
                target.position.y,
                target.distance
            );
            out.push(FireEvent {
                defender: defender.id,
                weapon: defender.weapon,
                origin: *position,
                target: target.position,
            });
        }
    }
}

/// Nearest hostile within range and inside the firing arc around `facing`.
/// Ties keep the earliest-spawned hostile.
pub fn select_target(
    origin: &Position,
    facing: f64,
    weapon: &Weapon,
    hostiles: &[HostileSample],
) -> Option<InRange> {
    let arc = weapon.firing_arc_radians();
    spatial::in_range(origin, weapon.range, hostiles)
        .into_iter()
        .filter(|c| angle_between(facing, c.bearing).abs() <= arc)
        .min_by(|a, b| a.distance.total_cmp(&b.distance))
}

/// Move `aim` a fixed fraction toward `bearing`, with the goal clamped to
/// `facing ± arc`.
pub fn next_aim_angle(facing: f64, aim: f64, bearing: f64, arc: f64) -> f64 {
    let goal = facing + angle_between(facing, bearing).clamp(-arc, arc);
    aim + angle_between(aim, goal) * AIM_SMOOTHING
}

/// A weapon that never fired is ready; otherwise its cooldown must have elapsed.
pub fn ready_to_fire(last_fired_at_ms: Option<f64>, now_ms: f64, weapon: &Weapon) -> bool {
    match last_fired_at_ms {
        None => true,
        Some(last) => now_ms - last >= weapon.cooldown_ms(),
    }
}
