//! Combat system: spawns projectiles for fire events, advances them, and
//! resolves projectile/hostile collisions with armor-scaled damage.

use hecs::{Entity, World};
use log::debug;

use astrodefense_core::components::{Hostile, Projectile};
use astrodefense_core::events::GameEvent;
use astrodefense_core::types::{Position, Velocity};
use astrodefense_waves::WaveController;

use crate::systems::spatial;
use crate::systems::targeting::FireEvent;
use crate::world_setup;

/// Spawn one projectile per fire event.
pub fn fire(
    world: &mut World,
    fires: &[FireEvent],
    next_serial: &mut u64,
    events: &mut Vec<GameEvent>,
) {
    for fire in fires {
        world_setup::spawn_projectile(world, fire, *next_serial);
        *next_serial += 1;
        events.push(GameEvent::ProjectileFired {
            defender: fire.defender,
            weapon: fire.weapon,
        });
    }
}

/// Advance every projectile by `delta` frames, expire those past their
/// weapon range, and apply the first hit of each survivor.
pub fn run(
    world: &mut World,
    delta: f64,
    controller: &mut WaveController,
    events: &mut Vec<GameEvent>,
    despawn_buffer: &mut Vec<Entity>,
) {
    despawn_buffer.clear();

    let mut hostiles = spatial::collect_hostiles(world);

    let mut projectiles: Vec<(Entity, u64)> = world
        .query::<&Projectile>()
        .iter()
        .map(|(entity, projectile)| (entity, projectile.serial))
        .collect();
    projectiles.sort_by_key(|&(_, serial)| serial);

    for (entity, _) in projectiles {
        let (position, weapon) = match world
            .query_one_mut::<(&mut Position, &Velocity, &mut Projectile)>(entity)
        {
            Ok((position, velocity, projectile)) => {
                position.advance(velocity, delta);
                projectile.distance_traveled += velocity.speed() * delta;
                if projectile.distance_traveled > projectile.weapon.stats().range {
                    despawn_buffer.push(entity);
                    continue;
                }
                (*position, projectile.weapon)
            }
            Err(_) => continue,
        };

        let index = match spatial::first_colliding(&position, &hostiles) {
            Some(i) => i,
            None => continue,
        };

        // Single target, no penetration.
        despawn_buffer.push(entity);

        let target = hostiles[index];
        let stats = target.kind.stats();
        let damage = weapon.stats().damage * stats.armor;
        let killed = match world.get::<&mut Hostile>(target.entity) {
            Ok(mut hostile) => {
                hostile.health -= damage;
                hostile.health <= 0.0
            }
            Err(_) => continue,
        };
        events.push(GameEvent::HostileHit {
            kind: target.kind,
            damage,
        });

        if killed {
            let _ = world.despawn(target.entity);
            hostiles.remove(index);
            controller.record_kill(stats.point_value);
            debug!("{} destroyed for {} points", stats.name, stats.point_value);
            events.push(GameEvent::HostileKilled {
                kind: target.kind,
                points: stats.point_value,
            });
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
