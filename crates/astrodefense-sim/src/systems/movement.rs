//! Hostile movement and leak detection.
//!
//! Integrates hostile positions from velocity and removes hostiles that
//! crossed the defended boundary. Leaks clear a hostile for wave accounting
//! but award no score.

use hecs::{Entity, World};
use log::debug;

use astrodefense_core::components::Hostile;
use astrodefense_core::events::GameEvent;
use astrodefense_core::types::{Position, Velocity};
use astrodefense_waves::WaveController;

use crate::config::Field;

/// Move every hostile by `velocity * delta` and remove the ones that leaked.
pub fn run(
    world: &mut World,
    delta: f64,
    field: &Field,
    controller: &mut WaveController,
    events: &mut Vec<GameEvent>,
    despawn_buffer: &mut Vec<Entity>,
) {
    despawn_buffer.clear();

    for (entity, (pos, vel, hostile)) in world.query_mut::<(&mut Position, &Velocity, &Hostile)>() {
        pos.advance(vel, delta);
        if field.has_leaked(pos) {
            despawn_buffer.push(entity);
            controller.record_leak();
            debug!("{} leaked", hostile.kind.stats().name);
            events.push(GameEvent::HostileLeaked { kind: hostile.kind });
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
