//! Cleanup helpers for level restarts and full resets.

use hecs::{Entity, World};

use astrodefense_core::components::{Defender, Hostile, Projectile};

/// Remove every hostile and projectile.
pub fn clear_field(world: &mut World, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();

    for (entity, _hostile) in world.query_mut::<&Hostile>() {
        despawn_buffer.push(entity);
    }
    for (entity, _projectile) in world.query_mut::<&Projectile>() {
        despawn_buffer.push(entity);
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}

/// Remove every defender.
pub fn clear_defenders(world: &mut World, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();

    for (entity, _defender) in world.query_mut::<&Defender>() {
        despawn_buffer.push(entity);
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
