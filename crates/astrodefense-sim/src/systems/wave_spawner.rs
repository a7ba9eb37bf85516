//! Wave spawning system: places a whole wave on the spawn edge at once.

use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use astrodefense_core::catalog::HostileKind;
use astrodefense_core::types::Position;

use crate::config::Field;
use crate::world_setup;

/// Spawn `count` hostiles of uniformly random type at random heights along
/// the spawn edge.
pub fn spawn_wave(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    field: &Field,
    count: u32,
    next_serial: &mut u64,
) {
    let (y_min, y_max) = field.spawn_y_range();

    for _ in 0..count {
        let kind = HostileKind::ALL[rng.gen_range(0..HostileKind::ALL.len())];
        let y = if y_max > y_min {
            rng.gen_range(y_min..=y_max)
        } else {
            y_min
        };
        world_setup::spawn_hostile(world, kind, Position::new(field.spawn_x(), y), *next_serial);
        *next_serial += 1;
    }
}
