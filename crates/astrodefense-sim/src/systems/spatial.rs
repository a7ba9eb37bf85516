//! Spatial queries over the hostile set.
//!
//! Read-only. Hostiles are sampled once into a list sorted by spawn serial so
//! every consumer sees the same stable iteration order.

use hecs::{Entity, World};

use astrodefense_core::catalog::HostileKind;
use astrodefense_core::components::Hostile;
use astrodefense_core::types::Position;

/// A hostile as seen by targeting and collision.
#[derive(Debug, Clone, Copy)]
pub struct HostileSample {
    pub entity: Entity,
    pub serial: u64,
    pub kind: HostileKind,
    pub position: Position,
}

/// A hostile within range of some origin.
#[derive(Debug, Clone, Copy)]
pub struct InRange {
    pub entity: Entity,
    pub position: Position,
    pub distance: f64,
    /// Bearing from the origin (radians).
    pub bearing: f64,
}

/// All live hostiles in spawn order.
pub fn collect_hostiles(world: &World) -> Vec<HostileSample> {
    let mut hostiles: Vec<HostileSample> = world
        .query::<(&Position, &Hostile)>()
        .iter()
        .map(|(entity, (position, hostile))| HostileSample {
            entity,
            serial: hostile.serial,
            kind: hostile.kind,
            position: *position,
        })
        .collect();

    hostiles.sort_by_key(|h| h.serial);
    hostiles
}

/// Hostiles whose distance to `origin` is at most `range`, annotated with
/// distance and bearing, in spawn order.
pub fn in_range(origin: &Position, range: f64, hostiles: &[HostileSample]) -> Vec<InRange> {
    hostiles
        .iter()
        .filter_map(|h| {
            let distance = origin.range_to(&h.position);
            (distance <= range).then(|| InRange {
                entity: h.entity,
                position: h.position,
                distance,
                bearing: origin.bearing_to(&h.position),
            })
        })
        .collect()
}

/// Index of the first hostile (spawn order) whose collision radius strictly
/// contains `point`.
///
/// Sampled once per tick at the projectile's end position, with no swept test.
/// A shot closing faster than twice a hostile's radius per tick can step over
/// it: a rifle shot meeting a sprinter head-on closes 13 units against a
/// 6 unit radius.
pub fn first_colliding(point: &Position, hostiles: &[HostileSample]) -> Option<usize> {
    hostiles
        .iter()
        .position(|h| point.range_to(&h.position) < h.kind.stats().collision_radius)
}
