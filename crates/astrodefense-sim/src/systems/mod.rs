//! ECS systems that operate on the simulation world each tick.
//!
//! Systems are plain functions that take `&mut World` (or `&World` for read-only).
//! They do not own state; all state lives in components and the engine.

pub mod cleanup;
pub mod combat;
pub mod movement;
pub mod snapshot;
pub mod spatial;
pub mod targeting;
pub mod wave_spawner;
