//! Simulation engine for ASTRODEFENSE.
//!
//! Owns the hecs ECS world, runs systems once per rendered frame,
//! and produces GameStateSnapshots for the renderer and HUD.

pub mod config;
pub mod engine;
pub mod systems;
pub mod world_setup;

pub use astrodefense_core as core;
pub use config::{ConfigError, SimConfig};
pub use engine::SimulationEngine;

#[cfg(test)]
mod tests;
