//! Wave and level progression for ASTRODEFENSE.
//!
//! Implements the wave/level controller state machine and the sizing and
//! scoring formulas it is built on.

pub mod controller;
pub mod formulas;

pub use astrodefense_core as core;
pub use controller::{ControllerConfig, ControllerStep, WaveController, WaveOrder};
