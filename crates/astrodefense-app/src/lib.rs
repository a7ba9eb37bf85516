//! ASTRODEFENSE application shell.
//!
//! This crate wires the simulation engine into a realtime game-loop thread,
//! translates pointer input into player commands, and hosts the headless
//! runner used by the `astrodefense` binary.

pub mod control;
pub mod game_loop;
pub mod input;
pub mod logging;
pub mod runner;
pub mod state;

pub use astrodefense_core as core;
