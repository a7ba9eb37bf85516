//! Core types and definitions for the ASTRODEFENSE simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! catalogs, components, commands, state snapshots, events, and constants.
//! It has no dependency on any runtime, renderer, or ECS framework.

pub mod catalog;
pub mod commands;
pub mod components;
pub mod constants;
pub mod enums;
pub mod events;
pub mod state;
pub mod types;
