//! Simulation engine: the core of the game.
//!
//! `SimulationEngine` owns the hecs ECS world, processes player commands,
//! runs all systems, and produces `GameStateSnapshot`s. Completely headless,
//! enabling deterministic testing.

use std::collections::VecDeque;

use hecs::World;
use log::debug;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use astrodefense_core::commands::PlayerCommand;
use astrodefense_core::components::{Defender, Hostile};
use astrodefense_core::enums::GamePhase;
use astrodefense_core::events::GameEvent;
use astrodefense_core::state::GameStateSnapshot;
use astrodefense_core::types::{Position, SimTime};
use astrodefense_waves::{ControllerConfig, ControllerStep, WaveController, WaveOrder};

use crate::config::{Field, SimConfig};
use crate::systems;
use crate::systems::targeting::FireEvent;
use crate::world_setup;

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    world: World,
    time: SimTime,
    paused: bool,
    rng: ChaCha8Rng,
    config: SimConfig,
    field: Field,
    controller: WaveController,
    command_queue: VecDeque<PlayerCommand>,
    despawn_buffer: Vec<hecs::Entity>,
    events: Vec<GameEvent>,
    fire_buffer: Vec<FireEvent>,
    next_serial: u64,
}

impl SimulationEngine {
    /// Create a new engine in `Idle` with the configured loadout placed.
    pub fn new(config: SimConfig) -> Self {
        let mut world = World::new();
        world_setup::spawn_loadout(&mut world, &config.loadout);

        let controller = WaveController::new(ControllerConfig {
            max_level: config.max_level,
            transition_delay_ms: config.transition_delay_ms,
        });

        Self {
            world,
            time: SimTime::default(),
            paused: false,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            field: config.field(),
            config,
            controller,
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            events: Vec::new(),
            fire_buffer: Vec::new(),
            next_serial: 0,
        }
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by one nominal frame and return the resulting snapshot.
    pub fn tick(&mut self) -> GameStateSnapshot {
        self.advance(1.0)
    }

    /// Advance the simulation by `delta` frames (1.0 = one 60 Hz frame).
    ///
    /// Queued commands are always applied. Systems and time only move while a
    /// game is running and not paused.
    pub fn advance(&mut self, delta: f64) -> GameStateSnapshot {
        let delta = if delta.is_finite() { delta.max(0.0) } else { 0.0 };

        self.process_commands();

        if self.controller.phase().is_running() && !self.paused {
            self.run_systems(delta);
            self.time.advance(delta);
        }

        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(
            &self.world,
            &self.time,
            &self.controller,
            self.paused,
            events,
        )
    }

    /// Build a snapshot without advancing or draining pending events.
    pub fn snapshot(&self) -> GameStateSnapshot {
        systems::snapshot::build_snapshot(
            &self.world,
            &self.time,
            &self.controller,
            self.paused,
            Vec::new(),
        )
    }

    /// Get the current game phase.
    pub fn phase(&self) -> GamePhase {
        self.controller.phase()
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn controller(&self) -> &WaveController {
        &self.controller
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Mutable world access for tests that stage entity positions directly.
    #[cfg(test)]
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Whether defender placement and rotation are currently refused.
    pub fn input_locked(&self) -> bool {
        self.controller.phase() == GamePhase::WaveActive && !self.paused
    }

    /// Move a defender, clamped into the placement area. Returns whether the
    /// command was applied.
    pub fn place_defender(&mut self, id: u32, position: Position) -> bool {
        if self.input_locked() {
            debug!("place defender {} rejected: input locked", id);
            return false;
        }
        if !(position.x.is_finite() && position.y.is_finite()) {
            debug!("place defender {} rejected: non-finite position", id);
            return false;
        }

        let clamped = self.field.clamp_placement(position);
        for (_entity, (pos, defender)) in self.world.query_mut::<(&mut Position, &Defender)>() {
            if defender.id == id {
                *pos = clamped;
                return true;
            }
        }
        debug!("place defender {} rejected: no such defender", id);
        false
    }

    /// Set a defender's facing. The weapon snaps to the new facing.
    pub fn rotate_defender(&mut self, id: u32, angle: f64) -> bool {
        if self.input_locked() {
            debug!("rotate defender {} rejected: input locked", id);
            return false;
        }
        if !angle.is_finite() {
            debug!("rotate defender {} rejected: non-finite angle", id);
            return false;
        }

        for (_entity, defender) in self.world.query_mut::<&mut Defender>() {
            if defender.id == id {
                defender.facing_angle = angle;
                defender.aim_angle = angle;
                return true;
            }
        }
        debug!("rotate defender {} rejected: no such defender", id);
        false
    }

    /// Flip the pause flag. Touches nothing else.
    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
        debug!("paused: {}", self.paused);
    }

    /// Start a new game at level 1.
    ///
    /// From `Idle` the player's placement is kept; from any other state the
    /// field, the loadout and the clock are reset.
    pub fn start_game(&mut self) {
        if self.controller.phase() == GamePhase::Idle {
            for (_entity, defender) in self.world.query_mut::<&mut Defender>() {
                defender.last_fired_at_ms = None;
                defender.aim_angle = defender.facing_angle;
            }
        } else {
            systems::cleanup::clear_field(&mut self.world, &mut self.despawn_buffer);
            systems::cleanup::clear_defenders(&mut self.world, &mut self.despawn_buffer);
            world_setup::spawn_loadout(&mut self.world, &self.config.loadout);
            self.time = SimTime::default();
        }

        self.paused = false;
        let order = self.controller.start_game(&mut self.events);
        self.spawn_wave(order);
    }

    /// Replay the current level from wave 1. Ignored once the game has ended.
    pub fn restart_level(&mut self) {
        match self.controller.restart_level(&mut self.events) {
            Some(order) => {
                systems::cleanup::clear_field(&mut self.world, &mut self.despawn_buffer);
                self.paused = false;
                self.spawn_wave(order);
            }
            None => debug!("restart level ignored in {:?}", self.controller.phase()),
        }
    }

    /// External defeat signal. Nothing inside the engine raises it.
    pub fn signal_game_over(&mut self) {
        self.controller.force_game_over(&mut self.events);
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single player command.
    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::PlaceDefender { id, position } => {
                self.place_defender(id, position);
            }
            PlayerCommand::RotateDefender { id, angle } => {
                self.rotate_defender(id, angle);
            }
            PlayerCommand::TogglePause => self.toggle_pause(),
            PlayerCommand::StartGame => self.start_game(),
            PlayerCommand::RestartLevel => self.restart_level(),
        }
    }

    /// Run all systems in order.
    fn run_systems(&mut self, delta: f64) {
        let now_ms = self.time.elapsed_ms;

        // 1. Targeting: aim and decide who fires
        let hostiles = systems::spatial::collect_hostiles(&self.world);
        systems::targeting::run(&mut self.world, &hostiles, now_ms, &mut self.fire_buffer);

        // 2. Combat: spawn shots, move projectiles, resolve hits
        systems::combat::fire(
            &mut self.world,
            &self.fire_buffer,
            &mut self.next_serial,
            &mut self.events,
        );
        systems::combat::run(
            &mut self.world,
            delta,
            &mut self.controller,
            &mut self.events,
            &mut self.despawn_buffer,
        );

        // 3. Movement: walk hostiles and remove leaks
        systems::movement::run(
            &mut self.world,
            delta,
            &self.field,
            &mut self.controller,
            &mut self.events,
            &mut self.despawn_buffer,
        );

        debug_assert_eq!(
            self.world.query::<&Hostile>().iter().count() as u32,
            self.controller.alive(),
            "hostile count out of sync with wave accounting"
        );

        // 4. Waves: clear evaluation and due transitions
        match self.controller.update(now_ms, &mut self.events) {
            ControllerStep::Hold => {}
            ControllerStep::Spawn(order) => self.spawn_wave(order),
            ControllerStep::Restart(order) => {
                systems::cleanup::clear_field(&mut self.world, &mut self.despawn_buffer);
                self.spawn_wave(order);
            }
        }
    }

    fn spawn_wave(&mut self, order: WaveOrder) {
        debug!(
            "spawning {} hostiles for level {} wave {}",
            order.size, order.level, order.wave
        );
        systems::wave_spawner::spawn_wave(
            &mut self.world,
            &mut self.rng,
            &self.field,
            order.size,
            &mut self.next_serial,
        );
    }
}
