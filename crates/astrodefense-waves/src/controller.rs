//! Wave/level controller finite state machine.
//!
//! Plain data, no ECS dependency. The engine feeds it kill/leak accounting and
//! the simulation clock; the controller answers with spawn orders. Delayed
//! transitions are stored as `ScheduledTransition` records so they can be
//! inspected and fired deterministically.

use log::info;

use astrodefense_core::catalog::max_point_value;
use astrodefense_core::constants::{MAX_LEVEL, TRANSITION_DELAY_MS, WAVES_PER_LEVEL};
use astrodefense_core::enums::{GamePhase, TransitionKind};
use astrodefense_core::events::GameEvent;
use astrodefense_core::state::ScheduledTransition;

use crate::formulas::{target_score, wave_size};

/// Tunables for the controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControllerConfig {
    pub max_level: u32,
    pub transition_delay_ms: f64,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            max_level: MAX_LEVEL,
            transition_delay_ms: TRANSITION_DELAY_MS,
        }
    }
}

/// Instruction to spawn a wave.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaveOrder {
    pub level: u32,
    pub wave: u32,
    pub size: u32,
}

/// Result of one controller update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerStep {
    /// Nothing for the engine to do.
    Hold,
    /// Spawn the ordered wave.
    Spawn(WaveOrder),
    /// Clear hostiles and projectiles, then spawn the ordered wave.
    Restart(WaveOrder),
}

/// The wave/level state machine.
#[derive(Debug, Clone)]
pub struct WaveController {
    config: ControllerConfig,
    phase: GamePhase,
    level: u32,
    wave: u32,
    score: u32,
    level_score: u32,
    target_score: u32,
    alive: u32,
    killed_this_wave: u32,
    spawned_this_wave: u32,
    pending: Option<ScheduledTransition>,
}

impl Default for WaveController {
    fn default() -> Self {
        Self::new(ControllerConfig::default())
    }
}

impl WaveController {
    pub fn new(config: ControllerConfig) -> Self {
        Self {
            config,
            phase: GamePhase::Idle,
            level: 1,
            wave: 0,
            score: 0,
            level_score: 0,
            target_score: 0,
            alive: 0,
            killed_this_wave: 0,
            spawned_this_wave: 0,
            pending: None,
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn wave(&self) -> u32 {
        self.wave
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level_score(&self) -> u32 {
        self.level_score
    }

    pub fn target_score(&self) -> u32 {
        self.target_score
    }

    pub fn alive(&self) -> u32 {
        self.alive
    }

    pub fn killed_this_wave(&self) -> u32 {
        self.killed_this_wave
    }

    pub fn spawned_this_wave(&self) -> u32 {
        self.spawned_this_wave
    }

    pub fn pending(&self) -> Option<ScheduledTransition> {
        self.pending
    }

    /// Reset to level 1 with zero score and order wave 1.
    pub fn start_game(&mut self, events: &mut Vec<GameEvent>) -> WaveOrder {
        self.level = 1;
        self.score = 0;
        info!("game started");
        self.begin_level(events)
    }

    /// Replay the current level from wave 1. Ignored once the game is over.
    pub fn restart_level(&mut self, events: &mut Vec<GameEvent>) -> Option<WaveOrder> {
        if self.phase.is_finished() {
            return None;
        }
        info!("restarting level {}", self.level);
        Some(self.begin_level(events))
    }

    /// External defeat signal. No rule inside the controller raises this.
    pub fn force_game_over(&mut self, events: &mut Vec<GameEvent>) {
        if self.phase == GamePhase::GameOver {
            return;
        }
        self.pending = None;
        self.set_phase(GamePhase::GameOver, events);
        events.push(GameEvent::Announcement {
            text: "You didn't survive".into(),
        });
    }

    /// A hostile was destroyed by fire.
    pub fn record_kill(&mut self, points: u32) {
        debug_assert!(self.alive > 0, "kill recorded with no live hostiles");
        self.alive = self.alive.saturating_sub(1);
        self.killed_this_wave += 1;
        self.score += points;
        self.level_score += points;
    }

    /// A hostile crossed the defended boundary. Clears like a kill, no score.
    pub fn record_leak(&mut self) {
        debug_assert!(self.alive > 0, "leak recorded with no live hostiles");
        self.alive = self.alive.saturating_sub(1);
        self.killed_this_wave += 1;
    }

    /// Advance the state machine at simulation time `now_ms`.
    pub fn update(&mut self, now_ms: f64, events: &mut Vec<GameEvent>) -> ControllerStep {
        match self.phase {
            GamePhase::WaveActive if self.alive == 0 => {
                self.set_phase(GamePhase::WaveClearPendingEval, events);
                self.evaluate_cleared_wave(now_ms, events)
            }
            GamePhase::WaveClearPendingEval => self.evaluate_cleared_wave(now_ms, events),
            GamePhase::LevelTransition => self.fire_due_transition(now_ms, events),
            _ => ControllerStep::Hold,
        }
    }

    fn evaluate_cleared_wave(&mut self, now_ms: f64, events: &mut Vec<GameEvent>) -> ControllerStep {
        if self.wave < WAVES_PER_LEVEL {
            return ControllerStep::Spawn(self.spawn_next_wave(events));
        }

        self.set_phase(GamePhase::LevelTransition, events);

        if self.score >= self.target_score {
            info!(
                "level {} cleared with {}/{}",
                self.level, self.score, self.target_score
            );
            events.push(GameEvent::LevelCleared { level: self.level });

            if self.level >= self.config.max_level {
                self.set_phase(GamePhase::GameWon, events);
                info!("game won with final score {}", self.score);
                events.push(GameEvent::GameWon {
                    final_score: self.score,
                });
                events.push(GameEvent::Announcement {
                    text: format!("Game Complete!\nFinal Score: {}", self.score),
                });
                return ControllerStep::Hold;
            }

            self.level += 1;
            self.wave = 0;
            events.push(GameEvent::Announcement {
                text: format!("Level {}", self.level),
            });
            self.schedule(TransitionKind::AdvanceLevel, now_ms);
        } else {
            info!(
                "level {} failed with {}/{}",
                self.level, self.score, self.target_score
            );
            events.push(GameEvent::LevelFailed { level: self.level });
            events.push(GameEvent::Announcement {
                text: "Failed to meet score target!\nTry again!".into(),
            });
            self.schedule(TransitionKind::RetryLevel, now_ms);
        }

        ControllerStep::Hold
    }

    fn fire_due_transition(&mut self, now_ms: f64, events: &mut Vec<GameEvent>) -> ControllerStep {
        let due = match self.pending {
            Some(pending) if now_ms >= pending.scheduled_at_ms => pending,
            _ => return ControllerStep::Hold,
        };

        match due.kind {
            TransitionKind::AdvanceLevel => ControllerStep::Spawn(self.begin_level(events)),
            TransitionKind::RetryLevel => ControllerStep::Restart(self.begin_level(events)),
        }
    }

    fn schedule(&mut self, kind: TransitionKind, now_ms: f64) {
        self.pending = Some(ScheduledTransition {
            kind,
            scheduled_at_ms: now_ms + self.config.transition_delay_ms,
        });
    }

    /// Start the current level from wave 1.
    fn begin_level(&mut self, events: &mut Vec<GameEvent>) -> WaveOrder {
        self.pending = None;
        self.wave = 0;
        self.level_score = 0;
        self.spawn_next_wave(events)
    }

    fn spawn_next_wave(&mut self, events: &mut Vec<GameEvent>) -> WaveOrder {
        self.wave += 1;
        let size = wave_size(self.level, self.wave);
        self.target_score = target_score(size, max_point_value());
        self.alive = size;
        self.spawned_this_wave = size;
        self.killed_this_wave = 0;
        self.set_phase(GamePhase::WaveActive, events);

        info!(
            "level {} wave {}: {} hostiles, target {}",
            self.level, self.wave, size, self.target_score
        );
        events.push(GameEvent::WaveStarted {
            level: self.level,
            wave: self.wave,
            size,
            target_score: self.target_score,
        });
        events.push(GameEvent::Announcement {
            text: format!("Wave {}", self.wave),
        });

        WaveOrder {
            level: self.level,
            wave: self.wave,
            size,
        }
    }

    fn set_phase(&mut self, to: GamePhase, events: &mut Vec<GameEvent>) {
        if self.phase != to {
            events.push(GameEvent::PhaseChanged {
                from: self.phase,
                to,
            });
            self.phase = to;
        }
    }
}
