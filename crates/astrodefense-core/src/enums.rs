//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Wave/level controller state (top-level game phase).
///
/// Pause is orthogonal and tracked separately by the engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GamePhase {
    /// Before the first `StartGame`.
    #[default]
    Idle,
    /// Hostiles of the current wave are on the field.
    WaveActive,
    /// All hostiles of the wave are gone; the verdict is being evaluated.
    WaveClearPendingEval,
    /// Between levels, waiting on a scheduled transition.
    LevelTransition,
    /// Ended by an external defeat signal.
    GameOver,
    /// Every level cleared.
    GameWon,
}

impl GamePhase {
    /// Whether the game is in progress (neither idle nor finished).
    pub fn is_running(self) -> bool {
        matches!(
            self,
            GamePhase::WaveActive | GamePhase::WaveClearPendingEval | GamePhase::LevelTransition
        )
    }

    pub fn is_finished(self) -> bool {
        matches!(self, GamePhase::GameOver | GamePhase::GameWon)
    }
}

/// What a scheduled transition does when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransitionKind {
    /// Level cleared: spawn wave 1 of the (already incremented) level.
    AdvanceLevel,
    /// Score target missed: clear the field and replay the level.
    RetryLevel,
}
