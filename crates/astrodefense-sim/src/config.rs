//! Engine configuration: field size, progression tunables, RNG seed and the
//! starting defender loadout. Loadable from JSON; every field has a default.

use std::fs;
use std::path::{Path, PathBuf};

use log::warn;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use astrodefense_core::catalog::{WeaponKind, DEFAULT_LOADOUT};
use astrodefense_core::constants::*;
use astrodefense_core::types::Position;

/// Errors raised while loading or validating a [`SimConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// One defender of the starting loadout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadoutSlot {
    pub weapon: WeaponKind,
    pub position: Position,
    #[serde(default)]
    pub facing_angle: f64,
}

/// Configuration for starting a new simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed + same commands = same simulation.
    pub seed: u64,
    pub field_width: f64,
    pub field_height: f64,
    /// Clearing this level wins the game.
    pub max_level: u32,
    /// Delay between a level verdict and the next spawn (simulation ms).
    pub transition_delay_ms: f64,
    pub loadout: Vec<LoadoutSlot>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,
            max_level: MAX_LEVEL,
            transition_delay_ms: TRANSITION_DELAY_MS,
            loadout: default_loadout(),
        }
    }
}

/// Rifle, plasma, flamethrower and rail gun stacked at the left edge, facing the spawn edge.
pub fn default_loadout() -> Vec<LoadoutSlot> {
    DEFAULT_LOADOUT
        .iter()
        .zip(LOADOUT_POSITIONS)
        .map(|(&weapon, (x, y))| LoadoutSlot {
            weapon,
            position: Position::new(x, y),
            facing_angle: 0.0,
        })
        .collect()
}

impl SimConfig {
    /// Parse a JSON config. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Reject configurations the simulation cannot run.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.field_width.is_finite() && self.field_height.is_finite()) {
            return Err(ConfigError::Invalid("field size must be finite".into()));
        }
        if self.field_width <= PLACEMENT_MIN_X + PLACEMENT_EDGE_MARGIN {
            return Err(ConfigError::Invalid(format!(
                "field_width {} leaves no placement area",
                self.field_width
            )));
        }
        if self.field_height <= 2.0 * SPAWN_Y_MARGIN {
            return Err(ConfigError::Invalid(format!(
                "field_height {} leaves no spawn edge",
                self.field_height
            )));
        }
        if self.max_level == 0 {
            return Err(ConfigError::Invalid("max_level must be at least 1".into()));
        }
        if !self.transition_delay_ms.is_finite() || self.transition_delay_ms < 0.0 {
            return Err(ConfigError::Invalid(
                "transition_delay_ms must be a non-negative number".into(),
            ));
        }
        if self.loadout.is_empty() {
            warn!("empty loadout: no defenders will be placed");
        }
        Ok(())
    }

    pub fn field(&self) -> Field {
        Field {
            width: self.field_width,
            height: self.field_height,
        }
    }
}

/// Play field geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Field {
    pub width: f64,
    pub height: f64,
}

impl Field {
    /// x-coordinate of the spawn edge.
    pub fn spawn_x(&self) -> f64 {
        self.width + SPAWN_EDGE_OFFSET
    }

    /// Inclusive y-range along the spawn edge.
    pub fn spawn_y_range(&self) -> (f64, f64) {
        let lo = SPAWN_Y_MARGIN;
        let hi = (self.height - SPAWN_Y_MARGIN).max(lo);
        (lo, hi)
    }

    /// Whether a hostile at `position` has crossed the defended boundary.
    pub fn has_leaked(&self, position: &Position) -> bool {
        position.x < DEFENDED_BOUNDARY_X
    }

    /// Clamp a requested defender position into the placement area.
    pub fn clamp_placement(&self, position: Position) -> Position {
        let max_x = (self.width - PLACEMENT_EDGE_MARGIN).max(PLACEMENT_MIN_X);
        let max_y = (self.height - PLACEMENT_EDGE_MARGIN).max(PLACEMENT_EDGE_MARGIN);
        Position::new(
            position.x.clamp(PLACEMENT_MIN_X, max_x),
            position.y.clamp(PLACEMENT_EDGE_MARGIN, max_y),
        )
    }
}
