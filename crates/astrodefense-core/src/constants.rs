//! Simulation constants and tuning parameters.

/// Nominal frame rate the simulation is tuned for (Hz).
pub const TICK_RATE: u32 = 60;

/// Milliseconds per nominal frame. A frame delta of 1.0 advances this much.
pub const FRAME_MS: f64 = 1000.0 / TICK_RATE as f64;

// --- Field ---

/// Default play field width in world units.
pub const FIELD_WIDTH: f64 = 1280.0;

/// Default play field height in world units.
pub const FIELD_HEIGHT: f64 = 720.0;

/// Hostiles spawn this far beyond the right edge.
pub const SPAWN_EDGE_OFFSET: f64 = 50.0;

/// Spawn y-positions keep this distance from the top and bottom edges.
pub const SPAWN_Y_MARGIN: f64 = 50.0;

/// Hostiles with x below this have crossed the defended boundary.
pub const DEFENDED_BOUNDARY_X: f64 = -50.0;

// --- Placement ---

/// Leftmost x a defender may be placed at (right of the ship).
pub const PLACEMENT_MIN_X: f64 = 200.0;

/// Placement keeps this distance from the right, top and bottom edges.
pub const PLACEMENT_EDGE_MARGIN: f64 = 20.0;

/// Pointer hit radius of a defender.
pub const DEFENDER_RADIUS: f64 = 20.0;

/// Health every defender starts with.
pub const DEFENDER_MAX_HEALTH: f64 = 100.0;

// --- Combat ---

/// Projectile speed (units per frame).
pub const PROJECTILE_SPEED: f64 = 10.0;

/// Fraction of the remaining aim error corrected per tick.
pub const AIM_SMOOTHING: f64 = 0.1;

/// Hostile collision radius per unit of sprite width.
pub const COLLISION_RADIUS_SCALE: f64 = 20.0;

// --- Waves ---

/// Waves that make up one level.
pub const WAVES_PER_LEVEL: u32 = 3;

/// Base term of the wave size formula.
pub const BASE_WAVE_SIZE: u32 = 3;

/// Hard cap on hostiles per wave.
pub const MAX_WAVE_SIZE: u32 = 15;

/// Percentage of the theoretical maximum wave score required to clear a level.
pub const TARGET_SCORE_PERCENT: u32 = 90;

/// Highest playable level; clearing it wins the game.
pub const MAX_LEVEL: u32 = 10;

/// Delay between a level verdict and the next spawn (ms).
pub const TRANSITION_DELAY_MS: f64 = 2000.0;

// --- Default loadout ---

/// Starting defender positions, paired with `catalog::DEFAULT_LOADOUT`.
pub const LOADOUT_POSITIONS: [(f64, f64); 4] =
    [(200.0, 200.0), (200.0, 300.0), (200.0, 400.0), (200.0, 500.0)];
