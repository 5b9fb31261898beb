//! Simulation constants and gameplay tuning parameters.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 60;

/// Milliseconds per tick.
pub const DT_MS: f64 = 1000.0 / TICK_RATE as f64;

/// Seconds per tick.
pub const DT_SECS: f64 = 1.0 / TICK_RATE as f64;

// --- View bounds ---

/// Default view width in pixels (overridable via `SimConfig`).
pub const DEFAULT_VIEW_WIDTH: f64 = 1280.0;

/// Default view height in pixels.
pub const DEFAULT_VIEW_HEIGHT: f64 = 720.0;

// --- Ship ---

/// Horizontal ship speed under keyboard input (px/s).
pub const PLAYER_SPEED: f64 = 400.0;

/// Distance of the ship's start position from the bottom edge (px).
pub const SHIP_SPAWN_OFFSET_Y: f64 = 80.0;

/// Ship collision half-extents (px).
pub const SHIP_HALF_WIDTH: f64 = 32.0;
pub const SHIP_HALF_HEIGHT: f64 = 24.0;

// --- Bullets ---

/// Player bullet speed, upward (px/s).
pub const PLAYER_BULLET_SPEED: f64 = 700.0;

/// Enemy bullet speed, downward (px/s).
pub const ENEMY_BULLET_SPEED: f64 = 400.0;

/// Vertical offset of the player bullet muzzle above the ship (px).
pub const PLAYER_BULLET_MUZZLE_OFFSET: f64 = 30.0;

/// Vertical offset of the enemy bullet muzzle below the enemy (px).
pub const ENEMY_BULLET_MUZZLE_OFFSET: f64 = 20.0;

/// Margin past the top/bottom edge at which bullets are culled (px).
pub const BULLET_CULL_MARGIN: f64 = 50.0;

/// Bullet collision half-extents (px).
pub const BULLET_HALF_WIDTH: f64 = 4.0;
pub const BULLET_HALF_HEIGHT: f64 = 12.0;

// --- Enemies ---

/// Hit-points a fresh enemy carries.
pub const ENEMY_HIT_POINTS: i32 = 2;

/// Score awarded for destroying an enemy.
pub const ENEMY_KILL_SCORE: u32 = 5;

/// Health cost of an enemy bullet hitting the ship.
pub const ENEMY_BULLET_DAMAGE: i32 = 10;

/// Health cost of an enemy escaping past the bottom edge.
pub const ENEMY_LEAK_DAMAGE: i32 = 5;

/// Horizontal spawn margin from either edge (px).
pub const ENEMY_SPAWN_MARGIN_X: f64 = 50.0;

/// Vertical spawn position above the top edge (px).
pub const ENEMY_SPAWN_Y: f64 = -40.0;

/// Random base descent speed range at spawn (px/s).
pub const ENEMY_BASE_SPEED_MIN: f64 = 140.0;
pub const ENEMY_BASE_SPEED_MAX: f64 = 220.0;

/// Additional descent speed per level (px/s).
pub const ENEMY_LEVEL_SPEED_BONUS: f64 = 35.0;

/// Enemy collision half-extents (px).
pub const ENEMY_HALF_WIDTH: f64 = 24.0;
pub const ENEMY_HALF_HEIGHT: f64 = 24.0;

// --- Session ---

/// Health at session start and after each level transition.
pub const STARTING_HEALTH: i32 = 200;

/// Display ceiling for health.
pub const MAX_HEALTH: i32 = 200;

// --- Rate parameters ---

/// Base interval between player shots at level 1 (ms).
pub const PLAYER_SHOT_BASE_MS: f64 = 300.0;

/// Hard floor for the player shot interval (ms). The per-level decay would
/// otherwise approach zero at high levels.
pub const PLAYER_SHOT_FLOOR_MS: f64 = 25.0;

/// Base interval between enemy spawns at level 1 (ms).
pub const ENEMY_SPAWN_BASE_MS: f64 = 800.0;

/// Spawn interval reduction per level index (ms).
pub const ENEMY_SPAWN_STEP_MS: f64 = 100.0;

/// Floor for the enemy spawn interval (ms).
pub const ENEMY_SPAWN_FLOOR_MS: f64 = 350.0;

/// Enemy fire interval as a multiple of the spawn interval.
pub const ENEMY_FIRE_SPAWN_FACTOR: f64 = 4.5;

/// Additional multiplier on the enemy fire interval.
pub const ENEMY_FIRE_SALVO_FACTOR: f64 = 1.65;

/// Per-level decay applied to the player shot and enemy fire intervals.
pub const RATE_DECAY: f64 = 1.0 / 1.15;

// --- Level progression ---

/// Cumulative score required to complete each level, in order.
/// Strictly increasing; index i gates level i+1.
pub const LEVEL_THRESHOLDS: [u32; 5] = [150, 250, 350, 500, 750];

/// Display-ticks in a countdown (start-of-game and between levels).
pub const COUNTDOWN_DISPLAY_TICKS: u32 = 3;

/// Wall-clock cadence between countdown display-ticks (ms).
pub const COUNTDOWN_CADENCE_MS: u64 = 1000;
