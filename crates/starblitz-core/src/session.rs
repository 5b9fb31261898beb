//! Per-session gameplay state owned by the engine.
//!
//! Consolidates the score, health, and scheduler timestamps into one value
//! passed through the game loop and systems; there is no ambient state.

use serde::{Deserialize, Serialize};

use crate::constants::*;

/// The three scheduling intervals recomputed on each level advance (ms).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RateParams {
    /// Interval between enemy spawns.
    pub spawn_interval_ms: f64,
    /// Interval between shots for each individual enemy.
    pub enemy_fire_interval_ms: f64,
    /// Interval between player shots.
    pub player_shot_interval_ms: f64,
}

impl Default for RateParams {
    fn default() -> Self {
        Self {
            spawn_interval_ms: ENEMY_SPAWN_BASE_MS,
            enemy_fire_interval_ms: ENEMY_SPAWN_BASE_MS
                * ENEMY_FIRE_SPAWN_FACTOR
                * ENEMY_FIRE_SALVO_FACTOR,
            player_shot_interval_ms: PLAYER_SHOT_BASE_MS,
        }
    }
}

/// Mutable session state: score, health, and scheduler timestamps.
#[derive(Debug, Clone)]
pub struct SessionState {
    /// Cumulative score within the current level.
    pub score: u32,
    /// Current health. May go below zero internally within a tick; the
    /// game-over transition fires before a negative value is displayed.
    pub health: i32,
    /// Timestamp of the last player shot (elapsed ms).
    pub last_player_shot_ms: f64,
    /// Timestamp of the last enemy spawn (elapsed ms).
    pub last_enemy_spawn_ms: f64,
    /// Current scheduling intervals.
    pub rates: RateParams,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            score: 0,
            health: STARTING_HEALTH,
            last_player_shot_ms: 0.0,
            last_enemy_spawn_ms: 0.0,
            rates: RateParams::default(),
        }
    }
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Health as shown to the player: never negative, never above the cap.
    pub fn displayed_health(&self) -> i32 {
        self.health.clamp(0, MAX_HEALTH)
    }

    /// Partial reset on level transition: score and health restart, but
    /// scheduler timestamps carry over. Only a full restart zeroes them.
    pub fn reset_for_level(&mut self, rates: RateParams) {
        self.score = 0;
        self.health = STARTING_HEALTH;
        self.rates = rates;
    }
}
