//! Per-level difficulty parameters.
//!
//! Consolidates the scheduling intervals recomputed on each level advance.

use starblitz_core::constants::*;
use starblitz_core::session::RateParams;

/// Compute the three scheduling intervals for a level (1-based).
///
/// The spawn interval tightens linearly to a floor; the player shot and
/// enemy fire intervals decay geometrically. The enemy fire interval is
/// derived from the spawn interval, so the two tighten together.
pub fn rates_for_level(level: u32) -> RateParams {
    let idx = level.saturating_sub(1);
    let spawn_interval_ms =
        (ENEMY_SPAWN_BASE_MS - ENEMY_SPAWN_STEP_MS * idx as f64).max(ENEMY_SPAWN_FLOOR_MS);
    let decay = RATE_DECAY.powi(idx as i32);

    RateParams {
        spawn_interval_ms,
        enemy_fire_interval_ms: spawn_interval_ms
            * ENEMY_FIRE_SPAWN_FACTOR
            * ENEMY_FIRE_SALVO_FACTOR
            * decay,
        player_shot_interval_ms: (PLAYER_SHOT_BASE_MS * decay).max(PLAYER_SHOT_FLOOR_MS),
    }
}

/// Additional enemy descent speed for a level (px/s), added to the random
/// base speed at spawn.
pub fn enemy_speed_bonus(level: u32) -> f64 {
    level as f64 * ENEMY_LEVEL_SPEED_BONUS
}
