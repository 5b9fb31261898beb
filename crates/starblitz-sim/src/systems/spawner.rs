//! Spawn and fire-rate scheduling.
//!
//! Rolling interval timers: an event fires when the current time has
//! passed the last fire time by more than the interval, and firing
//! records the current time. Intervals come from the session's
//! per-level rate parameters.

use hecs::World;
use rand_chacha::ChaCha8Rng;

use starblitz_core::session::SessionState;

use crate::world_setup;

/// The rolling-interval check shared by all gameplay timers.
pub fn interval_elapsed(now_ms: f64, last_ms: f64, interval_ms: f64) -> bool {
    now_ms > last_ms + interval_ms
}

/// Fire a player bullet from the ship's muzzle when the shot timer is due.
pub fn run_player_shot(world: &mut World, session: &mut SessionState, now_ms: f64) {
    if !interval_elapsed(
        now_ms,
        session.last_player_shot_ms,
        session.rates.player_shot_interval_ms,
    ) {
        return;
    }
    if let Some(ship_pos) = world_setup::ship_position(world) {
        world_setup::spawn_player_bullet(world, ship_pos);
        session.last_player_shot_ms = now_ms;
    }
}

/// Spawn an enemy when the spawn timer is due.
pub fn run_enemy_spawn(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    session: &mut SessionState,
    now_ms: f64,
    level: u32,
    view_width: f64,
) {
    if !interval_elapsed(
        now_ms,
        session.last_enemy_spawn_ms,
        session.rates.spawn_interval_ms,
    ) {
        return;
    }
    world_setup::spawn_enemy(world, rng, level, view_width);
    session.last_enemy_spawn_ms = now_ms;
}
