//! Per-enemy fire timers.
//!
//! Every enemy carries an independent timer; all of them share the
//! session's current enemy fire interval. Timers start at zero, so an
//! enemy spawned late in a session may fire on its first pass.

use hecs::World;

use starblitz_core::components::{Enemy, FireTimer};
use starblitz_core::types::Position;

use crate::systems::spawner::interval_elapsed;
use crate::world_setup;

/// Check every enemy's fire timer and spawn bullets for the ones that are
/// due. Muzzle positions are collected first; spawning happens after the
/// query borrow ends.
pub fn run(world: &mut World, now_ms: f64, fire_interval_ms: f64) {
    let mut muzzles = Vec::new();
    for (_entity, (_enemy, pos, timer)) in
        world.query_mut::<(&Enemy, &Position, &mut FireTimer)>()
    {
        if interval_elapsed(now_ms, timer.last_shot_ms, fire_interval_ms) {
            muzzles.push(*pos);
            timer.last_shot_ms = now_ms;
        }
    }
    for muzzle in muzzles {
        world_setup::spawn_enemy_bullet(world, muzzle);
    }
}
