//! Kinematic integration system.
//!
//! Bullets integrate position from velocity directly. Enemies divide by
//! their `max_speed`, which is pinned to the spawn velocity, so the ratio
//! is 1.0 today; the divisor only changes behavior if `max_speed` is ever
//! retuned independently of the velocity. Do not remove it without
//! retuning enemy descent speeds.

use hecs::World;

use starblitz_core::components::{Bullet, EnemyMotion};
use starblitz_core::constants::DT_SECS;
use starblitz_core::types::{Position, Velocity};

/// Advance every live bullet and enemy by one tick.
pub fn run(world: &mut World) {
    for (_entity, (_bullet, pos, vel)) in world.query_mut::<(&Bullet, &mut Position, &Velocity)>()
    {
        pos.y += vel.y * DT_SECS;
    }

    for (_entity, (pos, vel, motion)) in
        world.query_mut::<(&mut Position, &Velocity, &EnemyMotion)>()
    {
        pos.y += vel.y * (vel.y / motion.max_speed) * DT_SECS;
    }
}
