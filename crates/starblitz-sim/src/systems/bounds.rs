//! Bounds reaping: removes entities that have left the visible area.
//!
//! Bullets are culled a fixed margin past the top/bottom edge. Enemies
//! that escape past the bottom by half their height are removed and
//! reported so the caller can charge the leak penalty.

use hecs::{Entity, World};

use starblitz_core::components::{Bullet, Collider, Enemy};
use starblitz_core::constants::BULLET_CULL_MARGIN;
use starblitz_core::enums::BulletOwner;
use starblitz_core::types::Position;

/// Reap out-of-bounds entities. Returns the number of enemies that
/// escaped past the bottom edge this tick.
pub fn run(world: &mut World, despawn_buffer: &mut Vec<Entity>, view_height: f64) -> u32 {
    despawn_buffer.clear();
    let mut leaked = 0;

    for (entity, (bullet, pos)) in world.query_mut::<(&Bullet, &Position)>() {
        let gone = match bullet.owner {
            BulletOwner::Player => pos.y < -BULLET_CULL_MARGIN,
            BulletOwner::Enemy => pos.y > view_height + BULLET_CULL_MARGIN,
        };
        if gone {
            despawn_buffer.push(entity);
        }
    }

    for (entity, (_enemy, pos, collider)) in
        world.query_mut::<(&Enemy, &Position, &Collider)>()
    {
        if pos.y > view_height + collider.half_height {
            despawn_buffer.push(entity);
            leaked += 1;
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }

    leaked
}
