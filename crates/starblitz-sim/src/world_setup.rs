//! Entity spawn factories for the gameplay world.
//!
//! Creates the player ship, enemies, and bullets with appropriate
//! component bundles.

use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use starblitz_core::components::*;
use starblitz_core::constants::*;
use starblitz_core::enums::BulletOwner;
use starblitz_core::types::{Position, Velocity};

use starblitz_levels::difficulty::enemy_speed_bonus;

/// The ship's start position: horizontally centered, near the bottom edge.
pub fn ship_start_position(view_width: f64, view_height: f64) -> Position {
    Position::new(view_width / 2.0, view_height - SHIP_SPAWN_OFFSET_Y)
}

/// Spawn the player's ship. Created once per session; level transitions
/// and restarts reposition it rather than respawning.
pub fn spawn_ship(world: &mut World, view_width: f64, view_height: f64) -> hecs::Entity {
    world.spawn((
        Ship,
        ship_start_position(view_width, view_height),
        Collider {
            half_width: SHIP_HALF_WIDTH,
            half_height: SHIP_HALF_HEIGHT,
        },
    ))
}

/// Move the ship back to its start position.
pub fn recenter_ship(world: &mut World, view_width: f64, view_height: f64) {
    let start = ship_start_position(view_width, view_height);
    for (_entity, (_ship, pos)) in world.query_mut::<(&Ship, &mut Position)>() {
        *pos = start;
    }
}

/// Current ship position, if a session is live.
pub fn ship_position(world: &World) -> Option<Position> {
    let mut query = world.query::<(&Ship, &Position)>();
    query.iter().next().map(|(_entity, (_ship, pos))| *pos)
}

/// Spawn a player bullet just above the ship, travelling upward.
pub fn spawn_player_bullet(world: &mut World, ship_pos: Position) -> hecs::Entity {
    world.spawn((
        Bullet {
            owner: BulletOwner::Player,
        },
        Position::new(ship_pos.x, ship_pos.y - PLAYER_BULLET_MUZZLE_OFFSET),
        Velocity::new(0.0, -PLAYER_BULLET_SPEED),
        Collider {
            half_width: BULLET_HALF_WIDTH,
            half_height: BULLET_HALF_HEIGHT,
        },
    ))
}

/// Spawn an enemy bullet just below an enemy, travelling downward.
pub fn spawn_enemy_bullet(world: &mut World, enemy_pos: Position) -> hecs::Entity {
    world.spawn((
        Bullet {
            owner: BulletOwner::Enemy,
        },
        Position::new(enemy_pos.x, enemy_pos.y + ENEMY_BULLET_MUZZLE_OFFSET),
        Velocity::new(0.0, ENEMY_BULLET_SPEED),
        Collider {
            half_width: BULLET_HALF_WIDTH,
            half_height: BULLET_HALF_HEIGHT,
        },
    ))
}

/// Spawn an enemy above the top edge at a random x, with a random descent
/// speed scaled by the current level.
pub fn spawn_enemy(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    level: u32,
    view_width: f64,
) -> hecs::Entity {
    let x = rng.gen_range(ENEMY_SPAWN_MARGIN_X..view_width - ENEMY_SPAWN_MARGIN_X);
    let speed =
        rng.gen_range(ENEMY_BASE_SPEED_MIN..ENEMY_BASE_SPEED_MAX) + enemy_speed_bonus(level);
    spawn_enemy_at(world, Position::new(x, ENEMY_SPAWN_Y), speed)
}

/// Spawn an enemy at an explicit position and speed.
pub fn spawn_enemy_at(world: &mut World, position: Position, speed: f64) -> hecs::Entity {
    world.spawn((
        Enemy {
            hit_points: ENEMY_HIT_POINTS,
        },
        position,
        Velocity::new(0.0, speed),
        EnemyMotion { max_speed: speed },
        FireTimer::default(),
        Collider {
            half_width: ENEMY_HALF_WIDTH,
            half_height: ENEMY_HALF_HEIGHT,
        },
    ))
}

/// Despawn every bullet and enemy, leaving the ship in place.
/// Uses a pre-allocated buffer to avoid per-call allocation.
pub fn clear_combatants(world: &mut World, despawn_buffer: &mut Vec<hecs::Entity>) {
    despawn_buffer.clear();
    for (entity, _bullet) in world.query_mut::<&Bullet>() {
        despawn_buffer.push(entity);
    }
    for (entity, _enemy) in world.query_mut::<&Enemy>() {
        despawn_buffer.push(entity);
    }
    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
