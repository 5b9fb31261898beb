//! Collision resolution: pairwise overlap handlers for the three
//! bullet/enemy/ship combinations.
//!
//! Entities hit this tick are queued in the despawn buffer and every
//! later handler checks the queue before acting, so nothing is
//! double-destroyed and score/health deltas apply at most once per
//! entity per tick.

use hecs::{Entity, World};

use starblitz_core::components::{Bullet, Collider, Enemy, Ship};
use starblitz_core::constants::{ENEMY_BULLET_DAMAGE, ENEMY_KILL_SCORE};
use starblitz_core::enums::BulletOwner;
use starblitz_core::session::SessionState;
use starblitz_core::types::Position;

/// Axis-aligned overlap test on half-extents.
pub(crate) fn overlaps(
    a_pos: &Position,
    a_col: &Collider,
    b_pos: &Position,
    b_col: &Collider,
) -> bool {
    (a_pos.x - b_pos.x).abs() < a_col.half_width + b_col.half_width
        && (a_pos.y - b_pos.y).abs() < a_col.half_height + b_col.half_height
}

fn queued(despawn_buffer: &[Entity], entity: Entity) -> bool {
    despawn_buffer.contains(&entity)
}

/// Resolve all overlaps for this tick, mutating score and health.
pub fn run(world: &mut World, session: &mut SessionState, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();

    let mut player_bullets: Vec<(Entity, Position, Collider)> = Vec::new();
    let mut enemy_bullets: Vec<(Entity, Position, Collider)> = Vec::new();
    let mut enemies: Vec<(Entity, Position, Collider)> = Vec::new();
    let mut ship: Option<(Position, Collider)> = None;

    {
        let mut query = world.query::<(&Bullet, &Position, &Collider)>();
        for (entity, (bullet, pos, collider)) in query.iter() {
            match bullet.owner {
                BulletOwner::Player => player_bullets.push((entity, *pos, *collider)),
                BulletOwner::Enemy => enemy_bullets.push((entity, *pos, *collider)),
            }
        }
    }
    {
        let mut query = world.query::<(&Enemy, &Position, &Collider)>();
        for (entity, (_enemy, pos, collider)) in query.iter() {
            enemies.push((entity, *pos, *collider));
        }
    }
    {
        let mut query = world.query::<(&Ship, &Position, &Collider)>();
        if let Some((_entity, (_ship, pos, collider))) = query.iter().next() {
            ship = Some((*pos, *collider));
        }
    }

    // Player bullet x enemy: bullet is consumed, enemy loses a hit-point;
    // a depleted enemy is destroyed and scores.
    for &(bullet, bullet_pos, bullet_col) in &player_bullets {
        for &(enemy, enemy_pos, enemy_col) in &enemies {
            if queued(despawn_buffer, enemy) {
                continue;
            }
            if !overlaps(&bullet_pos, &bullet_col, &enemy_pos, &enemy_col) {
                continue;
            }
            despawn_buffer.push(bullet);
            if let Ok(mut hit) = world.get::<&mut Enemy>(enemy) {
                hit.hit_points -= 1;
                if hit.hit_points <= 0 {
                    drop(hit);
                    despawn_buffer.push(enemy);
                    session.score += ENEMY_KILL_SCORE;
                }
            }
            break;
        }
    }

    // Enemy bullet x ship: bullet is consumed, ship takes damage.
    if let Some((ship_pos, ship_col)) = ship {
        for &(bullet, bullet_pos, bullet_col) in &enemy_bullets {
            if overlaps(&bullet_pos, &bullet_col, &ship_pos, &ship_col) {
                despawn_buffer.push(bullet);
                session.health -= ENEMY_BULLET_DAMAGE;
            }
        }
    }

    // Player bullet x enemy bullet: mutual cancellation, no deltas.
    for &(player_bullet, p_pos, p_col) in &player_bullets {
        if queued(despawn_buffer, player_bullet) {
            continue;
        }
        for &(enemy_bullet, e_pos, e_col) in &enemy_bullets {
            if queued(despawn_buffer, enemy_bullet) {
                continue;
            }
            if overlaps(&p_pos, &p_col, &e_pos, &e_col) {
                despawn_buffer.push(player_bullet);
                despawn_buffer.push(enemy_bullet);
                break;
            }
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
