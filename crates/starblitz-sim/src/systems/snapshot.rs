//! Snapshot building: walks the world read-only and assembles the
//! complete visible state for the frontend.

use hecs::World;

use starblitz_core::components::{Bullet, Enemy, Ship};
use starblitz_core::events::AudioEvent;
use starblitz_core::session::SessionState;
use starblitz_core::state::{BulletView, EnemyView, GameStateSnapshot, HudView, ShipView};
use starblitz_core::types::{Position, SimTime};

use starblitz_levels::fsm::{LevelState, LevelTracker};

/// Build the snapshot for the current tick.
pub fn build_snapshot(
    world: &World,
    time: &SimTime,
    tracker: &LevelTracker,
    session: &SessionState,
    audio_events: Vec<AudioEvent>,
) -> GameStateSnapshot {
    let ship = {
        let mut query = world.query::<(&Ship, &Position)>();
        query
            .iter()
            .next()
            .map(|(_entity, (_ship, pos))| ShipView { position: *pos })
    };

    let enemies = {
        let mut query = world.query::<(&Enemy, &Position)>();
        query
            .iter()
            .map(|(_entity, (enemy, pos))| EnemyView {
                position: *pos,
                hit_points: enemy.hit_points,
            })
            .collect()
    };

    let bullets = {
        let mut query = world.query::<(&Bullet, &Position)>();
        query
            .iter()
            .map(|(_entity, (bullet, pos))| BulletView {
                position: *pos,
                owner: bullet.owner,
            })
            .collect()
    };

    let health = session.displayed_health();
    GameStateSnapshot {
        time: *time,
        phase: tracker.phase(),
        level: tracker.level(),
        score: session.score,
        health,
        hud: HudView {
            score_text: format!("Score: {}", session.score),
            health_text: format!("Health: {health}"),
        },
        banner: tracker.banner(),
        restart_available: tracker.state() == LevelState::GameOver,
        ship,
        enemies,
        bullets,
        audio_events,
    }
}
