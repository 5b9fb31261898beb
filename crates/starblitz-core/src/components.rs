//! ECS components for hecs entities.
//!
//! Components are plain data structs with no methods.
//! Game logic lives in systems, not components.

use serde::{Deserialize, Serialize};

use crate::enums::BulletOwner;

/// Marks the player's ship (singleton; never destroyed, only repositioned).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Ship;

/// An enemy descending from the top of the view.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Enemy {
    /// Remaining hit-points; the entity is destroyed at <= 0.
    pub hit_points: i32,
}

/// A bullet in flight.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Bullet {
    pub owner: BulletOwner,
}

/// Axis-aligned collision half-extents (px).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Collider {
    pub half_width: f64,
    pub half_height: f64,
}

/// Per-enemy fire timer. Starts at zero, i.e. measured from game start
/// rather than spawn, so an enemy spawned late into a session may fire on
/// its first scheduler pass.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct FireTimer {
    pub last_shot_ms: f64,
}

/// Enemy descent parameters. `max_speed` is pinned to the spawn velocity
/// and doubles as a normalization divisor in the movement system.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EnemyMotion {
    pub max_speed: f64,
}
