//! Game state snapshot — the complete visible state sent to the frontend
//! each tick.

use serde::{Deserialize, Serialize};

use crate::enums::{BulletOwner, GamePhase};
use crate::events::AudioEvent;
use crate::types::{Position, SimTime};

/// Complete game state broadcast to the frontend after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    /// Current level (1-based).
    pub level: u32,
    pub score: u32,
    /// Displayed health: clamped to [0, 200].
    pub health: i32,
    pub hud: HudView,
    /// Countdown / level-complete / game-over banner, if any.
    pub banner: Option<String>,
    /// Whether the restart control should be shown.
    pub restart_available: bool,
    pub ship: Option<ShipView>,
    pub enemies: Vec<EnemyView>,
    pub bullets: Vec<BulletView>,
    pub audio_events: Vec<AudioEvent>,
}

/// Pre-formatted HUD strings. The frontend is a dumb text sink.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HudView {
    pub score_text: String,
    pub health_text: String,
}

/// The player's ship for display.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShipView {
    pub position: Position,
}

/// A live enemy for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyView {
    pub position: Position,
    pub hit_points: i32,
}

/// A bullet in flight for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulletView {
    pub position: Position,
    pub owner: BulletOwner,
}
