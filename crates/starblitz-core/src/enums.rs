//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Top-level game phase, as reported in snapshots.
///
/// Mirrors the level-progression state machine; the frontend uses it to
/// decide which overlay (countdown, game-over) to show.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the onboarding gate to begin gameplay.
    #[default]
    Idle,
    /// Initial "Game starting in N..." countdown.
    Starting,
    /// Live gameplay ticking.
    Playing,
    /// Paused for a level-complete countdown.
    CountingDown,
    /// Between-level reset in progress.
    Transitioning,
    /// Session ended; restart available.
    GameOver,
}

/// Which side fired a bullet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BulletOwner {
    Player,
    Enemy,
}
