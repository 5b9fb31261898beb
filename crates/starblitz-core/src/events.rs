//! Events emitted by the simulation for audio feedback.

use serde::{Deserialize, Serialize};

/// Audio events for the frontend sound system. The game carries a single
/// looped background track; the core only signals start and stop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AudioEvent {
    /// Start (or resume) the looped background track.
    MusicStart,
    /// Stop the background track (game over).
    MusicStop,
}
