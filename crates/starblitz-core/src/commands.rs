//! Player commands sent from the frontend to the simulation.
//!
//! Commands are validated and queued for processing at the next tick boundary.

use serde::{Deserialize, Serialize};

/// All possible player actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    /// Begin gameplay. Invoked once by the onboarding page after the
    /// payment step succeeds; ignored if a session already exists.
    StartGame,
    /// Restart after game over. Forces a full session reset from any
    /// post-gate state, cancelling an in-flight countdown.
    Restart,
    /// Current keyboard state for horizontal movement.
    SetKeys { left: bool, right: bool },
    /// Pointer-drag movement delta since the last drag event (px).
    Drag { delta_x: f64 },
}
