//! Fundamental geometric and simulation types.

use serde::{Deserialize, Serialize};

/// 2D position in view space (pixels).
/// x grows rightward, y grows downward (screen convention).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// 2D velocity in view space (pixels per second).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Velocity {
    pub x: f64,
    pub y: f64,
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each gameplay tick).
    pub tick: u64,
    /// Elapsed gameplay time in milliseconds.
    pub elapsed_ms: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl Velocity {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl SimTime {
    /// Milliseconds per tick at the default tick rate.
    pub fn dt_ms(&self) -> f64 {
        crate::constants::DT_MS
    }

    /// Advance by one tick.
    pub fn advance(&mut self) {
        self.tick += 1;
        self.elapsed_ms += self.dt_ms();
    }
}
