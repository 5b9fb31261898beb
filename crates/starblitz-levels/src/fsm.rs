//! Level progression finite state machine.
//!
//! Tracks the current level, the score thresholds, and the countdown-gated
//! transition sequence. Pure data — no ECS or clock dependency; countdown
//! display-ticks are advanced by an external cadence signal, which is what
//! makes the pause/resume ordering testable without wall-clock delays.

use starblitz_core::constants::COUNTDOWN_DISPLAY_TICKS;
use starblitz_core::enums::GamePhase;

/// State of the progression machine.
///
/// Gameplay ticks only while `Playing`; every other state is a pause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelState {
    /// Waiting for the onboarding gate.
    Idle,
    /// Initial "Game starting in N..." countdown before level 1.
    Starting { ticks_remaining: u32 },
    /// Live gameplay.
    Playing,
    /// Paused for level-complete; countdown display-ticks remaining.
    CountingDown {
        next_level: u32,
        ticks_remaining: u32,
    },
    /// Countdown finished; the engine is applying the between-level resets.
    Transitioning { next_level: u32 },
    /// Session over. Entered at most once per session.
    GameOver,
}

/// Result of one countdown cadence signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownOutcome {
    /// Not in a countdown state; nothing happened.
    Ignored,
    /// Still counting; the banner now shows this many seconds.
    Ticked { seconds_remaining: u32 },
    /// The initial countdown finished; gameplay begins at level 1.
    GameplayStarted,
    /// The level countdown finished; the state is now
    /// `Transitioning(next_level)` and the engine must apply resets before
    /// calling [`LevelTracker::complete_transition`].
    TransitionReady { next_level: u32 },
}

/// The progression tracker owned by the engine.
#[derive(Debug, Clone)]
pub struct LevelTracker {
    level: u32,
    thresholds: Vec<u32>,
    state: LevelState,
}

impl LevelTracker {
    /// Create a tracker over a strictly increasing threshold table.
    pub fn new(thresholds: Vec<u32>) -> Self {
        assert!(
            thresholds.windows(2).all(|w| w[0] < w[1]),
            "level thresholds must be strictly increasing"
        );
        Self {
            level: 1,
            thresholds,
            state: LevelState::Idle,
        }
    }

    pub fn state(&self) -> LevelState {
        self.state
    }

    /// Current level (1-based). Unchanged until a transition completes.
    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn is_playing(&self) -> bool {
        self.state == LevelState::Playing
    }

    /// Whether a countdown cadence signal is currently expected.
    pub fn is_counting(&self) -> bool {
        matches!(
            self.state,
            LevelState::Starting { .. } | LevelState::CountingDown { .. }
        )
    }

    /// All thresholds cleared: the last level repeats at its own rates.
    pub fn is_endless(&self) -> bool {
        self.level as usize > self.thresholds.len()
    }

    /// Begin gameplay from the onboarding gate. Re-entrant calls are
    /// ignored; returns whether the initial countdown was scheduled.
    pub fn begin(&mut self) -> bool {
        if self.state != LevelState::Idle {
            return false;
        }
        self.state = LevelState::Starting {
            ticks_remaining: COUNTDOWN_DISPLAY_TICKS,
        };
        true
    }

    /// Check the score against the current level's threshold. Thresholds
    /// are evaluated in order, so only the lowest unmet one can trigger;
    /// on a large overshoot exactly one transition is scheduled.
    ///
    /// Returns whether gameplay just paused into the countdown.
    pub fn check_progress(&mut self, score: u32) -> bool {
        if self.state != LevelState::Playing || self.is_endless() {
            return false;
        }
        let threshold = self.thresholds[(self.level - 1) as usize];
        if score < threshold {
            return false;
        }
        self.state = LevelState::CountingDown {
            next_level: self.level + 1,
            ticks_remaining: COUNTDOWN_DISPLAY_TICKS,
        };
        true
    }

    /// Advance a countdown by one display-tick (1-second cadence).
    pub fn advance_countdown(&mut self) -> CountdownOutcome {
        match self.state {
            LevelState::Starting { ticks_remaining } => {
                let remaining = ticks_remaining - 1;
                if remaining == 0 {
                    self.state = LevelState::Playing;
                    CountdownOutcome::GameplayStarted
                } else {
                    self.state = LevelState::Starting {
                        ticks_remaining: remaining,
                    };
                    CountdownOutcome::Ticked {
                        seconds_remaining: remaining,
                    }
                }
            }
            LevelState::CountingDown {
                next_level,
                ticks_remaining,
            } => {
                let remaining = ticks_remaining - 1;
                if remaining == 0 {
                    self.state = LevelState::Transitioning { next_level };
                    CountdownOutcome::TransitionReady { next_level }
                } else {
                    self.state = LevelState::CountingDown {
                        next_level,
                        ticks_remaining: remaining,
                    };
                    CountdownOutcome::Ticked {
                        seconds_remaining: remaining,
                    }
                }
            }
            _ => CountdownOutcome::Ignored,
        }
    }

    /// Finish a level transition after the engine has applied its resets.
    /// Gameplay resumes only after this call, preserving the
    /// pause-then-reset-then-resume ordering.
    pub fn complete_transition(&mut self) {
        if let LevelState::Transitioning { next_level } = self.state {
            self.level = next_level;
            self.state = LevelState::Playing;
        }
    }

    /// Enter game over. Idempotent: returns true only on first entry, so
    /// banner/audio side effects fire exactly once even if health is
    /// decremented several times within one tick.
    pub fn game_over(&mut self) -> bool {
        if self.state != LevelState::Playing {
            return false;
        }
        self.state = LevelState::GameOver;
        true
    }

    /// Full restart back to level 1. Recovers from any post-gate state,
    /// including an in-flight countdown (which is cancelled). Gameplay
    /// resumes immediately, with no countdown.
    pub fn restart(&mut self) -> bool {
        if self.state == LevelState::Idle {
            return false;
        }
        self.level = 1;
        self.state = LevelState::Playing;
        true
    }

    /// The snapshot-facing phase.
    pub fn phase(&self) -> GamePhase {
        match self.state {
            LevelState::Idle => GamePhase::Idle,
            LevelState::Starting { .. } => GamePhase::Starting,
            LevelState::Playing => GamePhase::Playing,
            LevelState::CountingDown { .. } => GamePhase::CountingDown,
            LevelState::Transitioning { .. } => GamePhase::Transitioning,
            LevelState::GameOver => GamePhase::GameOver,
        }
    }

    /// Human-readable banner for the current state, if any.
    pub fn banner(&self) -> Option<String> {
        match self.state {
            LevelState::Starting { ticks_remaining } => {
                Some(format!("Game starting in {ticks_remaining}..."))
            }
            LevelState::CountingDown {
                next_level,
                ticks_remaining,
            } => Some(format!(
                "Level {} Complete! Next level in {}...",
                next_level - 1,
                ticks_remaining
            )),
            LevelState::GameOver => Some("Game Over".to_string()),
            _ => None,
        }
    }
}
