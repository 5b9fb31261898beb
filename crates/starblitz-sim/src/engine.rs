//! Game engine — the core of the gameplay loop.
//!
//! `GameEngine` owns the hecs ECS world, the session state, and the level
//! progression tracker. It processes player commands at tick boundaries,
//! runs all systems in a fixed order, and produces `GameStateSnapshot`s.
//! Completely headless, enabling deterministic testing.
//!
//! Two entry points mutate the engine: `tick()` (frame cadence) and
//! `advance_countdown()` (1-second cadence while a countdown is showing).
//! Gameplay systems only run while the tracker is `Playing`, and the
//! tracker leaves `Playing` before any countdown starts and re-enters it
//! only after the countdown-completion resets have been applied, so the
//! two cadences never race over the same state.

use std::collections::VecDeque;

use hecs::World;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use starblitz_core::commands::PlayerCommand;
use starblitz_core::constants::*;
use starblitz_core::events::AudioEvent;
use starblitz_core::session::SessionState;
use starblitz_core::state::GameStateSnapshot;
use starblitz_core::types::SimTime;

use starblitz_levels::difficulty::rates_for_level;
use starblitz_levels::fsm::{CountdownOutcome, LevelState, LevelTracker};

use crate::systems;
use crate::world_setup;

/// Configuration for starting a new session.
pub struct SimConfig {
    /// RNG seed for determinism. Same seed + same commands = same game.
    pub seed: u64,
    /// View width in pixels.
    pub width: f64,
    /// View height in pixels.
    pub height: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            width: DEFAULT_VIEW_WIDTH,
            height: DEFAULT_VIEW_HEIGHT,
        }
    }
}

/// Accumulated input applied at the next tick.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputState {
    pub left: bool,
    pub right: bool,
    /// Pointer-drag x-delta accumulated since the last tick (px).
    pub pending_drag_x: f64,
}

/// The game engine. Owns the ECS world and all session state.
pub struct GameEngine {
    world: World,
    time: SimTime,
    config: SimConfig,
    tracker: LevelTracker,
    session: SessionState,
    input: InputState,
    rng: ChaCha8Rng,
    command_queue: VecDeque<PlayerCommand>,
    despawn_buffer: Vec<hecs::Entity>,
    audio_events: Vec<AudioEvent>,
}

impl GameEngine {
    /// Create a new engine with the given config.
    pub fn new(config: SimConfig) -> Self {
        Self {
            world: World::new(),
            time: SimTime::default(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            config,
            tracker: LevelTracker::new(LEVEL_THRESHOLDS.to_vec()),
            session: SessionState::new(),
            input: InputState::default(),
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            audio_events: Vec::new(),
        }
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Advance the game by one tick and return the resulting snapshot.
    /// A no-op (beyond command processing) unless gameplay is live.
    pub fn tick(&mut self) -> GameStateSnapshot {
        self.process_commands();

        if self.tracker.is_playing() {
            self.run_systems();
            self.time.advance();
        }

        let audio_events = std::mem::take(&mut self.audio_events);
        systems::snapshot::build_snapshot(
            &self.world,
            &self.time,
            &self.tracker,
            &self.session,
            audio_events,
        )
    }

    /// Advance an in-flight countdown by one display-tick. Called by the
    /// shell on a 1-second cadence while [`Self::is_counting`] is true;
    /// called directly by tests in place of a wall clock.
    pub fn advance_countdown(&mut self) {
        match self.tracker.advance_countdown() {
            CountdownOutcome::GameplayStarted => {
                self.audio_events.push(AudioEvent::MusicStart);
            }
            CountdownOutcome::TransitionReady { next_level } => {
                self.apply_level_transition(next_level);
            }
            CountdownOutcome::Ticked { .. } | CountdownOutcome::Ignored => {}
        }
    }

    /// Whether the shell should be driving the countdown cadence.
    pub fn is_counting(&self) -> bool {
        self.tracker.is_counting()
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    /// Get the current progression state.
    pub fn level_state(&self) -> LevelState {
        self.tracker.state()
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Get a read-only reference to the session state.
    pub fn session(&self) -> &SessionState {
        &self.session
    }

    /// Override the score (for tests exercising threshold scenarios).
    #[cfg(test)]
    pub fn set_score(&mut self, score: u32) {
        self.session.score = score;
    }

    /// Override the health (for tests exercising game-over scenarios).
    #[cfg(test)]
    pub fn set_health(&mut self, health: i32) {
        self.session.health = health;
    }

    /// Spawn an enemy at an explicit position and speed (for tests).
    #[cfg(test)]
    pub fn spawn_enemy_for_test(
        &mut self,
        position: starblitz_core::types::Position,
        speed: f64,
    ) -> hecs::Entity {
        world_setup::spawn_enemy_at(&mut self.world, position, speed)
    }

    /// Spawn a bullet at an explicit position (for tests). The muzzle
    /// offset of the matching factory is applied.
    #[cfg(test)]
    pub fn spawn_bullet_for_test(
        &mut self,
        origin: starblitz_core::types::Position,
        owner: starblitz_core::enums::BulletOwner,
    ) -> hecs::Entity {
        match owner {
            starblitz_core::enums::BulletOwner::Player => {
                world_setup::spawn_player_bullet(&mut self.world, origin)
            }
            starblitz_core::enums::BulletOwner::Enemy => {
                world_setup::spawn_enemy_bullet(&mut self.world, origin)
            }
        }
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single player command.
    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::StartGame => {
                // Re-entrant starts are ignored by the tracker.
                if self.tracker.begin() {
                    world_setup::spawn_ship(&mut self.world, self.config.width, self.config.height);
                    self.session = SessionState::new();
                }
            }
            PlayerCommand::Restart => {
                // Forces a full reset from any post-gate state, cancelling
                // an in-flight countdown before touching session state.
                if self.tracker.restart() {
                    self.full_reset();
                    self.audio_events.push(AudioEvent::MusicStart);
                }
            }
            PlayerCommand::SetKeys { left, right } => {
                self.input.left = left;
                self.input.right = right;
            }
            PlayerCommand::Drag { delta_x } => {
                self.input.pending_drag_x += delta_x;
            }
        }
    }

    /// Run all gameplay systems in order.
    fn run_systems(&mut self) {
        // 1. Level progress — may pause into the transition countdown.
        if self.tracker.check_progress(self.session.score) {
            return;
        }
        // 2. Ship control (keyboard + drag, clamped to the view).
        systems::control::run(&mut self.world, &mut self.input, self.config.width);
        // 3. Scheduled player shot and enemy spawn.
        systems::spawner::run_player_shot(&mut self.world, &mut self.session, self.time.elapsed_ms);
        systems::spawner::run_enemy_spawn(
            &mut self.world,
            &mut self.rng,
            &mut self.session,
            self.time.elapsed_ms,
            self.tracker.level(),
            self.config.width,
        );
        // 4. Movement integration.
        systems::movement::run(&mut self.world);
        // 5. Per-enemy fire timers.
        systems::enemy_fire::run(
            &mut self.world,
            self.time.elapsed_ms,
            self.session.rates.enemy_fire_interval_ms,
        );
        // 6. Collision resolution (score/health deltas).
        systems::collision::run(&mut self.world, &mut self.session, &mut self.despawn_buffer);
        self.check_game_over();
        // 7. Bounds reaping; escaped enemies cost health.
        let leaked =
            systems::bounds::run(&mut self.world, &mut self.despawn_buffer, self.config.height);
        if leaked > 0 {
            self.session.health -= ENEMY_LEAK_DAMAGE * leaked as i32;
            self.check_game_over();
        }
    }

    /// Enter game over if health is depleted. Safe to call after every
    /// health mutation: entering is one-shot, so the banner and the music
    /// stop fire exactly once.
    fn check_game_over(&mut self) {
        if self.session.health <= 0 && self.tracker.game_over() {
            self.audio_events.push(AudioEvent::MusicStop);
        }
    }

    /// Between-level resets, applied while ticking is still paused.
    /// Gameplay resumes only once `complete_transition` has run.
    fn apply_level_transition(&mut self, next_level: u32) {
        self.session.reset_for_level(rates_for_level(next_level));
        world_setup::clear_combatants(&mut self.world, &mut self.despawn_buffer);
        world_setup::recenter_ship(&mut self.world, self.config.width, self.config.height);
        self.tracker.complete_transition();
    }

    /// Full session reset for restart: initial rates, zeroed clock and
    /// timestamps, empty collections, recentered ship.
    fn full_reset(&mut self) {
        self.session = SessionState::new();
        self.time = SimTime::default();
        world_setup::clear_combatants(&mut self.world, &mut self.despawn_buffer);
        world_setup::recenter_ship(&mut self.world, self.config.width, self.config.height);
    }
}
