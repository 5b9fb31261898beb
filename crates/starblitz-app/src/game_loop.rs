//! Game loop thread — runs the engine at the tick rate and emits snapshots.
//!
//! The engine is created inside this thread because it's cleaner for
//! ownership. Commands arrive via `mpsc` channel. Snapshots are emitted via
//! Tauri `AppHandle` events and stored in shared state for synchronous
//! polling.
//!
//! The same thread also drives the countdown cadence: while the engine
//! reports an in-flight countdown, `advance_countdown()` is called once per
//! second between ticks. Keeping both cadences on one thread is what
//! upholds the single-owner-at-a-time discipline — a countdown completion
//! finishes all of its resets before the next `tick()` can observe them.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use tauri::{AppHandle, Emitter};

use starblitz_core::constants::{COUNTDOWN_CADENCE_MS, TICK_RATE};
use starblitz_core::state::GameStateSnapshot;
use starblitz_sim::engine::{GameEngine, SimConfig};

use crate::state::GameLoopCommand;

/// Nominal duration of one tick.
const TICK_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TICK_RATE as u64);

/// Wall-clock spacing of countdown display-ticks.
const COUNTDOWN_CADENCE: Duration = Duration::from_millis(COUNTDOWN_CADENCE_MS);

/// Spawns the game loop in a new thread.
///
/// Returns the command sender for the IPC layer to use.
pub fn spawn_game_loop(
    app_handle: AppHandle,
    latest_snapshot: Arc<Mutex<Option<GameStateSnapshot>>>,
    config: SimConfig,
) -> mpsc::Sender<GameLoopCommand> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();

    std::thread::Builder::new()
        .name("starblitz-game-loop".into())
        .spawn(move || {
            run_game_loop(app_handle, cmd_rx, &latest_snapshot, config);
        })
        .expect("Failed to spawn game loop thread");

    cmd_tx
}

/// The game loop. Runs until Shutdown command or channel disconnect.
fn run_game_loop(
    app_handle: AppHandle,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    latest_snapshot: &Mutex<Option<GameStateSnapshot>>,
    config: SimConfig,
) {
    log::info!("game loop starting");

    let mut engine = GameEngine::new(config);
    let mut next_tick_time = Instant::now();
    let mut countdown_epoch = Instant::now();

    loop {
        // 1. Drain all pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(GameLoopCommand::PlayerCommand(cmd)) => {
                    engine.queue_command(cmd);
                }
                Ok(GameLoopCommand::Shutdown) => {
                    log::info!("game loop shutting down");
                    return;
                }
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => {
                    log::warn!("command channel disconnected, stopping game loop");
                    return;
                }
            }
        }

        // 2. Drive the countdown cadence while a countdown is showing.
        //    The epoch is re-armed whenever no countdown is in flight, so a
        //    fresh countdown always gets a full first second.
        if engine.is_counting() {
            if countdown_epoch.elapsed() >= COUNTDOWN_CADENCE {
                engine.advance_countdown();
                countdown_epoch = Instant::now();
            }
        } else {
            countdown_epoch = Instant::now();
        }

        // 3. Advance one tick (the engine no-ops outside live gameplay)
        let snapshot = engine.tick();

        // 4. Emit snapshot to frontend via Tauri event
        let _ = app_handle.emit("game:state_snapshot", &snapshot);

        // 5. Store latest snapshot for synchronous polling
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot);
        }

        // 6. Sleep until next tick
        next_tick_time += TICK_DURATION;
        let now = Instant::now();
        if next_tick_time > now {
            std::thread::sleep(next_tick_time - now);
        } else if now - next_tick_time > TICK_DURATION * 2 {
            // Too far behind — reset to avoid catch-up spiral
            next_tick_time = now;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use starblitz_core::commands::PlayerCommand;
    use starblitz_core::enums::GamePhase;

    #[test]
    fn test_command_channel_round_trip() {
        let (tx, rx) = mpsc::channel::<GameLoopCommand>();

        tx.send(GameLoopCommand::PlayerCommand(PlayerCommand::StartGame))
            .unwrap();
        tx.send(GameLoopCommand::PlayerCommand(PlayerCommand::Restart))
            .unwrap();
        tx.send(GameLoopCommand::Shutdown).unwrap();

        let mut commands = Vec::new();
        while let Ok(cmd) = rx.try_recv() {
            commands.push(cmd);
        }

        assert_eq!(commands.len(), 3);
        assert!(matches!(
            commands[0],
            GameLoopCommand::PlayerCommand(PlayerCommand::StartGame)
        ));
        assert!(matches!(
            commands[1],
            GameLoopCommand::PlayerCommand(PlayerCommand::Restart)
        ));
        assert!(matches!(commands[2], GameLoopCommand::Shutdown));
    }

    #[test]
    fn test_tick_duration_constant() {
        // 60Hz = 16.667ms per tick
        let expected_nanos = 1_000_000_000u64 / 60;
        assert_eq!(TICK_DURATION.as_nanos(), expected_nanos as u128);
    }

    #[test]
    fn test_snapshot_serialization_under_3ms() {
        let mut engine = GameEngine::new(SimConfig::default());
        engine.queue_command(PlayerCommand::StartGame);
        engine.tick();
        engine.advance_countdown();
        engine.advance_countdown();
        engine.advance_countdown();

        // Run enough ticks to populate entities
        for _ in 0..120 {
            engine.tick();
        }

        let snapshot = engine.tick();
        let start = Instant::now();
        let json = serde_json::to_string(&snapshot).unwrap();
        let elapsed = start.elapsed();

        assert!(
            elapsed < Duration::from_millis(3),
            "Snapshot serialization took {:?}, should be <3ms",
            elapsed
        );
        assert!(!json.is_empty());
    }

    #[test]
    fn test_gate_and_countdown_via_commands() {
        let mut engine = GameEngine::new(SimConfig::default());

        // Before the gate fires, the engine idles.
        let snap = engine.tick();
        assert_eq!(snap.phase, GamePhase::Idle);

        // The gate's single entry point starts the initial countdown.
        engine.queue_command(PlayerCommand::StartGame);
        let snap = engine.tick();
        assert_eq!(snap.phase, GamePhase::Starting);
        assert!(engine.is_counting());

        // Three cadence signals later, gameplay is live.
        engine.advance_countdown();
        engine.advance_countdown();
        engine.advance_countdown();
        let snap = engine.tick();
        assert_eq!(snap.phase, GamePhase::Playing);
        assert!(!engine.is_counting());
        assert!(snap.time.tick > 0);
    }
}
