//! Tauri IPC command handlers.
//!
//! These `#[tauri::command]` functions are invoked by the frontend via
//! `invoke()`. They bridge frontend requests to the game loop thread via
//! channels. The wallet/payment onboarding flow lives entirely in the
//! frontend; its only contract with this layer is the single
//! `start_gameplay` call after a successful payment.

use tauri::{AppHandle, State};

use starblitz_core::commands::PlayerCommand;
use starblitz_core::state::GameStateSnapshot;
use starblitz_sim::engine::SimConfig;

use crate::game_loop;
use crate::state::{AppState, GameLoopCommand};

/// Begin gameplay. Spawns the game loop thread and starts the session.
///
/// Invoked at most once per page load by the onboarding page, after the
/// payment transaction is signed; re-entrant calls are rejected here and
/// additionally ignored by the engine.
///
/// Frontend: `invoke("start_gameplay", { width, height })`
#[tauri::command]
pub fn start_gameplay(
    app_handle: AppHandle,
    state: State<'_, AppState>,
    width: f64,
    height: f64,
) -> Result<(), String> {
    let mut running = state.running.lock().map_err(|e| e.to_string())?;

    if *running {
        return Err("Gameplay already started".into());
    }

    let config = SimConfig {
        width,
        height,
        ..Default::default()
    };
    let cmd_tx = game_loop::spawn_game_loop(app_handle, state.latest_snapshot.clone(), config);
    cmd_tx
        .send(GameLoopCommand::PlayerCommand(PlayerCommand::StartGame))
        .map_err(|e| format!("Failed to start session: {}", e))?;

    let mut tx_lock = state.command_tx.lock().map_err(|e| e.to_string())?;
    *tx_lock = Some(cmd_tx);
    *running = true;

    Ok(())
}

/// Send a player command to the game.
///
/// Frontend: `invoke("send_command", { command })`
#[tauri::command]
pub fn send_command(command: PlayerCommand, state: State<'_, AppState>) -> Result<(), String> {
    let tx_lock = state.command_tx.lock().map_err(|e| e.to_string())?;

    match tx_lock.as_ref() {
        Some(tx) => tx
            .send(GameLoopCommand::PlayerCommand(command))
            .map_err(|e| format!("Failed to send command: {}", e)),
        None => Err("Gameplay not started".into()),
    }
}

/// Get the latest snapshot synchronously (for polling / initial state).
///
/// Frontend: `invoke("get_snapshot")`
#[tauri::command]
pub fn get_snapshot(state: State<'_, AppState>) -> Result<Option<GameStateSnapshot>, String> {
    let lock = state.latest_snapshot.lock().map_err(|e| e.to_string())?;
    Ok(lock.clone())
}
