//! Starblitz Tauri application.
//!
//! Wires the headless simulation to the frontend via Tauri IPC commands
//! and per-tick snapshot events.

pub mod game_loop;
pub mod ipc;
pub mod state;

pub use starblitz_core as core;
