//! Headless gameplay simulation for Starblitz.
//!
//! `GameEngine` owns the hecs ECS world, processes player commands, runs
//! the per-tick systems, and produces `GameStateSnapshot`s. No rendering
//! or runtime-framework dependency, enabling deterministic testing.

pub mod engine;
pub mod systems;
pub mod world_setup;

pub use engine::GameEngine;
pub use starblitz_core as core;

#[cfg(test)]
mod tests;

