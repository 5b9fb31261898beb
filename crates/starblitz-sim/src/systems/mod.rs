pub mod bounds;
pub mod collision;
pub mod control;
pub mod enemy_fire;
pub mod movement;
pub mod snapshot;
pub mod spawner;
