//! Enemies module - enemy entities, AI, and spawning.

mod ai;
mod components;
pub mod data;
mod plugin;
mod spawning;

pub use ai::{direction_to, enemy_cooldowns, enemy_deaths, take_damage, Hit};
pub use components::*;
pub use data::{EnemyDefinition, EnemyRegistry};
pub use plugin::EnemyPlugin;
pub use spawning::{random_spawn_point, spawn_enemy, spawn_wave};
