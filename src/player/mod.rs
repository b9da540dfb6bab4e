//! Player module - the player entity, its stats, controls and attack cycle.

mod components;
mod control;
mod plugin;

pub use components::*;
pub use control::{gather_input, spawn_player, PlayerInput, PLAYER_HITBOX_INFLATION, PLAYER_SIZE};
pub use plugin::PlayerPlugin;
