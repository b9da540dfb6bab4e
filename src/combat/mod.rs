//! Combat module - health, invincibility, weapons and collision pairs.

mod components;
mod data;
mod plugin;
mod systems;
mod weapon;

pub use components::*;
pub use data::{WeaponDefinition, WeaponRegistry};
pub use plugin::CombatPlugin;
pub use systems::{apply_player_damage, collect_pickups, resolve_weapon_hits};
pub use weapon::{weapon_rect, weapon_size};
