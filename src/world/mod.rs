//! World module - map space, level files and level construction.

mod builder;
mod components;
mod data;
mod plugin;
mod spatial;

pub use builder::{build_level_from_data, TILE_HITBOX_INFLATION};
pub use components::*;
pub use data::{CurrentLevel, LevelDefinition, LevelDefinitionRaw, TileGrid, EMPTY_CELL, PLAYER_SPAWN_MARKER};
pub use plugin::{setup_level, WorldPlugin};
pub use spatial::{inflate, move_body, overlaps, Body, Movement};
