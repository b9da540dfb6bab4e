//! Survivors - a top-down wave survival arcade game in Bevy.
//!
//! The player walks a tile map while a weapon swings on its own, enemies
//! come in growing waves, food heals, and every cleared wave grants one
//! stat upgrade. Reaching the target level wins; running out of health
//! loses.
//!
//! # Architecture
//!
//! The game is organized into plugins, each handling a specific aspect:
//!
//! - **Core**: Game states, global events, the fixed clock, data loading
//! - **World**: Map space, collision, level files and construction
//! - **Player**: Input, attack cycle, movement and stats
//! - **Combat**: Health, invincibility, weapons, collision pairs
//! - **Enemies**: Balance tables, AI, spawning
//! - **Progression**: Waves, levels, victory and defeat
//! - **Rendering**: Animation catalog, depth sorting, camera
//! - **Audio**: Sound cues and music
//! - **UI**: Menus, HUD, upgrade menu, end screens

pub mod audio;
pub mod combat;
pub mod core;
pub mod enemies;
pub mod player;
pub mod progression;
pub mod rendering;
pub mod ui;
pub mod world;

use bevy::prelude::*;

/// Main game plugin that adds all sub-plugins.
pub struct SurvivorsPlugin;

impl Plugin for SurvivorsPlugin {
    fn build(&self, app: &mut App) {
        app
            // Core systems (must be first)
            .add_plugins(core::CorePlugin)

            // Map, player and combat
            .add_plugins(world::WorldPlugin)
            .add_plugins(player::PlayerPlugin)
            .add_plugins(combat::CombatPlugin)
            .add_plugins(enemies::EnemyPlugin)
            .add_plugins(progression::ProgressionPlugin)

            // Presentation
            .add_plugins(rendering::RenderingPlugin)
            .add_plugins(audio::SoundPlugin)
            .add_plugins(ui::UiPlugin);
    }
}
