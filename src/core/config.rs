//! Game settings loaded from an external RON file.
//!
//! Every tunable number of the simulation lives here so balancing does not
//! need a recompile. Missing fields take their default value.

use std::fs;
use std::time::Duration;

use bevy::prelude::*;
use serde::Deserialize;

use crate::player::StatBlock;

const CONFIG_PATH: &str = "assets/data/config/game.ron";

/// Rectangle (in map pixels) in which new waves appear.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct SpawnArea {
    pub min: (f32, f32),
    pub max: (f32, f32),
}

/// Game settings loaded from assets/data/config/game.ron.
#[derive(Resource, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // Window and clock
    pub window_width: f32,
    pub window_height: f32,
    pub fps: f64,
    pub tile_size: f32,
    /// Level file stem under assets/data/levels/
    pub level: String,

    // Player
    pub player_stats: StatBlock,
    pub player_max_stats: StatBlock,
    pub starting_weapon: String,
    pub attack_duration_ms: u64,
    pub reactivation_cooldown_ms: u64,
    pub player_invincibility_ms: u64,
    pub animation_speed: f32,

    // Enemies
    pub enemy_invincibility_ms: u64,
    pub enemy_attack_cooldown_ms: u64,
    pub spawn_area: SpawnArea,

    // Progression
    pub pickup_heal: f32,
    pub wave_increment: u32,
    pub victory_level: u32,
    pub mirrored_weapon_level: u32,
    pub upgrade_growth: f32,
    pub selection_cooldown_ms: u64,
    pub end_screen_hold_secs: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            window_width: 1280.0,
            window_height: 720.0,
            fps: 60.0,
            tile_size: 64.0,
            level: "arena".to_string(),

            player_stats: StatBlock {
                health: 150.0,
                attack: 10.0,
                speed: 5.0,
            },
            player_max_stats: StatBlock {
                health: 450.0,
                attack: 30.0,
                speed: 10.0,
            },
            starting_weapon: "tornado".to_string(),
            attack_duration_ms: 400,
            reactivation_cooldown_ms: 500,
            player_invincibility_ms: 500,
            animation_speed: 0.15,

            enemy_invincibility_ms: 300,
            enemy_attack_cooldown_ms: 400,
            spawn_area: SpawnArea {
                min: (1100.0, 600.0),
                max: (2500.0, 2900.0),
            },

            pickup_heal: 30.0,
            wave_increment: 5,
            victory_level: 10,
            mirrored_weapon_level: 3,
            upgrade_growth: 1.2,
            selection_cooldown_ms: 300,
            end_screen_hold_secs: 5.0,
        }
    }
}

impl GameConfig {
    /// Load settings from the RON file, falling back to defaults.
    pub fn load() -> Self {
        match fs::read_to_string(CONFIG_PATH) {
            Ok(contents) => match ron::from_str(&contents) {
                Ok(config) => {
                    info!("Loaded game config from {}", CONFIG_PATH);
                    config
                }
                Err(e) => {
                    error!("Failed to parse {}: {}. Using defaults.", CONFIG_PATH, e);
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Could not read {}: {}. Using defaults.", CONFIG_PATH, e);
                Self::default()
            }
        }
    }

    pub fn attack_duration(&self) -> Duration {
        Duration::from_millis(self.attack_duration_ms)
    }

    pub fn reactivation_cooldown(&self) -> Duration {
        Duration::from_millis(self.reactivation_cooldown_ms)
    }

    pub fn player_invincibility(&self) -> Duration {
        Duration::from_millis(self.player_invincibility_ms)
    }

    pub fn enemy_invincibility(&self) -> Duration {
        Duration::from_millis(self.enemy_invincibility_ms)
    }

    pub fn enemy_attack_cooldown(&self) -> Duration {
        Duration::from_millis(self.enemy_attack_cooldown_ms)
    }

    pub fn selection_cooldown(&self) -> Duration {
        Duration::from_millis(self.selection_cooldown_ms)
    }
}
