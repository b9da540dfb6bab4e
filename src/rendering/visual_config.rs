//! Visual configuration loaded from external RON file.
//!
//! Allows tweaking colours, bar sizes and fonts without recompilation.

use bevy::prelude::*;
use serde::Deserialize;
use std::fs;

/// Visual configuration loaded from assets/data/config/visual.ron.
#[derive(Resource, Clone, Deserialize)]
#[serde(default)]
pub struct VisualConfig {
    // Background
    pub clear_color: (f32, f32, f32),
    // HUD and menus
    pub ui_bg_color: (f32, f32, f32),
    pub ui_text_color: (f32, f32, f32),
    pub ui_border_color: (f32, f32, f32),
    pub health_color: (f32, f32, f32),
    pub bar_width: f32,
    pub bar_height: f32,
    pub ui_font_size: f32,
    pub title_font_size: f32,
    // Upgrade menu
    pub selected_bg_color: (f32, f32, f32),
    pub selected_text_color: (f32, f32, f32),
    pub bar_color: (f32, f32, f32),
    pub bar_color_selected: (f32, f32, f32),
    // Placeholders for missing images
    pub player_placeholder: (f32, f32, f32),
    pub enemy_placeholder: (f32, f32, f32),
    pub object_placeholder: (f32, f32, f32),
    pub food_placeholder: (f32, f32, f32),
    pub weapon_placeholder: (f32, f32, f32),
    pub floor_placeholder: (f32, f32, f32),
}

impl Default for VisualConfig {
    fn default() -> Self {
        Self {
            clear_color: (0.0, 0.0, 0.0),

            ui_bg_color: (0.21, 0.2, 0.2),
            ui_text_color: (1.0, 1.0, 1.0),
            ui_border_color: (1.0, 0.84, 0.0),
            health_color: (1.0, 0.0, 0.0),
            bar_width: 200.0,
            bar_height: 20.0,
            ui_font_size: 30.0,
            title_font_size: 100.0,

            selected_bg_color: (0.93, 0.93, 0.93),
            selected_text_color: (0.07, 0.07, 0.07),
            bar_color: (0.93, 0.93, 0.93),
            bar_color_selected: (0.07, 0.07, 0.07),

            player_placeholder: (0.2, 0.5, 0.9),
            enemy_placeholder: (0.8, 0.25, 0.2),
            object_placeholder: (0.45, 0.35, 0.25),
            food_placeholder: (0.3, 0.8, 0.3),
            weapon_placeholder: (0.85, 0.85, 1.0),
            floor_placeholder: (0.25, 0.42, 0.22),
        }
    }
}

impl VisualConfig {
    /// Load visual config from RON file.
    pub fn load() -> Self {
        let path = "assets/data/config/visual.ron";
        match fs::read_to_string(path) {
            Ok(contents) => match ron::from_str(&contents) {
                Ok(config) => {
                    info!("Loaded visual config from {}", path);
                    config
                }
                Err(e) => {
                    error!("Failed to parse {}: {}. Using defaults.", path, e);
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Could not read {}: {}. Using defaults.", path, e);
                Self::default()
            }
        }
    }
}

/// Convert an RGB triple from the config into a colour.
pub fn rgb((r, g, b): (f32, f32, f32)) -> Color {
    Color::srgb(r, g, b)
}

/// System to load visual config at startup.
pub fn load_visual_config(mut commands: Commands) {
    let config = VisualConfig::load();
    commands.insert_resource(ClearColor(rgb(config.clear_color)));
    commands.insert_resource(config);
}
