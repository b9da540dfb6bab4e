//! Survivors - Entry Point
//!
//! Controls:
//! - WASD: Move
//! - Left/Right + Space: Pick an upgrade between waves
//! - Escape: Pause/Unpause

use bevy::prelude::*;
use survivors::core::GameConfig;

fn main() {
    let config = GameConfig::load();

    App::new()
        // Bevy default plugins; audio goes through bevy_kira_audio
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Survivors".to_string(),
                        resolution: (config.window_width, config.window_height).into(),
                        ..default()
                    }),
                    ..default()
                })
                .set(ImagePlugin::default_nearest())
                .disable::<bevy::audio::AudioPlugin>(),
        )
        .insert_resource(config)

        // Our game plugin
        .add_plugins(survivors::SurvivorsPlugin)

        .run();
}
