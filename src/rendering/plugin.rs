//! Rendering plugin - 2D camera, depth sorting and sprite animation.
//!
//! Gameplay writes map-space rectangles in the fixed step; this plugin turns
//! them into transforms once per rendered frame.

use bevy::prelude::*;

use super::animation::{advance_animations, build_animation_catalog};
use super::depth::{follow_player, reset_camera, spawn_main_camera, sync_body_transforms};
use super::visual_config::load_visual_config;
use crate::core::{GameState, PlayState};

/// Rendering plugin - camera, transforms and animation frames.
pub struct RenderingPlugin;

impl Plugin for RenderingPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Startup,
            (load_visual_config, build_animation_catalog, spawn_main_camera),
        )
        // Frames advance once per simulated tick, like movement
        .add_systems(
            FixedPostUpdate,
            advance_animations
                .run_if(in_state(GameState::InGame))
                .run_if(in_state(PlayState::Fighting)),
        )
        .add_systems(
            Update,
            (sync_body_transforms, follow_player)
                .chain()
                .run_if(in_state(GameState::InGame)),
        )
        .add_systems(OnExit(GameState::InGame), reset_camera);
    }
}
