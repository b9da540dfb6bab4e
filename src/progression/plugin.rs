//! Progression plugin - wave flow, victory and defeat.

use bevy::prelude::*;

use super::systems::{advance_progression, reset_wave_state};
use super::wave::WaveState;
use crate::core::{GameState, GameplaySet};

pub struct ProgressionPlugin;

impl Plugin for ProgressionPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<WaveState>()
            .add_systems(OnEnter(GameState::InGame), reset_wave_state)
            .add_systems(
                FixedUpdate,
                advance_progression.in_set(GameplaySet::Progression),
            );
    }
}
