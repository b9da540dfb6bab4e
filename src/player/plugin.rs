//! Player plugin - input, movement and attack cycle.

use bevy::prelude::*;

use super::control;

/// Player plugin - handles player input, movement and status.
///
/// The player itself is spawned by the world builder.
pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        control::setup_control_systems(app);
    }
}
