//! Enemy plugin - registers all enemy systems.

use bevy::prelude::*;

use super::ai;
use super::data::setup_enemy_loading;
use crate::core::GameplaySet;

/// Enemy plugin - handles enemy tables, movement, AI and death.
pub struct EnemyPlugin;

impl Plugin for EnemyPlugin {
    fn build(&self, app: &mut App) {
        setup_enemy_loading(app);

        app
            // Reactions to last tick's hits, then movement and death
            .add_systems(
                FixedUpdate,
                (
                    ai::hit_reaction,
                    ai::move_enemies,
                    ai::enemy_cooldowns,
                    ai::enemy_deaths,
                )
                    .chain()
                    .in_set(GameplaySet::Enemies),
            )
            // Decisions against the player's new position
            .add_systems(
                FixedUpdate,
                (
                    ai::update_ai_state,
                    ai::enemy_actions,
                    ai::sync_enemy_animation,
                )
                    .chain()
                    .in_set(GameplaySet::EnemyAi),
            );
    }
}
