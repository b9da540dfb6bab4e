//! World plugin - level loading, construction and cleanup.

use bevy::prelude::*;

use crate::combat::WeaponRegistry;
use crate::core::{GameConfig, GameState};
use crate::player::EquippedWeapon;
use crate::rendering::{AnimationCatalog, VisualConfig};

use super::builder::build_level_from_data;
use super::components::LevelEntity;
use super::data::{setup_level_loading, CurrentLevel};

/// World plugin - handles level loading and world setup.
pub struct WorldPlugin;

impl Plugin for WorldPlugin {
    fn build(&self, app: &mut App) {
        setup_level_loading(app);

        app.add_systems(OnEnter(GameState::InGame), setup_level)
            .add_systems(OnExit(GameState::InGame), cleanup_level);
    }
}

/// Set up the level from data.
pub fn setup_level(
    mut commands: Commands,
    current_level: Res<CurrentLevel>,
    config: Res<GameConfig>,
    weapons: Res<WeaponRegistry>,
    catalog: Res<AnimationCatalog>,
    visual: Res<VisualConfig>,
) {
    let level = &current_level.definition;
    let Some(definition) = weapons.get(&config.starting_weapon) else {
        error!("Starting weapon '{}' not in the weapon table", config.starting_weapon);
        return;
    };
    let weapon = EquippedWeapon {
        id: config.starting_weapon.clone(),
        damage: definition.damage,
        cooldown: definition.cooldown(),
    };

    info!("Building level: {}", level.name);

    build_level_from_data(
        &mut commands,
        &mut rand::thread_rng(),
        level,
        &config,
        weapon,
        &catalog,
        &visual,
    );
}

/// Clean up level entities when leaving InGame state.
fn cleanup_level(mut commands: Commands, level_query: Query<Entity, With<LevelEntity>>) {
    for entity in level_query.iter() {
        commands.entity(entity).despawn_recursive();
    }
}
