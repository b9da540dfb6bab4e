//! Weapon data loading from RON files.

use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use bevy::prelude::*;
use serde::Deserialize;

use crate::core::{abort_loading, read_ron_dir, DataLoadError, GameConfig, GameState, LoadingSet};

const WEAPONS_DIR: &str = "assets/data/weapons";

fn default_weapon_size() -> (f32, f32) {
    (64.0, 64.0)
}

/// Weapon definition loaded from RON file.
#[derive(Deserialize, Clone, Debug)]
pub struct WeaponDefinition {
    pub name: String,
    /// Added to the player's reactivation cooldown, in milliseconds
    pub cooldown_ms: u64,
    /// Added to the player's attack stat
    pub damage: f32,
    /// Width and height when facing left or right; swapped for up and down
    #[serde(default = "default_weapon_size")]
    pub size: (f32, f32),
}

impl WeaponDefinition {
    pub fn cooldown(&self) -> Duration {
        Duration::from_millis(self.cooldown_ms)
    }
}

/// Resource holding all loaded weapon definitions.
#[derive(Resource, Debug, Default)]
pub struct WeaponRegistry {
    pub definitions: HashMap<String, WeaponDefinition>,
}

impl WeaponRegistry {
    /// Get a weapon definition by id.
    pub fn get(&self, id: &str) -> Option<&WeaponDefinition> {
        self.definitions.get(id)
    }

    /// Read the weapon directory and check that `starting_weapon` exists.
    pub fn load(dir: &Path, starting_weapon: &str) -> Result<Self, DataLoadError> {
        let definitions = read_ron_dir::<WeaponDefinition>(dir)?;
        if !definitions.contains_key(starting_weapon) {
            return Err(DataLoadError::UnknownWeapon(starting_weapon.to_string()));
        }
        Ok(Self { definitions })
    }
}

pub fn setup_weapon_loading(app: &mut App) {
    app.add_systems(
        OnEnter(GameState::Loading),
        load_weapon_definitions.in_set(LoadingSet::Tables),
    );
}

/// Load all weapon definitions from the assets/data/weapons/ directory.
fn load_weapon_definitions(
    mut commands: Commands,
    config: Res<GameConfig>,
    mut exit: EventWriter<AppExit>,
) {
    match WeaponRegistry::load(Path::new(WEAPONS_DIR), &config.starting_weapon) {
        Ok(registry) => {
            for (id, weapon) in &registry.definitions {
                info!(
                    "Loaded weapon definition: {} ({}, damage {}, cooldown {}ms)",
                    weapon.name, id, weapon.damage, weapon.cooldown_ms
                );
            }
            commands.insert_resource(registry);
        }
        Err(e) => abort_loading(&e, &mut exit),
    }
}
