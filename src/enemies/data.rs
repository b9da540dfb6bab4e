//! Enemy data loading from RON files.

use std::collections::HashMap;
use std::path::Path;

use bevy::prelude::*;
use serde::Deserialize;

use super::components::EnemyStats;
use crate::core::{abort_loading, read_ron_dir, DataLoadError, GameState, LoadingSet};

const ENEMIES_DIR: &str = "assets/data/enemies";

/// Enemy definition loaded from RON file.
#[derive(Deserialize, Clone, Debug)]
pub struct EnemyDefinition {
    pub name: String,
    pub health: f32,
    pub damage: f32,
    /// Pixels per tick
    pub speed: f32,
    pub resistance: f32,
    pub attack_radius: f32,
}

impl EnemyDefinition {
    /// Convert to EnemyStats component.
    pub fn to_stats(&self) -> EnemyStats {
        EnemyStats {
            damage: self.damage,
            speed: self.speed,
            resistance: self.resistance,
            attack_radius: self.attack_radius,
        }
    }
}

/// Resource holding all loaded enemy definitions.
#[derive(Resource, Debug, Default)]
pub struct EnemyRegistry {
    pub definitions: HashMap<String, EnemyDefinition>,
}

impl EnemyRegistry {
    /// Get an enemy definition by type name.
    pub fn get(&self, enemy_type: &str) -> Option<&EnemyDefinition> {
        self.definitions.get(enemy_type)
    }

    /// All enemy type names, sorted so seeded rolls are reproducible.
    pub fn kinds(&self) -> Vec<String> {
        let mut kinds: Vec<String> = self.definitions.keys().cloned().collect();
        kinds.sort();
        kinds
    }

    pub fn load(dir: &Path) -> Result<Self, DataLoadError> {
        Ok(Self {
            definitions: read_ron_dir(dir)?,
        })
    }
}

pub fn setup_enemy_loading(app: &mut App) {
    app.add_systems(
        OnEnter(GameState::Loading),
        load_enemy_definitions.in_set(LoadingSet::Tables),
    );
}

/// Load all enemy definitions from the assets/data/enemies/ directory.
fn load_enemy_definitions(mut commands: Commands, mut exit: EventWriter<AppExit>) {
    match EnemyRegistry::load(Path::new(ENEMIES_DIR)) {
        Ok(registry) => {
            for (enemy_type, definition) in &registry.definitions {
                info!("Loaded enemy definition: {} ({})", definition.name, enemy_type);
            }
            info!("Loaded {} enemy definitions", registry.definitions.len());
            commands.insert_resource(registry);
        }
        Err(e) => abort_loading(&e, &mut exit),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_definition() {
        let definition: EnemyDefinition = ron::from_str(
            r#"(name: "Tomato", health: 100.0, damage: 12.0, speed: 3.0, resistance: 5.0, attack_radius: 50.0)"#,
        )
        .unwrap();
        let stats = definition.to_stats();
        assert_eq!(stats.damage, 12.0);
        assert_eq!(stats.attack_radius, 50.0);
    }

    #[test]
    fn kinds_are_sorted() {
        let mut registry = EnemyRegistry::default();
        for name in ["tomato", "devil", "slug"] {
            registry.definitions.insert(
                name.to_string(),
                EnemyDefinition {
                    name: name.to_string(),
                    health: 1.0,
                    damage: 1.0,
                    speed: 1.0,
                    resistance: 1.0,
                    attack_radius: 1.0,
                },
            );
        }
        assert_eq!(registry.kinds(), vec!["devil", "slug", "tomato"]);
    }
}
