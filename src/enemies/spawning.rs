//! Enemy spawning.
//!
//! Enemies are never placed by the map. Each wave spawns its roster at
//! random positions inside the configured spawn area.

use bevy::prelude::*;
use rand::Rng;

use super::components::{AiState, AttackCooldown, Enemy, ENEMY_HITBOX_INFLATION, ENEMY_SIZE};
use super::data::{EnemyDefinition, EnemyRegistry};
use crate::combat::{Health, Vulnerability};
use crate::core::{GameConfig, SpawnArea};
use crate::rendering::{body_translation, rgb, AnimationCatalog, Animator, VisualConfig};
use crate::world::{Body, LevelEntity, Movement, SpriteType};

/// Random top-left corner inside the spawn area (bounds inclusive).
pub fn random_spawn_point(rng: &mut impl Rng, area: &SpawnArea) -> Vec2 {
    Vec2::new(
        rng.gen_range(area.min.0..=area.max.0),
        rng.gen_range(area.min.1..=area.max.1),
    )
}

/// Spawn a single enemy of `kind` with its visual rect at `top_left`.
pub fn spawn_enemy(
    commands: &mut Commands,
    kind: &str,
    definition: &EnemyDefinition,
    top_left: Vec2,
    config: &GameConfig,
    catalog: &AnimationCatalog,
    visual: &VisualConfig,
) -> Entity {
    let body = Body::new(top_left, ENEMY_SIZE, ENEMY_HITBOX_INFLATION);
    let state = AiState::default();
    let sequence = format!("enemies/{}/{}", kind, state.as_str());
    let sprite = catalog.sequence_sprite(&sequence, ENEMY_SIZE, rgb(visual.enemy_placeholder));

    commands
        .spawn((
            Enemy {
                kind: kind.to_string(),
            },
            SpriteType::Enemy,
            state,
            definition.to_stats(),
            Health::new(definition.health),
            Vulnerability::new(config.enemy_invincibility()),
            AttackCooldown::new(config.enemy_attack_cooldown()),
            Movement::default(),
            Animator::new(sequence, config.animation_speed),
            sprite,
            Transform::from_translation(body_translation(&body)),
            body,
            LevelEntity,
        ))
        .id()
}

/// Spawn one enemy per roster entry at random positions.
///
/// Kinds missing from the registry are skipped with a warning.
pub fn spawn_wave(
    commands: &mut Commands,
    rng: &mut impl Rng,
    roster: &[String],
    registry: &EnemyRegistry,
    config: &GameConfig,
    catalog: &AnimationCatalog,
    visual: &VisualConfig,
) -> Vec<Entity> {
    let mut spawned = Vec::with_capacity(roster.len());
    for kind in roster {
        let Some(definition) = registry.get(kind) else {
            warn!("Unknown enemy kind in wave roster: {}", kind);
            continue;
        };
        let top_left = random_spawn_point(rng, &config.spawn_area);
        spawned.push(spawn_enemy(commands, kind, definition, top_left, config, catalog, visual));
    }
    spawned
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn spawn_points_stay_in_area() {
        let area = SpawnArea {
            min: (1100.0, 600.0),
            max: (2500.0, 2900.0),
        };
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let point = random_spawn_point(&mut rng, &area);
            assert!((1100.0..=2500.0).contains(&point.x));
            assert!((600.0..=2900.0).contains(&point.y));
        }
    }
}
