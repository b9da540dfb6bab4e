//! Level construction from data definitions.

use bevy::prelude::*;
use rand::seq::SliceRandom;
use rand::Rng;

use super::components::{Floor, LevelEntity, Obstacle, Pickup, SpriteType, Tile};
use super::data::LevelDefinition;
use super::spatial::Body;
use crate::core::GameConfig;
use crate::player::{spawn_player, EquippedWeapon};
use crate::rendering::{body_translation, rgb, AnimationCatalog, VisualConfig, FLOOR_DEPTH};

/// Hitbox shrink shared by every static tile.
pub const TILE_HITBOX_INFLATION: Vec2 = Vec2::new(0.0, -10.0);

/// Build a level from a level definition.
///
/// Spawns the floor, every boundary/object/food tile and the player.
/// Returns the player entity.
pub fn build_level_from_data(
    commands: &mut Commands,
    rng: &mut impl Rng,
    level: &LevelDefinition,
    config: &GameConfig,
    weapon: EquippedWeapon,
    catalog: &AnimationCatalog,
    visual: &VisualConfig,
) -> Entity {
    let tile_size = config.tile_size;

    spawn_floor(commands, level, tile_size, catalog, visual);
    build_tiles(commands, rng, level, tile_size, catalog, visual);

    let (column, row) = level.player_spawn;
    let spawn = LevelDefinition::grid_to_map(column, row, tile_size);
    spawn_player(commands, spawn, config, weapon, catalog, visual)
}

/// The floor image is drawn with its top-left at the map origin.
fn spawn_floor(
    commands: &mut Commands,
    level: &LevelDefinition,
    tile_size: f32,
    catalog: &AnimationCatalog,
    visual: &VisualConfig,
) {
    let size = level.pixel_size(tile_size);
    let image = level.floor.as_deref().and_then(|key| catalog.image(key));
    if image.is_none() {
        warn!("Floor image {:?} not found, using a placeholder", level.floor);
    }

    commands.spawn((
        Floor,
        AnimationCatalog::sprite_or_placeholder(image, size, rgb(visual.floor_placeholder)),
        Transform::from_xyz(size.x / 2.0, -size.y / 2.0, FLOOR_DEPTH),
        LevelEntity,
    ));
}

/// Spawn a tile for every non-empty cell of the three static layers.
fn build_tiles(
    commands: &mut Commands,
    rng: &mut impl Rng,
    level: &LevelDefinition,
    tile_size: f32,
    catalog: &AnimationCatalog,
    visual: &VisualConfig,
) {
    let size = Vec2::splat(tile_size);
    let object_images = catalog.frames("objects");
    let food_images = catalog.frames("food");

    for (column, row, _) in level.boundary.occupied() {
        let body = Body::new(LevelDefinition::grid_to_map(column, row, tile_size), size, TILE_HITBOX_INFLATION);
        commands.spawn((Tile { column, row }, SpriteType::Invisible, Obstacle, body, LevelEntity));
    }

    for (column, row, token) in level.objects.occupied() {
        let body = Body::new(LevelDefinition::grid_to_map(column, row, tile_size), size, TILE_HITBOX_INFLATION);
        // The token indexes the sorted object images
        let image = usize::try_from(token)
            .ok()
            .and_then(|index| object_images.get(index))
            .cloned();
        commands.spawn((
            Tile { column, row },
            SpriteType::Object,
            Obstacle,
            AnimationCatalog::sprite_or_placeholder(image, size, rgb(visual.object_placeholder)),
            Transform::from_translation(body_translation(&body)),
            body,
            LevelEntity,
        ));
    }

    for (column, row, _) in level.food.occupied() {
        let body = Body::new(LevelDefinition::grid_to_map(column, row, tile_size), size, TILE_HITBOX_INFLATION);
        let image = food_images.choose(rng).cloned();
        commands.spawn((
            Tile { column, row },
            SpriteType::Food,
            Pickup,
            AnimationCatalog::sprite_or_placeholder(image, size, rgb(visual.food_placeholder)),
            Transform::from_translation(body_translation(&body)),
            body,
            LevelEntity,
        ));
    }
}
