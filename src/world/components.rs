//! Components tagging the static parts of the map.

use bevy::prelude::*;

/// Gameplay role of a sprite, used to dispatch collision pairs.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpriteType {
    /// Boundary collider with no image
    Invisible,
    /// Decorative collider
    Object,
    /// Collectible that heals the player
    Food,
    Weapon,
    Enemy,
    Player,
}

/// A static map tile.
#[derive(Component, Debug, Clone, Copy)]
pub struct Tile {
    pub column: usize,
    pub row: usize,
}

/// Blocks movement. Players and enemies resolve against every obstacle hitbox.
#[derive(Component, Debug, Default)]
pub struct Obstacle;

/// Heals the player on contact and then disappears.
#[derive(Component, Debug, Default)]
pub struct Pickup;

/// The floor image under the whole map.
#[derive(Component, Debug, Default)]
pub struct Floor;

/// Everything spawned for a level run; despawned when leaving the game.
#[derive(Component, Debug, Default)]
pub struct LevelEntity;
