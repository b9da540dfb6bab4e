//! Combat plugin - weapons, hits, pickups and damage to the player.

use bevy::prelude::*;

use super::data;
use super::systems;
use super::weapon;

/// Combat plugin - handles all combat systems.
pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        // Load the weapon table
        data::setup_weapon_loading(app);

        // Spawn and place weapons while the attack window is open
        weapon::setup_weapon_systems(app);

        // Resolve collision pairs
        systems::setup_combat_systems(app);
    }
}
