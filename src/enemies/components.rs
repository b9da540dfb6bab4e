//! Enemy-related components.

use std::time::Duration;

use bevy::prelude::*;

use crate::core::Cooldown;

/// Visual size of every enemy sprite.
pub const ENEMY_SIZE: Vec2 = Vec2::splat(64.0);
/// Total shrink applied to the visual rect to get the hitbox.
pub const ENEMY_HITBOX_INFLATION: Vec2 = Vec2::new(0.0, -10.0);

/// Marker component for all enemies, carrying the balance-table key.
#[derive(Component, Debug, Clone)]
pub struct Enemy {
    pub kind: String,
}

/// AI state machine for enemy behavior.
#[derive(Component, Default, PartialEq, Eq, Clone, Copy, Debug)]
pub enum AiState {
    /// Walking toward the player
    #[default]
    Move,
    /// Holding ground and damaging the player
    Attack,
}

impl AiState {
    /// Pick the state for a distance to the player. The radius is inclusive.
    pub fn for_distance(distance: f32, attack_radius: f32) -> Self {
        if distance <= attack_radius {
            AiState::Attack
        } else {
            AiState::Move
        }
    }

    /// Animation folder name for this state.
    pub fn as_str(&self) -> &'static str {
        match self {
            AiState::Move => "move",
            AiState::Attack => "attack",
        }
    }
}

/// Enemy stats copied from the balance table at spawn.
#[derive(Component, Debug, Clone, Copy)]
pub struct EnemyStats {
    pub damage: f32,
    pub speed: f32,
    /// Knockback multiplier while invincible
    pub resistance: f32,
    pub attack_radius: f32,
}

/// Time since the last attack.
///
/// Tracked for animation and balance purposes; damage to the player is
/// limited by the player's invincibility, not by this cooldown.
#[derive(Component, Debug, Clone, Copy)]
pub struct AttackCooldown(pub Cooldown);

impl AttackCooldown {
    pub fn new(duration: Duration) -> Self {
        Self(Cooldown::new(duration))
    }

    pub fn can_attack(&self) -> bool {
        self.0.is_ready()
    }
}
