//! Global events used for cross-system communication.
//!
//! Gameplay entities never reference each other directly. An enemy in
//! attack range sends a `PlayerDamageEvent`, and the combat systems decide
//! whether the player actually takes it. Sound cues travel the same way so
//! the simulation never touches the audio backend.

use bevy::prelude::*;

/// Sent every tick an enemy holds its attack state.
///
/// The receiver enforces the player's invincibility window, not the sender.
#[derive(Event, Debug, Clone, Copy)]
pub struct PlayerDamageEvent {
    /// Raw damage from the enemy's balance table
    pub amount: f32,
}

/// Audible moments in the game.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundCue {
    /// The player's attack window opened
    WeaponSwing,
    EnemyHit,
    EnemyDeath,
    PlayerHit,
    Pickup,
    Victory,
    Defeat,
}
