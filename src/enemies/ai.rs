//! Enemy AI behavior systems.
//!
//! Each tick an enemy first reacts to hits, moves, re-arms its cooldowns and
//! checks for death. Then it re-evaluates its state against the player's
//! position and acts on it.

use std::time::Duration;

use bevy::prelude::*;

use super::components::{AiState, AttackCooldown, Enemy, EnemyStats};
use crate::combat::{Health, Vulnerability};
use crate::core::{PlayerDamageEvent, SoundCue};
use crate::player::Player;
use crate::progression::WaveState;
use crate::rendering::Animator;
use crate::world::{move_body, Body, Movement, Obstacle, SpriteType};

/// An incoming attack.
#[derive(Debug, Clone, Copy)]
pub struct Hit {
    /// Centre of the attacking entity, in map pixels
    pub attacker: Vec2,
    pub kind: SpriteType,
    pub power: f32,
    pub at: Duration,
}

/// Distance and unit direction from `from` to `to` (zero when they coincide).
pub fn direction_to(from: Vec2, to: Vec2) -> (f32, Vec2) {
    let offset = to - from;
    let distance = offset.length();
    if distance > 0.0 {
        (distance, offset / distance)
    } else {
        (0.0, Vec2::ZERO)
    }
}

/// Apply an attack to an enemy. Ignored while the enemy is invincible.
///
/// An accepted hit points the enemy at the attacker (the hit reaction then
/// pushes it the other way), subtracts the attack power for weapon hits and
/// starts the invincibility window. Returns whether the hit was accepted.
pub fn take_damage(
    health: &mut Health,
    vulnerability: &mut Vulnerability,
    movement: &mut Movement,
    center: Vec2,
    hit: &Hit,
) -> bool {
    if !vulnerability.try_hit(hit.at) {
        return false;
    }
    movement.direction = direction_to(center, hit.attacker).1;
    if hit.kind == SpriteType::Weapon {
        health.take_damage(hit.power);
    }
    true
}

/// Invincible enemies are pushed against their direction, scaled by resistance.
pub fn hit_reaction(mut query: Query<(&Vulnerability, &EnemyStats, &mut Movement), With<Enemy>>) {
    for (vulnerability, stats, mut movement) in query.iter_mut() {
        if !vulnerability.is_vulnerable() {
            movement.direction *= -stats.resistance;
        }
    }
}

pub fn move_enemies(
    obstacles: Query<&Body, (With<Obstacle>, Without<Enemy>)>,
    mut query: Query<(&mut Body, &mut Movement, &EnemyStats), With<Enemy>>,
) {
    let obstacle_boxes: Vec<Rect> = obstacles.iter().map(|body| body.hitbox).collect();
    for (mut body, mut movement, stats) in query.iter_mut() {
        move_body(&mut body, &mut movement.direction, stats.speed, &obstacle_boxes);
    }
}

pub fn enemy_cooldowns(
    time: Res<Time>,
    mut query: Query<(&mut AttackCooldown, &mut Vulnerability), With<Enemy>>,
) {
    let now = time.elapsed();
    for (mut attack, mut vulnerability) in query.iter_mut() {
        attack.0.refresh(now);
        vulnerability.refresh(now);
    }
}

/// Remove dead enemies from the roster and from the world.
pub fn enemy_deaths(
    mut commands: Commands,
    mut wave: ResMut<WaveState>,
    query: Query<(Entity, &Enemy, &Health)>,
    mut sounds: EventWriter<SoundCue>,
) {
    for (entity, enemy, health) in query.iter() {
        if !health.is_dead() {
            continue;
        }
        wave.remove_kind(&enemy.kind);
        commands.entity(entity).despawn_recursive();
        sounds.send(SoundCue::EnemyDeath);
    }
}

/// Switch between moving and attacking based on distance to the player.
///
/// Recomputed every tick, so an enemy on the radius boundary may flicker.
pub fn update_ai_state(
    player_query: Query<&Body, (With<Player>, Without<Enemy>)>,
    mut enemy_query: Query<(&Body, &EnemyStats, &mut AiState), With<Enemy>>,
) {
    let Ok(player_body) = player_query.get_single() else {
        return;
    };
    let target = player_body.center();

    for (body, stats, mut state) in enemy_query.iter_mut() {
        let (distance, _) = direction_to(body.center(), target);
        let next = AiState::for_distance(distance, stats.attack_radius);
        if *state != next {
            *state = next;
        }
    }
}

/// Attack: damage the player every tick. Move: head for the player.
pub fn enemy_actions(
    time: Res<Time>,
    player_query: Query<&Body, (With<Player>, Without<Enemy>)>,
    mut enemy_query: Query<(&Body, &EnemyStats, &AiState, &mut AttackCooldown, &mut Movement), With<Enemy>>,
    mut damage: EventWriter<PlayerDamageEvent>,
) {
    let Ok(player_body) = player_query.get_single() else {
        return;
    };
    let target = player_body.center();
    let now = time.elapsed();

    for (body, stats, state, mut attack, mut movement) in enemy_query.iter_mut() {
        match state {
            AiState::Attack => {
                attack.0.trigger(now);
                damage.send(PlayerDamageEvent { amount: stats.damage });
            }
            AiState::Move => {
                movement.direction = direction_to(body.center(), target).1;
            }
        }
    }
}

/// Point each enemy's animator at `enemies/<kind>/<state>`.
pub fn sync_enemy_animation(mut query: Query<(&Enemy, &AiState, &mut Animator), Changed<AiState>>) {
    for (enemy, state, mut animator) in query.iter_mut() {
        animator.sequence = format!("enemies/{}/{}", enemy.kind, state.as_str());
    }
}
