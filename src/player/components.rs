//! Player-related components.

use std::time::Duration;

use bevy::prelude::*;
use serde::Deserialize;

/// Marker component for the player entity.
#[derive(Component, Debug, Default)]
pub struct Player;

/// The three upgradeable player stats, in menu order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatKind {
    Health,
    Attack,
    Speed,
}

impl StatKind {
    pub const ALL: [StatKind; 3] = [StatKind::Health, StatKind::Attack, StatKind::Speed];

    pub fn label(&self) -> &'static str {
        match self {
            StatKind::Health => "health",
            StatKind::Attack => "attack",
            StatKind::Speed => "speed",
        }
    }
}

/// One value per stat.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct StatBlock {
    pub health: f32,
    pub attack: f32,
    pub speed: f32,
}

impl StatBlock {
    pub fn get(&self, kind: StatKind) -> f32 {
        match kind {
            StatKind::Health => self.health,
            StatKind::Attack => self.attack,
            StatKind::Speed => self.speed,
        }
    }

    pub fn get_mut(&mut self, kind: StatKind) -> &mut f32 {
        match kind {
            StatKind::Health => &mut self.health,
            StatKind::Attack => &mut self.attack,
            StatKind::Speed => &mut self.speed,
        }
    }
}

/// Player's upgradeable stats and their ceilings.
#[derive(Component, Debug, Clone, Copy)]
pub struct PlayerStats {
    pub current: StatBlock,
    pub max: StatBlock,
}

impl PlayerStats {
    /// Multiply a stat by `growth`, clamped to its ceiling. Returns the new value.
    pub fn upgrade(&mut self, kind: StatKind, growth: f32) -> f32 {
        let ceiling = self.max.get(kind);
        let value = self.current.get_mut(kind);
        *value = (*value * growth).min(ceiling);
        *value
    }

    /// Damage dealt per accepted hit: attack stat plus weapon damage.
    pub fn attack_power(&self, weapon_damage: f32) -> f32 {
        self.current.attack + weapon_damage
    }
}

/// Whether the upgrade for the wave just cleared has been chosen.
///
/// Cleared every time a new wave spawns.
#[derive(Component, Debug, Default)]
pub struct UpgradeState {
    pub performed: bool,
}

/// The weapon the player attacks with.
#[derive(Component, Debug, Clone)]
pub struct EquippedWeapon {
    pub id: String,
    pub damage: f32,
    pub cooldown: Duration,
}

/// Direction the player sprite faces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Facing {
    Up,
    Down,
    Left,
    #[default]
    Right,
}

impl Facing {
    pub fn as_str(&self) -> &'static str {
        match self {
            Facing::Up => "up",
            Facing::Down => "down",
            Facing::Left => "left",
            Facing::Right => "right",
        }
    }
}

/// What the player is doing, the suffix of the animation name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Activity {
    Moving,
    #[default]
    Idle,
    Attack,
}

/// Facing plus activity; selects the animation sequence.
#[derive(Component, Debug, Clone, Copy, PartialEq, Default)]
pub struct Status {
    pub facing: Facing,
    pub activity: Activity,
}

impl Status {
    /// Recompute the activity from this tick's movement and attack state.
    ///
    /// Attacking wins over idle and moving.
    pub fn update(&mut self, direction: Vec2, attacking: bool) {
        self.activity = if attacking {
            Activity::Attack
        } else if direction == Vec2::ZERO {
            Activity::Idle
        } else {
            Activity::Moving
        };
    }

    /// Animation name such as `right`, `up_idle` or `left_attack`.
    pub fn key(&self) -> String {
        match self.activity {
            Activity::Moving => self.facing.as_str().to_string(),
            Activity::Idle => format!("{}_idle", self.facing.as_str()),
            Activity::Attack => format!("{}_attack", self.facing.as_str()),
        }
    }
}

/// Result of advancing the attack cycle by one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttackPhase {
    Unchanged,
    /// The attack window just opened
    Opened,
    /// The attack window just closed and the reactivation cooldown started
    Closed,
}

/// Automatic attack cycle: an attack window, then a reactivation cooldown.
///
/// Starts inside an attack window. The window's start time is taken from the
/// first tick.
#[derive(Component, Debug, Clone, Copy)]
pub struct AttackCycle {
    attacking: bool,
    since: Option<Duration>,
}

impl Default for AttackCycle {
    fn default() -> Self {
        Self {
            attacking: true,
            since: None,
        }
    }
}

impl AttackCycle {
    pub fn is_attacking(&self) -> bool {
        self.attacking
    }

    pub fn tick(&mut self, now: Duration, duration: Duration, reactivation: Duration) -> AttackPhase {
        let since = *self.since.get_or_insert(now);
        let elapsed = now.saturating_sub(since);

        if !self.attacking && elapsed >= reactivation {
            self.attacking = true;
            self.since = Some(now);
            return AttackPhase::Opened;
        }

        if self.attacking && elapsed > duration {
            self.attacking = false;
            self.since = Some(now);
            return AttackPhase::Closed;
        }

        AttackPhase::Unchanged
    }
}
