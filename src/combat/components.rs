//! Combat-related components.

use std::time::Duration;

use bevy::prelude::*;

use crate::core::Cooldown;

/// Component for entities that can take damage.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Health {
    pub current: f32,
    pub maximum: f32,
}

impl Health {
    pub fn new(max: f32) -> Self {
        Self {
            current: max,
            maximum: max,
        }
    }

    /// Health starting below its ceiling.
    pub fn with_current(current: f32, maximum: f32) -> Self {
        Self { current, maximum }
    }

    pub fn take_damage(&mut self, amount: f32) -> f32 {
        let actual = amount.min(self.current);
        self.current -= actual;
        actual
    }

    pub fn heal(&mut self, amount: f32) -> f32 {
        let actual = amount.min(self.maximum - self.current).max(0.0);
        self.current += actual;
        actual
    }

    pub fn is_dead(&self) -> bool {
        self.current <= 0.0
    }
}

/// Post-hit invincibility window.
///
/// A hit is only accepted while vulnerable; accepting it starts the window.
#[derive(Component, Debug, Clone, Copy)]
pub struct Vulnerability {
    window: Cooldown,
}

impl Vulnerability {
    pub fn new(invincibility: Duration) -> Self {
        Self {
            window: Cooldown::new(invincibility),
        }
    }

    pub fn is_vulnerable(&self) -> bool {
        self.window.is_ready()
    }

    /// Accept a hit at `now` if vulnerable. Returns whether it was accepted.
    pub fn try_hit(&mut self, now: Duration) -> bool {
        if !self.is_vulnerable() {
            return false;
        }
        self.window.trigger(now);
        true
    }

    /// End the invincibility window once it has elapsed.
    pub fn refresh(&mut self, now: Duration) {
        self.window.refresh(now);
    }
}

/// Which of the two weapon instances an entity is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WeaponSlot {
    /// On the player's facing side
    Primary,
    /// Horizontally flipped twin on the opposite side
    Mirrored,
}

/// A live weapon hitbox, present only while the player's attack window is open.
#[derive(Component, Debug, Clone)]
pub struct Weapon {
    pub id: String,
    pub slot: WeaponSlot,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn damage_never_goes_below_zero() {
        let mut health = Health::new(70.0);
        assert_eq!(health.take_damage(100.0), 70.0);
        assert_eq!(health.current, 0.0);
        assert!(health.is_dead());
    }

    #[test]
    fn heal_stops_at_maximum() {
        let mut health = Health::with_current(430.0, 450.0);
        assert_eq!(health.heal(30.0), 20.0);
        assert_eq!(health.current, 450.0);
        assert_eq!(health.heal(30.0), 0.0);
    }

    #[test]
    fn only_one_hit_per_window() {
        let mut vulnerability = Vulnerability::new(Duration::from_millis(300));
        assert!(vulnerability.try_hit(Duration::from_millis(0)));
        assert!(!vulnerability.try_hit(Duration::from_millis(100)));

        vulnerability.refresh(Duration::from_millis(299));
        assert!(!vulnerability.is_vulnerable());
        vulnerability.refresh(Duration::from_millis(300));
        assert!(vulnerability.try_hit(Duration::from_millis(301)));
    }
}
