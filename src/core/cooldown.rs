//! Polled wall-clock cooldowns.
//!
//! A cooldown stores when it was triggered and is compared against the
//! clock every tick. Nothing is scheduled: whoever owns the cooldown calls
//! `refresh` once per tick and reads `is_ready`.

use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cooldown {
    duration: Duration,
    triggered_at: Option<Duration>,
}

impl Cooldown {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            triggered_at: None,
        }
    }

    pub fn from_millis(millis: u64) -> Self {
        Self::new(Duration::from_millis(millis))
    }

    /// Start (or restart) the cooldown at `now`.
    pub fn trigger(&mut self, now: Duration) {
        self.triggered_at = Some(now);
    }

    /// True when the cooldown is not running.
    pub fn is_ready(&self) -> bool {
        self.triggered_at.is_none()
    }

    /// Re-arm once `duration` has elapsed since the trigger.
    ///
    /// Returns true on the tick the cooldown becomes ready again.
    pub fn refresh(&mut self, now: Duration) -> bool {
        match self.triggered_at {
            Some(at) if now.saturating_sub(at) >= self.duration => {
                self.triggered_at = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn starts_ready() {
        assert!(Cooldown::from_millis(300).is_ready());
    }

    #[test]
    fn rearms_only_after_duration() {
        let mut cd = Cooldown::from_millis(300);
        cd.trigger(ms(1_000));
        assert!(!cd.is_ready());

        assert!(!cd.refresh(ms(1_299)));
        assert!(!cd.is_ready());

        assert!(cd.refresh(ms(1_300)));
        assert!(cd.is_ready());

        // Already ready: nothing to re-arm.
        assert!(!cd.refresh(ms(5_000)));
    }

    #[test]
    fn retrigger_restarts_window() {
        let mut cd = Cooldown::from_millis(400);
        cd.trigger(ms(0));
        cd.trigger(ms(350));
        assert!(!cd.refresh(ms(500)));
        assert!(cd.refresh(ms(750)));
    }
}
