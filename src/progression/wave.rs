//! Session state shared by the orchestrator, the AI and the HUD.

use bevy::prelude::*;
use rand::seq::SliceRandom;
use rand::Rng;

/// Level number, wave size and the kinds of the enemies still alive.
///
/// Reset every time a game starts. Mutated only when a wave spawns
/// (`begin_next_wave`) and when an enemy dies (`remove_kind`).
#[derive(Resource, Debug, Default, Clone, PartialEq)]
pub struct WaveState {
    /// Number of waves started so far
    pub level: u32,
    /// Enemies in the current wave
    pub wave_size: u32,
    /// One entry per living enemy
    pub roster: Vec<String>,
}

impl WaveState {
    pub fn active_count(&self) -> usize {
        self.roster.len()
    }

    pub fn is_cleared(&self) -> bool {
        self.roster.is_empty()
    }

    /// Advance to the next level and roll its roster from `kinds`.
    ///
    /// Returns the new roster. With no kinds to pick from the roster stays
    /// empty, but the level still advances.
    pub fn begin_next_wave(&mut self, rng: &mut impl Rng, kinds: &[String], increment: u32) -> Vec<String> {
        self.level += 1;
        self.wave_size += increment;
        self.roster = (0..self.wave_size)
            .filter_map(|_| kinds.choose(rng).cloned())
            .collect();
        self.roster.clone()
    }

    /// Drop one enemy of `kind` from the roster.
    pub fn remove_kind(&mut self, kind: &str) {
        if let Some(index) = self.roster.iter().position(|k| k == kind) {
            self.roster.remove(index);
        }
    }
}
