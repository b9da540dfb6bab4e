//! Win/loss detection and wave advancement.

use bevy::prelude::*;

use super::wave::WaveState;
use crate::combat::Health;
use crate::core::{GameConfig, GameState, PlayState};
use crate::enemies::{spawn_wave, EnemyRegistry};
use crate::player::{Player, UpgradeState};
use crate::rendering::{AnimationCatalog, VisualConfig};

/// What the orchestrator decided this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaveStep {
    /// Keep fighting
    Continue,
    /// Player died
    Defeat,
    /// Wave cleared, the upgrade menu has to run first
    AwaitUpgrade,
    /// Wave cleared and upgrade done
    SpawnWave,
    /// Target level reached
    Victory,
}

/// Decide the next step from the player's health and the session state.
///
/// Death is checked before anything else, and a new wave is rolled before
/// the victory check, so the victory fires on the tick the target level's
/// wave would start.
pub fn next_step(player_health: f32, upgrade_performed: bool, wave: &WaveState, victory_level: u32) -> WaveStep {
    if player_health <= 0.0 {
        return WaveStep::Defeat;
    }
    if wave.is_cleared() {
        if !upgrade_performed {
            return WaveStep::AwaitUpgrade;
        }
        return WaveStep::SpawnWave;
    }
    if wave.level >= victory_level {
        return WaveStep::Victory;
    }
    WaveStep::Continue
}

pub fn reset_wave_state(mut commands: Commands) {
    commands.insert_resource(WaveState::default());
}

/// Run the orchestrator for one tick.
#[allow(clippy::too_many_arguments)]
pub fn advance_progression(
    mut commands: Commands,
    config: Res<GameConfig>,
    registry: Res<EnemyRegistry>,
    catalog: Res<AnimationCatalog>,
    visual: Res<VisualConfig>,
    mut wave: ResMut<WaveState>,
    mut player_query: Query<(&Health, &mut UpgradeState), With<Player>>,
    mut next_game: ResMut<NextState<GameState>>,
    mut next_play: ResMut<NextState<PlayState>>,
) {
    let Ok((health, mut upgrade)) = player_query.get_single_mut() else {
        return;
    };

    let mut step = next_step(health.current, upgrade.performed, &wave, config.victory_level);

    if step == WaveStep::SpawnWave {
        let mut rng = rand::thread_rng();
        let roster = wave.begin_next_wave(&mut rng, &registry.kinds(), config.wave_increment);
        spawn_wave(
            &mut commands,
            &mut rng,
            &roster,
            &registry,
            &config,
            &catalog,
            &visual,
        );
        upgrade.performed = false;
        info!("Wave {} started with {} enemies", wave.level, wave.wave_size);

        if wave.level >= config.victory_level {
            step = WaveStep::Victory;
        }
    }

    match step {
        WaveStep::Defeat => {
            info!("Player died at level {}", wave.level);
            next_game.set(GameState::Defeat);
        }
        WaveStep::Victory => {
            info!("Level {} reached, victory", wave.level);
            next_game.set(GameState::Victory);
        }
        WaveStep::AwaitUpgrade => next_play.set(PlayState::Upgrading),
        WaveStep::SpawnWave | WaveStep::Continue => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wave(level: u32, alive: usize) -> WaveState {
        WaveState {
            level,
            wave_size: alive as u32,
            roster: vec!["slug".to_string(); alive],
        }
    }

    #[test]
    fn death_comes_first() {
        assert_eq!(next_step(0.0, false, &wave(0, 0), 10), WaveStep::Defeat);
        assert_eq!(next_step(-3.0, true, &wave(10, 4), 10), WaveStep::Defeat);
    }

    #[test]
    fn cleared_wave_waits_for_upgrade() {
        assert_eq!(next_step(100.0, false, &wave(2, 0), 10), WaveStep::AwaitUpgrade);
        assert_eq!(next_step(100.0, true, &wave(2, 0), 10), WaveStep::SpawnWave);
    }

    #[test]
    fn live_wave_keeps_fighting_until_target_level() {
        assert_eq!(next_step(100.0, false, &wave(4, 3), 10), WaveStep::Continue);
        assert_eq!(next_step(100.0, false, &wave(10, 3), 10), WaveStep::Victory);
    }
}
