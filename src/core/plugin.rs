//! Core plugin that sets up game states, events, the fixed clock and the
//! loading sequence.

use bevy::prelude::*;

use super::config::GameConfig;
use super::events::*;
use super::states::*;

/// Ordering of the systems that run when entering `GameState::Loading`.
///
/// Every plugin registers its table loaders in `Tables`. `Finish` moves on
/// to the main menu unless a loader asked the app to exit.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum LoadingSet {
    Tables,
    Finish,
}

/// Order of the fixed-step simulation.
///
/// Every set only runs while `PlayState::Fighting` is active, so the upgrade
/// menu and the pause screen freeze the world.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum GameplaySet {
    /// Input, attack cycle, movement and status of the player
    Player,
    /// Weapon spawn/despawn and placement
    Weapons,
    /// Hit reaction, movement, cooldowns and death of enemies
    Enemies,
    /// Enemy status and actions
    EnemyAi,
    /// Weapon hits, pickups, damage to the player
    Collisions,
    /// Death, waves and victory
    Progression,
}

/// Core plugin - must be added first as other plugins depend on it.
///
/// This plugin sets up:
/// - Game states (Loading, MainMenu, InGame, etc.)
/// - Global events (PlayerDamageEvent, SoundCue)
/// - The fixed simulation clock
/// - Basic game flow systems
pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<GameConfig>();
        let fps = app.world().resource::<GameConfig>().fps;

        app
            // One fixed tick per simulated frame
            .insert_resource(Time::<Fixed>::from_hz(fps))

            // Initialize game states
            .init_state::<GameState>()
            .add_sub_state::<PlayState>()

            // Register global events
            .add_event::<PlayerDamageEvent>()
            .add_event::<SoundCue>()

            // Fixed-step simulation order
            .configure_sets(
                FixedUpdate,
                (
                    GameplaySet::Player,
                    GameplaySet::Weapons,
                    GameplaySet::Enemies,
                    GameplaySet::EnemyAi,
                    GameplaySet::Collisions,
                    GameplaySet::Progression,
                )
                    .chain()
                    .run_if(in_state(PlayState::Fighting)),
            )

            // Loading state - every table is read, then on to the menu
            .configure_sets(
                OnEnter(GameState::Loading),
                (LoadingSet::Tables, LoadingSet::Finish).chain(),
            )
            .add_systems(
                OnEnter(GameState::Loading),
                finish_loading.in_set(LoadingSet::Finish),
            )

            // Pause/unpause with Escape key
            .add_systems(
                Update,
                handle_pause_input.run_if(in_state(GameState::InGame)),
            )
            .add_systems(OnEnter(PlayState::Paused), pause_time)
            .add_systems(OnExit(PlayState::Paused), resume_time);
    }
}

/// Transition from Loading to MainMenu once every loader has run.
fn finish_loading(
    mut exits: EventReader<AppExit>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if exits.read().next().is_some() {
        error!("Loading failed, not entering the main menu");
        return;
    }
    info!("All data tables loaded");
    next_state.set(GameState::MainMenu);
}

/// Handle Escape key to pause/unpause the game.
///
/// The upgrade menu cannot be paused.
fn handle_pause_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    current_state: Res<State<PlayState>>,
    mut next_state: ResMut<NextState<PlayState>>,
) {
    if keyboard.just_pressed(KeyCode::Escape) {
        match current_state.get() {
            PlayState::Fighting => next_state.set(PlayState::Paused),
            PlayState::Paused => next_state.set(PlayState::Fighting),
            PlayState::Upgrading => {}
        }
    }
}

fn pause_time(mut time: ResMut<Time<Virtual>>) {
    time.pause();
}

fn resume_time(mut time: ResMut<Time<Virtual>>) {
    time.unpause();
}
