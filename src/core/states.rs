//! Game state definitions that control the overall flow of the game.
//!
//! States determine which systems run at any given time. For example,
//! the simulation only runs while fighting, while the upgrade menu only
//! reads input while upgrading.

use bevy::prelude::*;

/// Main game states - controls overall game flow.
///
/// - Start in `Loading` to read every data table
/// - Move to `MainMenu` when loading completes
/// - `Briefing` shows the controls before the first wave
/// - `InGame` for active play
/// - `Victory` / `Defeat` are terminal: they hold a message and exit
#[derive(States, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum GameState {
    /// Initial state - loading data files
    #[default]
    Loading,
    /// Title screen
    MainMenu,
    /// Controls explanation, waits for Enter
    Briefing,
    /// Active gameplay
    InGame,
    /// Final level reached
    Victory,
    /// Player health dropped to zero
    Defeat,
}

/// Sub-states for gameplay - only active when GameState::InGame.
///
/// - `Fighting`: the simulation ticks
/// - `Upgrading`: a wave was cleared and the stat upgrade menu is open
/// - `Paused`: Escape was pressed
#[derive(SubStates, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
#[source(GameState = GameState::InGame)]
pub enum PlayState {
    #[default]
    Fighting,
    Upgrading,
    Paused,
}
