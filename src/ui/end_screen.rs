//! Terminal victory and defeat screens.
//!
//! Both show a single message, play their cue, wait and then close the app.

use bevy::prelude::*;

use crate::core::{GameConfig, GameState, SoundCue};
use crate::rendering::VisualConfig;

/// Marker for end screen UI entities.
#[derive(Component)]
struct EndScreenUi;

/// Counts down until the app exits.
#[derive(Resource, Debug)]
pub struct EndScreenTimer(pub Timer);

impl EndScreenTimer {
    pub fn new(hold_secs: f32) -> Self {
        Self(Timer::from_seconds(hold_secs, TimerMode::Once))
    }
}

/// Setup end screen systems.
pub fn setup_end_screen_systems(app: &mut App) {
    app.add_systems(OnEnter(GameState::Victory), setup_victory)
        .add_systems(OnEnter(GameState::Defeat), setup_defeat)
        .add_systems(
            Update,
            close_after_hold
                .run_if(in_state(GameState::Victory).or(in_state(GameState::Defeat))),
        );
}

fn setup_victory(
    mut commands: Commands,
    config: Res<GameConfig>,
    visual: Res<VisualConfig>,
    mut sounds: EventWriter<SoundCue>,
) {
    info!("Showing victory screen");
    spawn_end_screen(
        &mut commands,
        &mut sounds,
        &config,
        &visual,
        "You WON!!!",
        Color::srgb(0.0, 1.0, 0.0),
        SoundCue::Victory,
    );
}

fn setup_defeat(
    mut commands: Commands,
    config: Res<GameConfig>,
    visual: Res<VisualConfig>,
    mut sounds: EventWriter<SoundCue>,
) {
    info!("Showing game over screen");
    spawn_end_screen(
        &mut commands,
        &mut sounds,
        &config,
        &visual,
        "Game Over",
        Color::srgb(1.0, 0.0, 0.0),
        SoundCue::Defeat,
    );
}

fn spawn_end_screen(
    commands: &mut Commands,
    sounds: &mut EventWriter<SoundCue>,
    config: &GameConfig,
    visual: &VisualConfig,
    message: &str,
    color: Color,
    cue: SoundCue,
) {
    commands.insert_resource(EndScreenTimer::new(config.end_screen_hold_secs));
    sounds.send(cue);

    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            BackgroundColor(Color::BLACK),
            EndScreenUi,
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new(message),
                TextFont {
                    font_size: visual.title_font_size,
                    ..default()
                },
                TextColor(color),
            ));
        });
}

/// Exit once the hold time has passed.
pub fn close_after_hold(
    time: Res<Time>,
    timer: Option<ResMut<EndScreenTimer>>,
    mut exit: EventWriter<AppExit>,
) {
    let Some(mut timer) = timer else {
        return;
    };
    if timer.0.tick(time.delta()).just_finished() {
        exit.send(AppExit::Success);
    }
}
