//! UI plugin - menus, HUD, and interface elements.

use bevy::prelude::*;

use super::{end_screen, hud, upgrade};
use crate::core::{GameState, PlayState};
use crate::rendering::{rgb, VisualConfig};

/// UI plugin - handles all user interface.
pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        hud::setup_hud_systems(app);
        upgrade::setup_upgrade_systems(app);
        end_screen::setup_end_screen_systems(app);

        app
            // Main menu
            .add_systems(OnEnter(GameState::MainMenu), setup_main_menu)
            .add_systems(Update, main_menu_input.run_if(in_state(GameState::MainMenu)))
            .add_systems(OnExit(GameState::MainMenu), cleanup::<MainMenuUi>)

            // Controls explanation
            .add_systems(OnEnter(GameState::Briefing), setup_briefing)
            .add_systems(Update, briefing_input.run_if(in_state(GameState::Briefing)))
            .add_systems(OnExit(GameState::Briefing), cleanup::<BriefingUi>)

            // Pause overlay
            .add_systems(OnEnter(PlayState::Paused), setup_pause_overlay)
            .add_systems(OnExit(PlayState::Paused), cleanup::<PauseMenuUi>);
    }
}

/// Marker for main menu UI entities.
#[derive(Component)]
struct MainMenuUi;

#[derive(Component)]
struct BriefingUi;

/// Marker for pause overlay UI entities.
#[derive(Component)]
struct PauseMenuUi;

/// Marker for menu buttons.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
enum MenuButton {
    Start,
    Exit,
}

const BUTTON_IDLE: Color = Color::srgb(0.15, 0.15, 0.2);
const BUTTON_HOVERED: Color = Color::srgb(0.25, 0.25, 0.3);
const BUTTON_PRESSED: Color = Color::srgb(0.3, 0.3, 0.35);

const CONTROLS: [&str; 5] = [
    "W A S D - move",
    "Your weapon swings on its own",
    "Clear a wave, then pick an upgrade with LEFT / RIGHT and SPACE",
    "ESC - pause",
    "Press ENTER to start",
];

/// Set up the main menu.
fn setup_main_menu(mut commands: Commands, visual: Res<VisualConfig>) {
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            BackgroundColor(rgb(visual.clear_color)),
            MainMenuUi,
        ))
        .with_children(|parent| {
            // Title
            parent.spawn((
                Text::new("SURVIVORS"),
                TextFont {
                    font_size: visual.title_font_size,
                    ..default()
                },
                TextColor(Color::WHITE),
                Node {
                    margin: UiRect::bottom(Val::Px(60.0)),
                    ..default()
                },
            ));

            spawn_menu_button(parent, &visual, "Start", MenuButton::Start);
            spawn_menu_button(parent, &visual, "Exit", MenuButton::Exit);
        });
}

/// Helper to spawn a menu button.
fn spawn_menu_button(parent: &mut ChildBuilder, visual: &VisualConfig, text: &str, button: MenuButton) {
    parent
        .spawn((
            Button,
            Node {
                width: Val::Px(200.0),
                height: Val::Px(50.0),
                margin: UiRect::all(Val::Px(10.0)),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                border: UiRect::all(Val::Px(3.0)),
                ..default()
            },
            BackgroundColor(BUTTON_IDLE),
            BorderColor(rgb(visual.ui_border_color)),
            button,
        ))
        .with_children(|button| {
            button.spawn((
                Text::new(text),
                TextFont {
                    font_size: visual.ui_font_size,
                    ..default()
                },
                TextColor(rgb(visual.ui_text_color)),
            ));
        });
}

/// Handle main menu button interactions.
fn main_menu_input(
    mut interaction_query: Query<
        (&Interaction, &MenuButton, &mut BackgroundColor),
        (Changed<Interaction>, With<Button>),
    >,
    mut next_state: ResMut<NextState<GameState>>,
    mut exit: EventWriter<AppExit>,
) {
    for (interaction, button, mut bg_color) in interaction_query.iter_mut() {
        match interaction {
            Interaction::Pressed => {
                *bg_color = BUTTON_PRESSED.into();
                match button {
                    MenuButton::Start => next_state.set(GameState::Briefing),
                    MenuButton::Exit => {
                        exit.send(AppExit::Success);
                    }
                }
            }
            Interaction::Hovered => {
                *bg_color = BUTTON_HOVERED.into();
            }
            Interaction::None => {
                *bg_color = BUTTON_IDLE.into();
            }
        }
    }
}

/// Set up the controls explanation.
fn setup_briefing(mut commands: Commands, visual: Res<VisualConfig>) {
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                row_gap: Val::Px(16.0),
                ..default()
            },
            BackgroundColor(rgb(visual.ui_bg_color)),
            BriefingUi,
        ))
        .with_children(|parent| {
            for line in CONTROLS {
                parent.spawn((
                    Text::new(line),
                    TextFont {
                        font_size: visual.ui_font_size,
                        ..default()
                    },
                    TextColor(rgb(visual.ui_text_color)),
                ));
            }
        });
}

/// Enter starts the game.
fn briefing_input(keyboard: Res<ButtonInput<KeyCode>>, mut next_state: ResMut<NextState<GameState>>) {
    if keyboard.just_pressed(KeyCode::Enter) {
        next_state.set(GameState::InGame);
    }
}

/// Set up the pause overlay.
fn setup_pause_overlay(mut commands: Commands, visual: Res<VisualConfig>) {
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                position_type: PositionType::Absolute,
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.7)),
            PauseMenuUi,
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("PAUSED"),
                TextFont {
                    font_size: visual.title_font_size / 2.0,
                    ..default()
                },
                TextColor(rgb(visual.ui_text_color)),
            ));
            parent.spawn((
                Text::new("Press ESC to resume"),
                TextFont {
                    font_size: visual.ui_font_size,
                    ..default()
                },
                TextColor(rgb(visual.ui_text_color)),
            ));
        });
}

/// Despawn every entity carrying marker `M`.
fn cleanup<M: Component>(mut commands: Commands, query: Query<Entity, With<M>>) {
    for entity in query.iter() {
        commands.entity(entity).despawn_recursive();
    }
}
