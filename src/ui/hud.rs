//! In-game HUD - health bar, level number and enemy count.

use bevy::prelude::*;

use crate::combat::Health;
use crate::core::GameState;
use crate::player::{Player, PlayerStats};
use crate::progression::WaveState;
use crate::rendering::{rgb, VisualConfig};

/// Marker for HUD root entities.
#[derive(Component)]
pub struct HudRoot;

/// Marker for health bar fill.
#[derive(Component)]
pub struct HealthBar;

#[derive(Component)]
pub struct LevelText;

#[derive(Component)]
pub struct EnemyCountText;

const MARGIN: f32 = 10.0;

/// Setup HUD systems.
pub fn setup_hud_systems(app: &mut App) {
    app.add_systems(OnEnter(GameState::InGame), spawn_hud)
        .add_systems(OnExit(GameState::InGame), cleanup_hud)
        .add_systems(
            Update,
            (update_health_bar, update_wave_texts).run_if(in_state(GameState::InGame)),
        );
}

/// Fill ratio of the health bar: current health over the health stat.
pub fn health_fraction(current: f32, health_stat: f32) -> f32 {
    if health_stat <= 0.0 {
        return 0.0;
    }
    (current / health_stat).clamp(0.0, 1.0)
}

/// Spawn the HUD UI.
fn spawn_hud(mut commands: Commands, visual: Res<VisualConfig>) {
    let font = TextFont {
        font_size: visual.ui_font_size,
        ..default()
    };

    // Health bar (top-left)
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(MARGIN),
                top: Val::Px(MARGIN),
                width: Val::Px(visual.bar_width),
                height: Val::Px(visual.bar_height),
                border: UiRect::all(Val::Px(3.0)),
                ..default()
            },
            BackgroundColor(rgb(visual.ui_bg_color)),
            BorderColor(Color::BLACK),
            HudRoot,
        ))
        .with_children(|bar| {
            bar.spawn((
                Node {
                    width: Val::Percent(100.0),
                    height: Val::Percent(100.0),
                    ..default()
                },
                BackgroundColor(rgb(visual.health_color)),
                HealthBar,
            ));
        });

    // Enemy count (bottom-left)
    spawn_label(&mut commands, &visual, font.clone(), EnemyCountText, |node| {
        node.left = Val::Px(MARGIN);
    });

    // Level (bottom-right)
    spawn_label(&mut commands, &visual, font, LevelText, |node| {
        node.right = Val::Px(MARGIN);
    });
}

/// Boxed text anchored to the bottom of the screen.
fn spawn_label<M: Component>(
    commands: &mut Commands,
    visual: &VisualConfig,
    font: TextFont,
    marker: M,
    anchor: impl FnOnce(&mut Node),
) {
    let mut node = Node {
        position_type: PositionType::Absolute,
        bottom: Val::Px(MARGIN),
        padding: UiRect::all(Val::Px(5.0)),
        border: UiRect::all(Val::Px(3.0)),
        ..default()
    };
    anchor(&mut node);

    commands
        .spawn((
            node,
            BackgroundColor(rgb(visual.ui_bg_color)),
            BorderColor(Color::BLACK),
            HudRoot,
        ))
        .with_children(|label| {
            label.spawn((
                Text::new(""),
                font,
                TextColor(rgb(visual.ui_text_color)),
                marker,
            ));
        });
}

/// Update health bar based on player health.
fn update_health_bar(
    player_query: Query<(&Health, &PlayerStats), With<Player>>,
    mut bar_query: Query<&mut Node, With<HealthBar>>,
) {
    let Ok((health, stats)) = player_query.get_single() else {
        return;
    };
    let Ok(mut bar) = bar_query.get_single_mut() else {
        return;
    };

    bar.width = Val::Percent(health_fraction(health.current, stats.current.health) * 100.0);
}

fn update_wave_texts(
    wave: Res<WaveState>,
    mut level_query: Query<&mut Text, (With<LevelText>, Without<EnemyCountText>)>,
    mut enemy_query: Query<&mut Text, (With<EnemyCountText>, Without<LevelText>)>,
) {
    if let Ok(mut text) = level_query.get_single_mut() {
        text.0 = format!("LEVEL: {}", wave.level);
    }
    if let Ok(mut text) = enemy_query.get_single_mut() {
        text.0 = format!("Enemies: {}", wave.active_count());
    }
}

/// Clean up HUD entities.
fn cleanup_hud(mut commands: Commands, query: Query<Entity, With<HudRoot>>) {
    for entity in query.iter() {
        commands.entity(entity).despawn_recursive();
    }
}
