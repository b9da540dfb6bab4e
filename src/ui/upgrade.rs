//! Stat upgrade menu shown between waves.
//!
//! One column per player stat. Left/right move the selection with a
//! debounce, Space (on the press, not while held) upgrades the selected
//! stat and lets the next wave start.

use std::time::Duration;

use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::core::{Cooldown, GameConfig, GameState, PlayState};
use crate::player::{Player, PlayerStats, StatKind, UpgradeState};
use crate::rendering::{rgb, VisualConfig};

const BORDER: f32 = 4.0;
const NAME_TOP: f32 = 20.0;
const BAR_INSET: f32 = 60.0;
const BAR_LINE_WIDTH: f32 = 5.0;
const MARKER_SIZE: Vec2 = Vec2::new(30.0, 10.0);

/// Keys read by the menu this frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MenuKeys {
    pub left: bool,
    pub right: bool,
    pub confirm: bool,
}

/// Selection state of the upgrade menu.
///
/// Lives for a whole game, so the selection is kept between waves.
#[derive(Resource, Debug, Clone)]
pub struct UpgradeMenu {
    pub selection: usize,
    debounce: Cooldown,
    confirm_held: bool,
}

impl UpgradeMenu {
    pub fn new(debounce: Duration) -> Self {
        Self {
            selection: 0,
            debounce: Cooldown::new(debounce),
            confirm_held: false,
        }
    }

    /// Feed one frame of input. Returns the index of a confirmed item.
    ///
    /// Moving is ignored while the debounce runs and stops at both ends.
    /// Confirming only needs a fresh press and restarts the debounce.
    pub fn handle(&mut self, now: Duration, keys: MenuKeys, item_count: usize) -> Option<usize> {
        self.debounce.refresh(now);
        if self.debounce.is_ready() {
            if keys.right && self.selection + 1 < item_count {
                self.selection += 1;
                self.debounce.trigger(now);
            } else if keys.left && self.selection >= 1 {
                self.selection -= 1;
                self.debounce.trigger(now);
            }
        }

        let mut confirmed = None;
        if keys.confirm && !self.confirm_held {
            self.debounce.trigger(now);
            confirmed = Some(self.selection);
        }
        self.confirm_held = keys.confirm;
        confirmed
    }
}

/// Screen rectangle of item `index` out of `count`, in pixels from the top-left.
///
/// Items are a quarter of the screen wide, 80% of its height, and centred
/// in equal columns.
pub fn item_rect(index: usize, count: usize, screen: Vec2) -> Rect {
    let width = (screen.x / 4.0).floor();
    let height = screen.y * 0.8;
    let increment = (screen.x / count.max(1) as f32).floor();
    let left = index as f32 * increment + ((increment - width) / 2.0).floor();
    let top = screen.y * 0.1;
    Rect::from_corners(Vec2::new(left, top), Vec2::new(left + width, top + height))
}

/// Distance from the top of an item to the top of its value marker.
pub fn marker_top(value: f32, max_value: f32, item_height: f32) -> f32 {
    let full = item_height - 2.0 * BAR_INSET;
    let relative = if max_value > 0.0 { value / max_value * full } else { 0.0 };
    item_height - BAR_INSET - relative
}

#[derive(Component)]
struct UpgradeMenuUi;

/// One stat column.
#[derive(Component)]
struct UpgradeItem(usize);

#[derive(Component)]
struct ItemName(usize);

#[derive(Component)]
struct ItemBar(usize);

#[derive(Component)]
struct ItemMarker(usize);

/// Setup upgrade menu systems.
pub fn setup_upgrade_systems(app: &mut App) {
    app.add_systems(OnEnter(GameState::InGame), reset_upgrade_menu)
        .add_systems(OnEnter(PlayState::Upgrading), spawn_upgrade_menu)
        .add_systems(
            Update,
            (upgrade_menu_input, refresh_upgrade_menu)
                .chain()
                .run_if(in_state(PlayState::Upgrading)),
        )
        .add_systems(OnExit(PlayState::Upgrading), cleanup_upgrade_menu);
}

fn reset_upgrade_menu(mut commands: Commands, config: Res<GameConfig>) {
    commands.insert_resource(UpgradeMenu::new(config.selection_cooldown()));
}

fn screen_size(window_query: &Query<&Window, With<PrimaryWindow>>, config: &GameConfig) -> Vec2 {
    window_query
        .get_single()
        .map(|window| Vec2::new(window.width(), window.height()))
        .unwrap_or(Vec2::new(config.window_width, config.window_height))
}

fn spawn_upgrade_menu(
    mut commands: Commands,
    config: Res<GameConfig>,
    visual: Res<VisualConfig>,
    window_query: Query<&Window, With<PrimaryWindow>>,
) {
    let screen = screen_size(&window_query, &config);
    let count = StatKind::ALL.len();

    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                position_type: PositionType::Absolute,
                ..default()
            },
            UpgradeMenuUi,
        ))
        .with_children(|root| {
            for (index, kind) in StatKind::ALL.iter().enumerate() {
                let rect = item_rect(index, count, screen);
                root.spawn((
                    Node {
                        position_type: PositionType::Absolute,
                        left: Val::Px(rect.min.x),
                        top: Val::Px(rect.min.y),
                        width: Val::Px(rect.width()),
                        height: Val::Px(rect.height()),
                        border: UiRect::all(Val::Px(BORDER)),
                        justify_content: JustifyContent::Center,
                        ..default()
                    },
                    BackgroundColor(rgb(visual.ui_bg_color)),
                    BorderColor(rgb(visual.ui_border_color)),
                    UpgradeItem(index),
                ))
                .with_children(|item| {
                    item.spawn((
                        Text::new(kind.label()),
                        TextFont {
                            font_size: visual.ui_font_size,
                            ..default()
                        },
                        TextColor(rgb(visual.ui_text_color)),
                        Node {
                            position_type: PositionType::Absolute,
                            top: Val::Px(NAME_TOP),
                            ..default()
                        },
                        ItemName(index),
                    ));
                    item.spawn((
                        Node {
                            position_type: PositionType::Absolute,
                            top: Val::Px(BAR_INSET),
                            bottom: Val::Px(BAR_INSET),
                            width: Val::Px(BAR_LINE_WIDTH),
                            ..default()
                        },
                        BackgroundColor(rgb(visual.bar_color)),
                        ItemBar(index),
                    ));
                    item.spawn((
                        Node {
                            position_type: PositionType::Absolute,
                            width: Val::Px(MARKER_SIZE.x),
                            height: Val::Px(MARKER_SIZE.y),
                            ..default()
                        },
                        BackgroundColor(rgb(visual.bar_color)),
                        ItemMarker(index),
                    ));
                });
            }
        });
}

/// Apply the confirmed upgrade and go back to fighting.
fn upgrade_menu_input(
    time: Res<Time>,
    keyboard: Res<ButtonInput<KeyCode>>,
    config: Res<GameConfig>,
    mut menu: ResMut<UpgradeMenu>,
    mut player_query: Query<(&mut PlayerStats, &mut UpgradeState), With<Player>>,
    mut next_state: ResMut<NextState<PlayState>>,
) {
    let keys = MenuKeys {
        left: keyboard.pressed(KeyCode::ArrowLeft),
        right: keyboard.pressed(KeyCode::ArrowRight),
        confirm: keyboard.pressed(KeyCode::Space),
    };
    let Some(index) = menu.handle(time.elapsed(), keys, StatKind::ALL.len()) else {
        return;
    };
    let Ok((mut stats, mut upgrade)) = player_query.get_single_mut() else {
        return;
    };

    let kind = StatKind::ALL[index];
    let value = stats.upgrade(kind, config.upgrade_growth);
    info!("Upgraded {} to {:.1}", kind.label(), value);
    upgrade.performed = true;
    next_state.set(PlayState::Fighting);
}

/// Recolour the items for the selection and move the value markers.
#[allow(clippy::type_complexity)]
fn refresh_upgrade_menu(
    menu: Res<UpgradeMenu>,
    visual: Res<VisualConfig>,
    player_query: Query<&PlayerStats, With<Player>>,
    mut item_query: Query<(&UpgradeItem, &Node, &mut BackgroundColor), (Without<ItemBar>, Without<ItemMarker>)>,
    mut name_query: Query<(&ItemName, &mut TextColor)>,
    mut bar_query: Query<(&ItemBar, &mut BackgroundColor), (Without<UpgradeItem>, Without<ItemMarker>)>,
    mut marker_query: Query<
        (&ItemMarker, &mut Node, &mut BackgroundColor),
        (Without<UpgradeItem>, Without<ItemBar>),
    >,
) {
    let Ok(stats) = player_query.get_single() else {
        return;
    };
    let bar_color = |index: usize| {
        if index == menu.selection {
            rgb(visual.bar_color_selected)
        } else {
            rgb(visual.bar_color)
        }
    };

    let mut heights = Vec::new();
    for (item, node, mut background) in item_query.iter_mut() {
        background.0 = if item.0 == menu.selection {
            rgb(visual.selected_bg_color)
        } else {
            rgb(visual.ui_bg_color)
        };
        if let Val::Px(height) = node.height {
            heights.push((item.0, height));
        }
    }

    for (name, mut color) in name_query.iter_mut() {
        color.0 = if name.0 == menu.selection {
            rgb(visual.selected_text_color)
        } else {
            rgb(visual.ui_text_color)
        };
    }

    for (bar, mut background) in bar_query.iter_mut() {
        background.0 = bar_color(bar.0);
    }

    for (marker, mut node, mut background) in marker_query.iter_mut() {
        let Some(&(_, height)) = heights.iter().find(|(index, _)| *index == marker.0) else {
            continue;
        };
        let kind = StatKind::ALL[marker.0];
        // Offsets are inside the border
        node.top = Val::Px(marker_top(stats.current.get(kind), stats.max.get(kind), height) - BORDER);
        background.0 = bar_color(marker.0);
    }
}

fn cleanup_upgrade_menu(mut commands: Commands, query: Query<Entity, With<UpgradeMenuUi>>) {
    for entity in query.iter() {
        commands.entity(entity).despawn_recursive();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::test_utils::{advance_time, init_time, run_system_once};
    use crate::player::StatBlock;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    const RIGHT: MenuKeys = MenuKeys {
        left: false,
        right: true,
        confirm: false,
    };
    const LEFT: MenuKeys = MenuKeys {
        left: true,
        right: false,
        confirm: false,
    };
    const CONFIRM: MenuKeys = MenuKeys {
        left: false,
        right: false,
        confirm: true,
    };

    #[test]
    fn moves_are_debounced() {
        let mut menu = UpgradeMenu::new(ms(300));
        menu.handle(ms(0), RIGHT, 3);
        assert_eq!(menu.selection, 1);

        menu.handle(ms(100), RIGHT, 3);
        assert_eq!(menu.selection, 1);

        menu.handle(ms(300), RIGHT, 3);
        assert_eq!(menu.selection, 2);
    }

    #[test]
    fn selection_is_clamped() {
        let mut menu = UpgradeMenu::new(ms(300));
        menu.handle(ms(0), LEFT, 3);
        assert_eq!(menu.selection, 0);

        for step in 1..=5 {
            menu.handle(ms(step * 400), RIGHT, 3);
        }
        assert_eq!(menu.selection, 2);
    }

    #[test]
    fn confirm_fires_on_press_only() {
        let mut menu = UpgradeMenu::new(ms(300));
        assert_eq!(menu.handle(ms(0), CONFIRM, 3), Some(0));
        assert_eq!(menu.handle(ms(16), CONFIRM, 3), None);
        assert_eq!(menu.handle(ms(500), CONFIRM, 3), None);

        menu.handle(ms(516), MenuKeys::default(), 3);
        assert_eq!(menu.handle(ms(532), CONFIRM, 3), Some(0));
    }

    #[test]
    fn confirm_blocks_moving_for_a_while() {
        let mut menu = UpgradeMenu::new(ms(300));
        menu.handle(ms(0), CONFIRM, 3);
        menu.handle(ms(100), RIGHT, 3);
        assert_eq!(menu.selection, 0);
        menu.handle(ms(300), RIGHT, 3);
        assert_eq!(menu.selection, 1);
    }

    #[test]
    fn items_are_centred_in_columns() {
        let screen = Vec2::new(1280.0, 720.0);
        let first = item_rect(0, 3, screen);
        assert_eq!(first.width(), 320.0);
        assert_eq!(first.height(), 576.0);
        assert_eq!(first.min, Vec2::new(53.0, 72.0));

        let last = item_rect(2, 3, screen);
        assert_eq!(last.min.x, 2.0 * 426.0 + 53.0);
    }

    #[test]
    fn marker_rises_with_value() {
        assert_eq!(marker_top(0.0, 10.0, 576.0), 516.0);
        assert_eq!(marker_top(10.0, 10.0, 576.0), 60.0);
        assert_eq!(marker_top(5.0, 10.0, 576.0), 288.0);
    }

    fn menu_world(health: f32) -> (World, Entity) {
        let mut world = World::new();
        init_time(&mut world);
        world.insert_resource(GameConfig::default());
        world.insert_resource(UpgradeMenu::new(ms(300)));
        world.init_resource::<ButtonInput<KeyCode>>();
        world.init_resource::<NextState<PlayState>>();
        let player = world
            .spawn((
                Player,
                PlayerStats {
                    current: StatBlock { health, attack: 10.0, speed: 5.0 },
                    max: StatBlock { health: 450.0, attack: 30.0, speed: 10.0 },
                },
                UpgradeState::default(),
            ))
            .id();
        (world, player)
    }

    fn press(world: &mut World, key: KeyCode) {
        let mut keyboard = world.resource_mut::<ButtonInput<KeyCode>>();
        keyboard.release_all();
        keyboard.press(key);
    }

    #[test]
    fn confirm_upgrades_and_resumes_fighting() {
        let (mut world, player) = menu_world(400.0);
        press(&mut world, KeyCode::Space);

        run_system_once(&mut world, upgrade_menu_input);

        let stats = world.get::<PlayerStats>(player).unwrap();
        assert_eq!(stats.current.health, 450.0);
        assert_eq!(stats.current.attack, 10.0);
        assert!(world.get::<UpgradeState>(player).unwrap().performed);
        assert!(matches!(
            world.resource::<NextState<PlayState>>(),
            NextState::Pending(PlayState::Fighting)
        ));
    }

    #[test]
    fn moving_alone_does_not_finish_the_menu() {
        let (mut world, player) = menu_world(150.0);
        press(&mut world, KeyCode::ArrowRight);

        run_system_once(&mut world, upgrade_menu_input);

        assert_eq!(world.resource::<UpgradeMenu>().selection, 1);
        assert!(!world.get::<UpgradeState>(player).unwrap().performed);
        assert!(matches!(world.resource::<NextState<PlayState>>(), NextState::Unchanged));

        advance_time(&mut world, 300);
        press(&mut world, KeyCode::Space);
        run_system_once(&mut world, upgrade_menu_input);

        let stats = world.get::<PlayerStats>(player).unwrap();
        assert!((stats.current.attack - 12.0).abs() < 1e-4);
        assert_eq!(stats.current.health, 150.0);
        assert!(world.get::<UpgradeState>(player).unwrap().performed);
    }
}
