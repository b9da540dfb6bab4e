//! Keyboard control, attack cycle and movement of the player.

use bevy::input::InputSystem;
use bevy::prelude::*;

use super::components::*;
use crate::combat::{Health, Vulnerability};
use crate::core::{GameConfig, GameState, GameplaySet, SoundCue};
use crate::rendering::{body_translation, AnimationCatalog, Animator, VisualConfig, rgb};
use crate::world::{move_body, Body, LevelEntity, Movement, Obstacle, SpriteType};

/// Visual size of the player sprite.
pub const PLAYER_SIZE: Vec2 = Vec2::splat(64.0);
/// Total shrink applied to the visual rect to get the hitbox.
pub const PLAYER_HITBOX_INFLATION: Vec2 = Vec2::new(-6.0, -26.0);

/// Keyboard state sampled once per frame, read by the fixed step.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq)]
pub struct PlayerInput {
    /// Each axis is -1, 0 or 1 (y grows downwards)
    pub direction: Vec2,
    /// New facing, if any direction key is held
    pub facing: Option<Facing>,
}

impl PlayerInput {
    /// Map the four direction keys to a direction and facing.
    ///
    /// Up wins over down and right over left. When both axes are held the
    /// horizontal facing wins.
    pub fn from_keys(up: bool, down: bool, left: bool, right: bool) -> Self {
        let mut direction = Vec2::ZERO;
        let mut facing = None;

        if up {
            direction.y = -1.0;
            facing = Some(Facing::Up);
        } else if down {
            direction.y = 1.0;
            facing = Some(Facing::Down);
        }

        if right {
            direction.x = 1.0;
            facing = Some(Facing::Right);
        } else if left {
            direction.x = -1.0;
            facing = Some(Facing::Left);
        }

        Self { direction, facing }
    }
}

/// Set up player control systems.
pub fn setup_control_systems(app: &mut App) {
    app.init_resource::<PlayerInput>()
        .add_systems(
            PreUpdate,
            gather_input
                .after(InputSystem)
                .run_if(in_state(GameState::InGame)),
        )
        .add_systems(
            FixedUpdate,
            (
                apply_input,
                update_attack_cycle,
                refresh_vulnerability,
                move_player,
                update_status,
            )
                .chain()
                .in_set(GameplaySet::Player),
        );
}

/// Read WASD into `PlayerInput`.
pub fn gather_input(keyboard: Res<ButtonInput<KeyCode>>, mut input: ResMut<PlayerInput>) {
    *input = PlayerInput::from_keys(
        keyboard.pressed(KeyCode::KeyW),
        keyboard.pressed(KeyCode::KeyS),
        keyboard.pressed(KeyCode::KeyA),
        keyboard.pressed(KeyCode::KeyD),
    );
}

fn apply_input(input: Res<PlayerInput>, mut query: Query<(&mut Movement, &mut Status), With<Player>>) {
    for (mut movement, mut status) in query.iter_mut() {
        movement.direction = input.direction;
        if let Some(facing) = input.facing {
            status.facing = facing;
        }
    }
}

/// Open and close the attack window. Opening plays the swing sound.
pub fn update_attack_cycle(
    time: Res<Time>,
    config: Res<GameConfig>,
    mut query: Query<(&mut AttackCycle, &EquippedWeapon), With<Player>>,
    mut sounds: EventWriter<SoundCue>,
) {
    let now = time.elapsed();
    for (mut cycle, weapon) in query.iter_mut() {
        let reactivation = config.reactivation_cooldown() + weapon.cooldown;
        if cycle.tick(now, config.attack_duration(), reactivation) == AttackPhase::Opened {
            sounds.send(SoundCue::WeaponSwing);
        }
    }
}

fn refresh_vulnerability(time: Res<Time>, mut query: Query<&mut Vulnerability, With<Player>>) {
    let now = time.elapsed();
    for mut vulnerability in query.iter_mut() {
        vulnerability.refresh(now);
    }
}

fn move_player(
    obstacles: Query<&Body, (With<Obstacle>, Without<Player>)>,
    mut query: Query<(&mut Body, &mut Movement, &PlayerStats), With<Player>>,
) {
    let obstacle_boxes: Vec<Rect> = obstacles.iter().map(|body| body.hitbox).collect();
    for (mut body, mut movement, stats) in query.iter_mut() {
        move_body(&mut body, &mut movement.direction, stats.current.speed, &obstacle_boxes);
    }
}

fn update_status(mut query: Query<(&Movement, &AttackCycle, &mut Status, &mut Animator), With<Player>>) {
    for (movement, cycle, mut status, mut animator) in query.iter_mut() {
        status.update(movement.direction, cycle.is_attacking());
        let sequence = format!("player/{}", status.key());
        if animator.sequence != sequence {
            animator.sequence = sequence;
        }
    }
}

/// Spawn the player with its visual rect's top-left at `top_left`.
pub fn spawn_player(
    commands: &mut Commands,
    top_left: Vec2,
    config: &GameConfig,
    weapon: EquippedWeapon,
    catalog: &AnimationCatalog,
    visual: &VisualConfig,
) -> Entity {
    let body = Body::new(top_left, PLAYER_SIZE, PLAYER_HITBOX_INFLATION);
    let status = Status::default();
    let sequence = format!("player/{}", status.key());
    let sprite = catalog.sequence_sprite(&sequence, PLAYER_SIZE, rgb(visual.player_placeholder));

    info!("Spawning player at {:?} with weapon '{}'", top_left, weapon.id);

    commands
        .spawn((
            Player,
            SpriteType::Player,
            PlayerStats {
                current: config.player_stats,
                max: config.player_max_stats,
            },
            Health::with_current(config.player_stats.health, config.player_max_stats.health),
            Vulnerability::new(config.player_invincibility()),
            AttackCycle::default(),
            UpgradeState::default(),
            weapon,
            status,
            Movement::default(),
            Animator::new(sequence, config.animation_speed),
            (
                sprite,
                Transform::from_translation(body_translation(&body)),
                body,
                LevelEntity,
            ),
        ))
        .id()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::test_utils::{advance_time, init_time, run_system_once};

    #[test]
    fn diagonal_input_faces_horizontally() {
        let input = PlayerInput::from_keys(true, false, false, true);
        assert_eq!(input.direction, Vec2::new(1.0, -1.0));
        assert_eq!(input.facing, Some(Facing::Right));
    }

    #[test]
    fn opposite_keys_prefer_up_and_right() {
        let input = PlayerInput::from_keys(true, true, true, true);
        assert_eq!(input.direction, Vec2::new(1.0, -1.0));
    }

    #[test]
    fn no_keys_keep_facing() {
        let input = PlayerInput::from_keys(false, false, false, false);
        assert_eq!(input.direction, Vec2::ZERO);
        assert_eq!(input.facing, None);
    }

    #[test]
    fn swing_sound_when_window_reopens() {
        let mut world = World::new();
        init_time(&mut world);
        world.insert_resource(GameConfig::default());
        world.init_resource::<Events<SoundCue>>();
        world.spawn((
            Player,
            AttackCycle::default(),
            EquippedWeapon {
                id: "tornado".to_string(),
                damage: 20.0,
                cooldown: std::time::Duration::from_millis(20),
            },
        ));

        run_system_once(&mut world, update_attack_cycle);
        advance_time(&mut world, 401);
        run_system_once(&mut world, update_attack_cycle);
        assert!(world.resource::<Events<SoundCue>>().is_empty());

        // 500ms reactivation + 20ms weapon cooldown
        advance_time(&mut world, 520);
        run_system_once(&mut world, update_attack_cycle);
        let events = world.resource::<Events<SoundCue>>();
        let mut reader = events.get_cursor();
        let cues: Vec<_> = reader.read(events).copied().collect();
        assert_eq!(cues, vec![SoundCue::WeaponSwing]);
    }
}
