//! Weapon placement and lifetime.
//!
//! Weapons exist only while the player's attack window is open. Their
//! rectangle is derived every tick from the player's rect and facing, so a
//! weapon follows the player for the whole window.

use bevy::prelude::*;

use super::components::{Weapon, WeaponSlot};
use super::data::WeaponRegistry;
use crate::core::{GameConfig, GameplaySet};
use crate::player::{AttackCycle, EquippedWeapon, Facing, Player, Status};
use crate::progression::WaveState;
use crate::rendering::{body_translation, rgb, AnimationCatalog, VisualConfig};
use crate::world::{Body, LevelEntity, SpriteType};

const SIDE_OFFSET: f32 = 16.0;
const VERTICAL_OFFSET: f32 = 10.0;

/// Which edge midpoint of the weapon rect is pinned.
#[derive(Debug, Clone, Copy)]
enum Anchor {
    MidLeft,
    MidRight,
    MidTop,
    MidBottom,
}

fn mid_left(rect: Rect) -> Vec2 {
    Vec2::new(rect.min.x, rect.center().y)
}

fn mid_right(rect: Rect) -> Vec2 {
    Vec2::new(rect.max.x, rect.center().y)
}

fn mid_top(rect: Rect) -> Vec2 {
    Vec2::new(rect.center().x, rect.min.y)
}

fn mid_bottom(rect: Rect) -> Vec2 {
    Vec2::new(rect.center().x, rect.max.y)
}

fn pinned(anchor: Anchor, point: Vec2, size: Vec2) -> Rect {
    let center = match anchor {
        Anchor::MidLeft => point + Vec2::new(size.x / 2.0, 0.0),
        Anchor::MidRight => point - Vec2::new(size.x / 2.0, 0.0),
        Anchor::MidTop => point + Vec2::new(0.0, size.y / 2.0),
        Anchor::MidBottom => point - Vec2::new(0.0, size.y / 2.0),
    };
    Rect::from_center_size(center, size)
}

/// Size of the weapon sprite for a facing: `size` is the horizontal shape.
pub fn weapon_size(size: (f32, f32), facing: Facing) -> Vec2 {
    match facing {
        Facing::Left | Facing::Right => Vec2::new(size.0, size.1),
        Facing::Up | Facing::Down => Vec2::new(size.1, size.0),
    }
}

/// Rectangle of a weapon next to the player's visual rect.
///
/// The primary weapon sits on the facing side; the mirrored one sits on the
/// opposite side.
pub fn weapon_rect(player: Rect, facing: Facing, slot: WeaponSlot, size: Vec2) -> Rect {
    let side = Vec2::new(0.0, SIDE_OFFSET);
    let vertical = Vec2::new(VERTICAL_OFFSET, 0.0);

    let (anchor, point) = match (slot, facing) {
        (WeaponSlot::Primary, Facing::Right) => (Anchor::MidLeft, mid_right(player) + side),
        (WeaponSlot::Primary, Facing::Left) => (Anchor::MidRight, mid_left(player) + side),
        (WeaponSlot::Primary, Facing::Up) => (Anchor::MidBottom, mid_top(player) - vertical),
        (WeaponSlot::Primary, Facing::Down) => (Anchor::MidTop, mid_bottom(player) - vertical),
        (WeaponSlot::Mirrored, Facing::Right) => (Anchor::MidRight, mid_left(player) - side),
        (WeaponSlot::Mirrored, Facing::Left) => (Anchor::MidLeft, mid_right(player) + side),
        (WeaponSlot::Mirrored, Facing::Up) => (Anchor::MidTop, mid_bottom(player) + vertical),
        (WeaponSlot::Mirrored, Facing::Down) => (Anchor::MidBottom, mid_top(player) - vertical),
    };
    pinned(anchor, point, size)
}

/// Catalog key of the weapon image for a facing.
fn image_key(weapon_id: &str, facing: Facing) -> String {
    format!("weapons/{}/{}", weapon_id, facing.as_str())
}

pub fn setup_weapon_systems(app: &mut App) {
    app.add_systems(
        FixedUpdate,
        (sync_weapons, place_weapons)
            .chain()
            .in_set(GameplaySet::Weapons),
    );
}

/// Spawn weapons when the attack window opens and remove them when it closes.
///
/// The whole set is spawned on the first tick of a window, so at most one
/// primary and one mirrored weapon exist. The mirrored one is unlocked by
/// level progression and first shows up in the window after the unlock.
pub fn sync_weapons(
    mut commands: Commands,
    config: Res<GameConfig>,
    wave: Res<WaveState>,
    registry: Res<WeaponRegistry>,
    catalog: Res<AnimationCatalog>,
    visual: Res<VisualConfig>,
    player_query: Query<(&Body, &Status, &AttackCycle, &EquippedWeapon), With<Player>>,
    weapon_query: Query<Entity, With<Weapon>>,
) {
    let Ok((player_body, status, cycle, equipped)) = player_query.get_single() else {
        return;
    };

    if !cycle.is_attacking() {
        for entity in weapon_query.iter() {
            commands.entity(entity).despawn_recursive();
        }
        return;
    }

    // Weapons already out means the window opened on an earlier tick
    if !weapon_query.is_empty() {
        return;
    }

    let Some(definition) = registry.get(&equipped.id) else {
        return;
    };

    let mut wanted = vec![WeaponSlot::Primary];
    if wave.level >= config.mirrored_weapon_level {
        wanted.push(WeaponSlot::Mirrored);
    }

    for slot in wanted {
        let size = weapon_size(definition.size, status.facing);
        let rect = weapon_rect(player_body.rect, status.facing, slot, size);
        let body = Body { rect, hitbox: rect };
        let mut sprite = AnimationCatalog::sprite_or_placeholder(
            catalog.image(&image_key(&equipped.id, status.facing)),
            size,
            rgb(visual.weapon_placeholder),
        );
        sprite.flip_x = slot == WeaponSlot::Mirrored;

        commands.spawn((
            Weapon {
                id: equipped.id.clone(),
                slot,
            },
            SpriteType::Weapon,
            sprite,
            Transform::from_translation(body_translation(&body)),
            body,
            LevelEntity,
        ));
    }
}

/// Re-derive every weapon's rectangle and image from the player.
pub fn place_weapons(
    registry: Res<WeaponRegistry>,
    catalog: Res<AnimationCatalog>,
    player_query: Query<(&Body, &Status), (With<Player>, Without<Weapon>)>,
    mut weapon_query: Query<(&Weapon, &mut Body, &mut Sprite), Without<Player>>,
) {
    let Ok((player_body, status)) = player_query.get_single() else {
        return;
    };

    for (weapon, mut body, mut sprite) in weapon_query.iter_mut() {
        let Some(definition) = registry.get(&weapon.id) else {
            continue;
        };
        let size = weapon_size(definition.size, status.facing);
        let rect = weapon_rect(player_body.rect, status.facing, weapon.slot, size);
        if body.rect != rect {
            *body = Body { rect, hitbox: rect };
        }
        sprite.custom_size = Some(size);
        if let Some(image) = catalog.image(&image_key(&weapon.id, status.facing)) {
            if sprite.image != image {
                sprite.image = image;
                sprite.color = Color::WHITE;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::time::Duration;

    use super::*;
    use crate::combat::WeaponDefinition;
    use crate::core::test_utils::{init_time, run_system_once};

    fn weapon_world(level: u32) -> World {
        let mut world = World::new();
        init_time(&mut world);
        world.insert_resource(GameConfig::default());
        world.insert_resource(WaveState {
            level,
            ..default()
        });
        world.init_resource::<AnimationCatalog>();
        world.insert_resource(VisualConfig::default());
        let tornado = WeaponDefinition {
            name: "Tornado".to_string(),
            cooldown_ms: 20,
            damage: 20.0,
            size: (64.0, 64.0),
        };
        world.insert_resource(WeaponRegistry {
            definitions: HashMap::from([("tornado".to_string(), tornado)]),
        });
        world
    }

    fn spawn_attacking_player(world: &mut World) -> Entity {
        world
            .spawn((
                Player,
                Body::new(Vec2::new(100.0, 200.0), Vec2::splat(64.0), Vec2::ZERO),
                Status::default(),
                AttackCycle::default(),
                EquippedWeapon {
                    id: "tornado".to_string(),
                    damage: 20.0,
                    cooldown: Duration::from_millis(20),
                },
            ))
            .id()
    }

    fn slots(world: &mut World) -> Vec<WeaponSlot> {
        let mut slots: Vec<WeaponSlot> = world.query::<&Weapon>().iter(world).map(|w| w.slot).collect();
        slots.sort_by_key(|slot| *slot == WeaponSlot::Mirrored);
        slots
    }

    fn close_window(world: &mut World, player: Entity) {
        let mut cycle = world.get_mut::<AttackCycle>(player).unwrap();
        let (duration, reactivation) = (Duration::from_millis(400), Duration::from_millis(520));
        cycle.tick(Duration::ZERO, duration, reactivation);
        cycle.tick(Duration::from_millis(401), duration, reactivation);
        assert!(!cycle.is_attacking());
    }

    #[test]
    fn open_window_spawns_a_single_primary() {
        let mut world = weapon_world(2);
        spawn_attacking_player(&mut world);

        run_system_once(&mut world, sync_weapons);
        run_system_once(&mut world, sync_weapons);

        assert_eq!(slots(&mut world), vec![WeaponSlot::Primary]);
    }

    #[test]
    fn mirrored_weapon_joins_from_level_three() {
        let mut world = weapon_world(3);
        spawn_attacking_player(&mut world);

        run_system_once(&mut world, sync_weapons);
        run_system_once(&mut world, sync_weapons);

        assert_eq!(slots(&mut world), vec![WeaponSlot::Primary, WeaponSlot::Mirrored]);
    }

    #[test]
    fn unlock_mid_window_waits_for_next_window() {
        let mut world = weapon_world(2);
        let player = spawn_attacking_player(&mut world);
        run_system_once(&mut world, sync_weapons);

        world.resource_mut::<WaveState>().level = 3;
        run_system_once(&mut world, sync_weapons);
        assert_eq!(slots(&mut world), vec![WeaponSlot::Primary]);

        close_window(&mut world, player);
        run_system_once(&mut world, sync_weapons);
        assert!(slots(&mut world).is_empty());

        let mut cycle = world.get_mut::<AttackCycle>(player).unwrap();
        cycle.tick(Duration::from_millis(921), Duration::from_millis(400), Duration::from_millis(520));
        assert!(cycle.is_attacking());
        run_system_once(&mut world, sync_weapons);
        assert_eq!(slots(&mut world), vec![WeaponSlot::Primary, WeaponSlot::Mirrored]);
    }

    #[test]
    fn closed_window_has_no_weapons() {
        let mut world = weapon_world(5);
        let player = spawn_attacking_player(&mut world);
        run_system_once(&mut world, sync_weapons);
        assert_eq!(slots(&mut world).len(), 2);

        close_window(&mut world, player);
        run_system_once(&mut world, sync_weapons);
        run_system_once(&mut world, sync_weapons);

        assert!(slots(&mut world).is_empty());
    }

    fn player_rect() -> Rect {
        // 64x64 player at (100, 200)
        Rect::from_corners(Vec2::new(100.0, 200.0), Vec2::new(164.0, 264.0))
    }

    #[test]
    fn primary_sits_on_facing_side() {
        let size = Vec2::new(40.0, 30.0);

        let right = weapon_rect(player_rect(), Facing::Right, WeaponSlot::Primary, size);
        assert_eq!(right.min.x, 164.0);
        assert_eq!(right.center().y, 232.0 + 16.0);

        let left = weapon_rect(player_rect(), Facing::Left, WeaponSlot::Primary, size);
        assert_eq!(left.max.x, 100.0);
        assert_eq!(left.center().y, 248.0);

        let up = weapon_rect(player_rect(), Facing::Up, WeaponSlot::Primary, size);
        assert_eq!(up.max.y, 200.0);
        assert_eq!(up.center().x, 132.0 - 10.0);

        let down = weapon_rect(player_rect(), Facing::Down, WeaponSlot::Primary, size);
        assert_eq!(down.min.y, 264.0);
        assert_eq!(down.center().x, 122.0);
    }

    #[test]
    fn mirrored_sits_on_opposite_side() {
        let size = Vec2::new(40.0, 30.0);

        let right = weapon_rect(player_rect(), Facing::Right, WeaponSlot::Mirrored, size);
        assert_eq!(right.max.x, 100.0);
        assert_eq!(right.center().y, 232.0 - 16.0);

        let left = weapon_rect(player_rect(), Facing::Left, WeaponSlot::Mirrored, size);
        assert_eq!(left.min.x, 164.0);

        let up = weapon_rect(player_rect(), Facing::Up, WeaponSlot::Mirrored, size);
        assert_eq!(up.min.y, 264.0);
        assert_eq!(up.center().x, 142.0);

        let down = weapon_rect(player_rect(), Facing::Down, WeaponSlot::Mirrored, size);
        assert_eq!(down.max.y, 200.0);
    }

    #[test]
    fn vertical_facing_swaps_size() {
        assert_eq!(weapon_size((48.0, 24.0), Facing::Right), Vec2::new(48.0, 24.0));
        assert_eq!(weapon_size((48.0, 24.0), Facing::Down), Vec2::new(24.0, 48.0));
    }
}
