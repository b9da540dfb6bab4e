//! Collision-pair resolution: weapons against enemies, pickups against the
//! player, and enemy attacks against the player.
//!
//! Pairs are tested on visual rects, not hitboxes.

use bevy::prelude::*;

use super::components::{Health, Vulnerability, Weapon};
use crate::core::{GameConfig, GameplaySet, PlayerDamageEvent, SoundCue};
use crate::enemies::{take_damage, Enemy, Hit};
use crate::player::{EquippedWeapon, Player, PlayerStats};
use crate::world::{overlaps, Body, Movement, Pickup, SpriteType};

pub fn setup_combat_systems(app: &mut App) {
    app.add_systems(
        FixedUpdate,
        (resolve_weapon_hits, collect_pickups, apply_player_damage)
            .chain()
            .in_set(GameplaySet::Collisions),
    );
}

/// Every overlapping weapon/enemy pair hits the enemy.
///
/// The enemy's own invincibility window limits it to one hit per window.
pub fn resolve_weapon_hits(
    time: Res<Time>,
    player_query: Query<(&Body, &PlayerStats, &EquippedWeapon), With<Player>>,
    weapon_query: Query<(&Body, &SpriteType), (With<Weapon>, Without<Enemy>)>,
    mut enemy_query: Query<
        (&Body, &mut Health, &mut Vulnerability, &mut Movement),
        (With<Enemy>, Without<Weapon>),
    >,
    mut sounds: EventWriter<SoundCue>,
) {
    let Ok((player_body, stats, equipped)) = player_query.get_single() else {
        return;
    };
    let now = time.elapsed();

    for (weapon_body, sprite_type) in weapon_query.iter() {
        let hit = Hit {
            attacker: player_body.center(),
            kind: *sprite_type,
            power: stats.attack_power(equipped.damage),
            at: now,
        };
        for (enemy_body, mut health, mut vulnerability, mut movement) in enemy_query.iter_mut() {
            if !overlaps(&weapon_body.rect, &enemy_body.rect) {
                continue;
            }
            if take_damage(
                &mut health,
                &mut vulnerability,
                &mut movement,
                enemy_body.center(),
                &hit,
            ) {
                sounds.send(SoundCue::EnemyHit);
            }
        }
    }
}

/// Food touching the player heals it and disappears.
pub fn collect_pickups(
    mut commands: Commands,
    config: Res<GameConfig>,
    pickup_query: Query<(Entity, &Body), (With<Pickup>, Without<Player>)>,
    mut player_query: Query<(&Body, &mut Health), With<Player>>,
    mut sounds: EventWriter<SoundCue>,
) {
    let Ok((player_body, mut health)) = player_query.get_single_mut() else {
        return;
    };

    for (entity, pickup_body) in pickup_query.iter() {
        if overlaps(&pickup_body.rect, &player_body.rect) {
            health.heal(config.pickup_heal);
            commands.entity(entity).despawn_recursive();
            sounds.send(SoundCue::Pickup);
        }
    }
}

/// Apply enemy attacks unless the player is inside its invincibility window.
pub fn apply_player_damage(
    time: Res<Time>,
    mut events: EventReader<PlayerDamageEvent>,
    mut player_query: Query<(&mut Health, &mut Vulnerability), With<Player>>,
    mut sounds: EventWriter<SoundCue>,
) {
    let Ok((mut health, mut vulnerability)) = player_query.get_single_mut() else {
        events.clear();
        return;
    };
    let now = time.elapsed();
    vulnerability.refresh(now);

    for event in events.read() {
        if vulnerability.try_hit(now) {
            health.take_damage(event.amount);
            sounds.send(SoundCue::PlayerHit);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::core::test_utils::{advance_time, init_time, run_system_once};

    fn test_world() -> World {
        let mut world = World::new();
        init_time(&mut world);
        world.insert_resource(GameConfig::default());
        world.init_resource::<Events<PlayerDamageEvent>>();
        world.init_resource::<Events<SoundCue>>();
        world
    }

    fn spawn_test_player(world: &mut World, at: Vec2) -> Entity {
        world
            .spawn((
                Player,
                Body::new(at, Vec2::splat(64.0), Vec2::new(-6.0, -26.0)),
                Health::with_current(150.0, 450.0),
                Vulnerability::new(Duration::from_millis(500)),
            ))
            .id()
    }

    fn hit_player(world: &mut World, amount: f32) {
        world.send_event(PlayerDamageEvent { amount });
        run_system_once(world, apply_player_damage);
        world.resource_mut::<Events<PlayerDamageEvent>>().clear();
    }

    #[test]
    fn player_invincibility_filters_repeated_hits() {
        let mut world = test_world();
        let player = spawn_test_player(&mut world, Vec2::ZERO);

        hit_player(&mut world, 12.0);
        assert_eq!(world.get::<Health>(player).unwrap().current, 138.0);
        assert!(!world.get::<Vulnerability>(player).unwrap().is_vulnerable());

        advance_time(&mut world, 100);
        hit_player(&mut world, 12.0);
        assert_eq!(world.get::<Health>(player).unwrap().current, 138.0);

        advance_time(&mut world, 500);
        hit_player(&mut world, 12.0);
        assert_eq!(world.get::<Health>(player).unwrap().current, 126.0);
    }

    #[test]
    fn several_enemies_in_one_tick_hit_once() {
        let mut world = test_world();
        let player = spawn_test_player(&mut world, Vec2::ZERO);

        world.send_event(PlayerDamageEvent { amount: 12.0 });
        world.send_event(PlayerDamageEvent { amount: 5.0 });
        run_system_once(&mut world, apply_player_damage);

        assert_eq!(world.get::<Health>(player).unwrap().current, 138.0);
    }

    #[test]
    fn pickup_heals_and_disappears() {
        let mut world = test_world();
        let player = spawn_test_player(&mut world, Vec2::new(64.0, 64.0));
        let food = world
            .spawn((Pickup, Body::new(Vec2::new(100.0, 100.0), Vec2::splat(64.0), Vec2::new(0.0, -10.0))))
            .id();
        let far_food = world
            .spawn((Pickup, Body::new(Vec2::new(640.0, 640.0), Vec2::splat(64.0), Vec2::ZERO)))
            .id();

        run_system_once(&mut world, collect_pickups);

        assert_eq!(world.get::<Health>(player).unwrap().current, 180.0);
        assert!(world.get::<Pickup>(food).is_none());
        assert!(world.get::<Pickup>(far_food).is_some());
    }

    #[test]
    fn healing_is_capped_at_max_health() {
        let mut world = test_world();
        let player = spawn_test_player(&mut world, Vec2::ZERO);
        world.get_mut::<Health>(player).unwrap().current = 440.0;
        world.spawn((Pickup, Body::new(Vec2::ZERO, Vec2::splat(64.0), Vec2::ZERO)));

        run_system_once(&mut world, collect_pickups);

        assert_eq!(world.get::<Health>(player).unwrap().current, 450.0);
    }
}
