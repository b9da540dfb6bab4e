//! Integration test harness.
//!
//! Tests drive systems directly on a bare `World`: no window, no renderer,
//! no audio. The data tables are read from the real `assets/data` folder.

#![allow(dead_code)]

use std::path::Path;
use std::time::Duration;

use bevy::ecs::system::RunSystemOnce;
use bevy::prelude::*;
use survivors::combat::WeaponRegistry;
use survivors::core::{GameConfig, GameState, PlayState, PlayerDamageEvent, SoundCue};
use survivors::enemies::EnemyRegistry;
use survivors::player::EquippedWeapon;
use survivors::progression::WaveState;
use survivors::rendering::{AnimationCatalog, VisualConfig};

/// Run a system once and apply its deferred commands.
pub fn run<Out, Marker>(world: &mut World, system: impl IntoSystem<(), Out, Marker>) -> Out {
    let out = world
        .run_system_once(system)
        .expect("system should run on the test world");
    world.flush();
    out
}

pub fn advance(world: &mut World, millis: u64) {
    world
        .resource_mut::<Time>()
        .advance_by(Duration::from_millis(millis));
}

/// World holding every resource the gameplay systems read.
pub fn game_world() -> World {
    let mut world = World::new();
    world.insert_resource(Time::<()>::default());
    world.insert_resource(GameConfig::default());
    world.insert_resource(VisualConfig::default());
    world.init_resource::<AnimationCatalog>();
    world.init_resource::<WaveState>();
    world.init_resource::<NextState<GameState>>();
    world.init_resource::<NextState<PlayState>>();
    world.init_resource::<Events<PlayerDamageEvent>>();
    world.init_resource::<Events<SoundCue>>();
    world.insert_resource(
        EnemyRegistry::load(Path::new("assets/data/enemies")).expect("enemy table should load"),
    );
    world.insert_resource(
        WeaponRegistry::load(Path::new("assets/data/weapons"), "tornado").expect("weapon table should load"),
    );
    world
}

/// The starting weapon as the world builder equips it.
pub fn starting_weapon(world: &World) -> EquippedWeapon {
    let definition = world
        .resource::<WeaponRegistry>()
        .get("tornado")
        .expect("tornado is in the weapon table")
        .clone();
    EquippedWeapon {
        id: "tornado".to_string(),
        damage: definition.damage,
        cooldown: definition.cooldown(),
    }
}

/// Collect every event of type `E` sent so far.
pub fn sent<E: Event + Clone>(world: &World) -> Vec<E> {
    let events = world.resource::<Events<E>>();
    let mut cursor = events.get_cursor();
    cursor.read(events).cloned().collect()
}
