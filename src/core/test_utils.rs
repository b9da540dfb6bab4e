//! Helpers for running systems against a bare `World` in unit tests.

use std::time::Duration;

use bevy::ecs::system::RunSystemOnce;
use bevy::prelude::*;

/// Run a system once and apply its deferred commands.
pub fn run_system_once<Out, Marker>(
    world: &mut World,
    system: impl IntoSystem<(), Out, Marker>,
) -> Out {
    let out = world
        .run_system_once(system)
        .expect("system should be runnable on the test world");
    world.flush();
    out
}

/// Insert a fresh clock starting at zero.
pub fn init_time(world: &mut World) {
    world.insert_resource(Time::<()>::default());
}

/// Advance the generic clock by `millis`.
pub fn advance_time(world: &mut World, millis: u64) {
    world
        .resource_mut::<Time>()
        .advance_by(Duration::from_millis(millis));
}
