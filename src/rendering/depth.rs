//! Map-space to screen-space: y-sorted transforms and the follow camera.

use bevy::prelude::*;

use crate::player::Player;
use crate::world::Body;

/// Z of the floor; everything y-sorted draws above it.
pub const FLOOR_DEPTH: f32 = 0.0;

const SORTED_BASE_DEPTH: f32 = 1.0;
const DEPTH_PER_PIXEL: f32 = 0.001;

/// Marker for the single 2D camera used by menus and gameplay.
#[derive(Component)]
pub struct MainCamera;

/// Draw depth for a sprite whose visual centre is at `center_y` (map pixels).
///
/// Lower on screen means larger depth, so it draws on top.
pub fn depth_for(center_y: f32) -> f32 {
    SORTED_BASE_DEPTH + center_y * DEPTH_PER_PIXEL
}

/// Translation of a map-space body: y flips, z follows the visual centre.
pub fn body_translation(body: &Body) -> Vec3 {
    let center = body.center();
    Vec3::new(center.x, -center.y, depth_for(center.y))
}

pub fn spawn_main_camera(mut commands: Commands) {
    commands.spawn((Camera2d, MainCamera));
}

/// Derive every body's transform from its map rectangle.
pub fn sync_body_transforms(mut query: Query<(&Body, &mut Transform), Changed<Body>>) {
    for (body, mut transform) in query.iter_mut() {
        transform.translation = body_translation(body);
    }
}

/// Keep the camera centred on the player.
pub fn follow_player(
    player_query: Query<&Body, With<Player>>,
    mut camera_query: Query<&mut Transform, With<MainCamera>>,
) {
    let Ok(body) = player_query.get_single() else {
        return;
    };
    let Ok(mut camera) = camera_query.get_single_mut() else {
        return;
    };
    let center = body.center();
    camera.translation.x = center.x;
    camera.translation.y = -center.y;
}

/// Put the camera back at the origin for menus.
pub fn reset_camera(mut camera_query: Query<&mut Transform, With<MainCamera>>) {
    if let Ok(mut camera) = camera_query.get_single_mut() {
        camera.translation.x = 0.0;
        camera.translation.y = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::test_utils::run_system_once;

    #[test]
    fn lower_sprites_draw_in_front() {
        assert!(depth_for(500.0) > depth_for(100.0));
        assert!(depth_for(0.0) > FLOOR_DEPTH);
    }

    #[test]
    fn transform_flips_y_and_sorts_by_centre() {
        let mut world = World::new();
        let body = Body::new(Vec2::new(100.0, 200.0), Vec2::splat(64.0), Vec2::ZERO);
        let entity = world.spawn((body, Transform::default())).id();

        run_system_once(&mut world, sync_body_transforms);

        let translation = world.get::<Transform>(entity).unwrap().translation;
        assert_eq!(translation.x, 132.0);
        assert_eq!(translation.y, -232.0);
        assert_eq!(translation.z, depth_for(232.0));
    }
}
