//! Rectangles, movement and axis-separated collision.
//!
//! All gameplay geometry lives in map pixels with the origin at the map's
//! top-left corner and y growing downwards. Transforms are derived from
//! these rectangles by the rendering module; nothing here reads them.

use bevy::prelude::*;

/// Visual and collision rectangles of a world entity.
///
/// The hitbox is usually smaller than the visual rect so sprites can overlap
/// a little without blocking each other.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Body {
    pub rect: Rect,
    pub hitbox: Rect,
}

impl Body {
    /// Body whose visual rect starts at `top_left`, with the hitbox grown
    /// (or shrunk, for negative values) by `hitbox_inflation` in total.
    pub fn new(top_left: Vec2, size: Vec2, hitbox_inflation: Vec2) -> Self {
        let rect = Rect::from_corners(top_left, top_left + size);
        Self {
            rect,
            hitbox: inflate(rect, hitbox_inflation),
        }
    }

    /// Body centred on `center`.
    pub fn centered(center: Vec2, size: Vec2, hitbox_inflation: Vec2) -> Self {
        Self::new(center - size / 2.0, size, hitbox_inflation)
    }

    pub fn center(&self) -> Vec2 {
        self.rect.center()
    }

    /// Re-centre the visual rect on the hitbox.
    pub fn recenter(&mut self) {
        self.rect = Rect::from_center_size(self.hitbox.center(), self.rect.size());
    }
}

/// Desired movement for this tick, either zero or (after `move_body`) unit length.
#[derive(Component, Debug, Default, Clone, Copy)]
pub struct Movement {
    pub direction: Vec2,
}

/// Grow `rect` by `delta` in total, keeping its centre.
pub fn inflate(rect: Rect, delta: Vec2) -> Rect {
    Rect::from_center_size(rect.center(), (rect.size() + delta).max(Vec2::ZERO))
}

/// Strict overlap test. Rectangles that only share an edge do not overlap.
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    a.min.x < b.max.x && b.min.x < a.max.x && a.min.y < b.max.y && b.min.y < a.max.y
}

#[derive(Debug, Clone, Copy)]
enum Axis {
    Horizontal,
    Vertical,
}

/// Move a body by `speed` along `direction`, resolving each axis against
/// `obstacles` separately.
///
/// A non-zero direction is normalized in place. After both axes are
/// resolved the visual rect is re-centred on the hitbox.
pub fn move_body(body: &mut Body, direction: &mut Vec2, speed: f32, obstacles: &[Rect]) {
    if *direction != Vec2::ZERO {
        *direction = direction.normalize();
    }

    shift(&mut body.hitbox, Vec2::new(direction.x * speed, 0.0));
    resolve(&mut body.hitbox, *direction, Axis::Horizontal, obstacles);

    shift(&mut body.hitbox, Vec2::new(0.0, direction.y * speed));
    resolve(&mut body.hitbox, *direction, Axis::Vertical, obstacles);

    body.recenter();
}

fn shift(rect: &mut Rect, offset: Vec2) {
    rect.min += offset;
    rect.max += offset;
}

/// Push the moving hitbox back out of every obstacle it overlaps, using the
/// sign of `direction` on `axis` to pick the leading edge.
fn resolve(hitbox: &mut Rect, direction: Vec2, axis: Axis, obstacles: &[Rect]) {
    for obstacle in obstacles {
        if !overlaps(obstacle, hitbox) {
            continue;
        }
        match axis {
            Axis::Horizontal => {
                if direction.x > 0.0 {
                    shift(hitbox, Vec2::new(obstacle.min.x - hitbox.max.x, 0.0));
                } else if direction.x < 0.0 {
                    shift(hitbox, Vec2::new(obstacle.max.x - hitbox.min.x, 0.0));
                }
            }
            Axis::Vertical => {
                if direction.y > 0.0 {
                    shift(hitbox, Vec2::new(0.0, obstacle.min.y - hitbox.max.y));
                } else if direction.y < 0.0 {
                    shift(hitbox, Vec2::new(0.0, obstacle.max.y - hitbox.min.y));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tile(x: f32, y: f32) -> Rect {
        Rect::from_corners(Vec2::new(x, y), Vec2::new(x + 64.0, y + 64.0))
    }

    #[test]
    fn nonzero_direction_becomes_unit_length() {
        let mut body = Body::new(Vec2::ZERO, Vec2::splat(64.0), Vec2::ZERO);
        for raw in [Vec2::new(1.0, 1.0), Vec2::new(-3.0, 0.5), Vec2::new(0.0, -7.0)] {
            let mut direction = raw;
            move_body(&mut body, &mut direction, 5.0, &[]);
            assert!((direction.length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn zero_direction_is_untouched() {
        let mut body = Body::new(Vec2::new(10.0, 10.0), Vec2::splat(64.0), Vec2::ZERO);
        let before = body;
        let mut direction = Vec2::ZERO;
        move_body(&mut body, &mut direction, 5.0, &[]);
        assert_eq!(direction, Vec2::ZERO);
        assert_eq!(body, before);
    }

    #[test]
    fn diagonal_speed_is_not_faster() {
        let mut body = Body::new(Vec2::ZERO, Vec2::splat(64.0), Vec2::ZERO);
        let mut direction = Vec2::new(1.0, 1.0);
        move_body(&mut body, &mut direction, 5.0, &[]);
        assert!((body.center().distance(Vec2::splat(32.0)) - 5.0).abs() < 1e-4);
    }

    #[test]
    fn clamps_against_obstacle_on_the_right() {
        let obstacle = tile(100.0, 0.0);
        // Starting 2px short of the obstacle, moving 5px right.
        let mut body = Body::new(Vec2::new(34.0, 0.0), Vec2::splat(64.0), Vec2::ZERO);
        let mut direction = Vec2::X;
        move_body(&mut body, &mut direction, 5.0, &[obstacle]);
        assert_eq!(body.hitbox.max.x, obstacle.min.x);
    }

    #[test]
    fn horizontal_clamp_ignores_vertical_offset() {
        for y in [-40.0, 0.0, 40.0] {
            let obstacle = tile(100.0, y);
            let mut body = Body::new(Vec2::new(34.0, 0.0), Vec2::splat(64.0), Vec2::ZERO);
            let mut direction = Vec2::X;
            move_body(&mut body, &mut direction, 5.0, &[obstacle]);
            assert_eq!(body.hitbox.max.x, obstacle.min.x, "obstacle at y={y}");
        }
    }

    #[test]
    fn slides_along_wall_when_moving_diagonally() {
        let wall = tile(64.0, 0.0);
        let mut body = Body::new(Vec2::new(0.0, 0.0), Vec2::splat(64.0), Vec2::ZERO);
        let mut direction = Vec2::new(1.0, 1.0);
        move_body(&mut body, &mut direction, 10.0, &[wall]);
        assert_eq!(body.hitbox.max.x, 64.0);
        assert!(body.hitbox.min.y > 0.0);
    }

    #[test]
    fn touching_edges_do_not_overlap() {
        assert!(!overlaps(&tile(0.0, 0.0), &tile(64.0, 0.0)));
        assert!(overlaps(&tile(0.0, 0.0), &tile(63.0, 0.0)));
    }

    #[test]
    fn visual_rect_follows_hitbox() {
        let mut body = Body::new(Vec2::ZERO, Vec2::splat(64.0), Vec2::new(-6.0, -26.0));
        assert_eq!(body.hitbox.size(), Vec2::new(58.0, 38.0));
        let mut direction = Vec2::Y;
        move_body(&mut body, &mut direction, 5.0, &[]);
        assert_eq!(body.rect.center(), body.hitbox.center());
        assert_eq!(body.rect.size(), Vec2::splat(64.0));
    }
}
