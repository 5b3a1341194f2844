//! Explicit collision primitives against wall boxes on the XZ plane.
//!
//! Positions are [`Vec2`] values whose `y` component carries the world Z
//! coordinate. Walls span the full playable height, so every test here is
//! two-dimensional.

use arena_shooter_core::WallBox;
use glam::Vec2;

/// Axis along which a penetration was resolved.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Axis {
    X,
    Z,
}

/// Result of pushing a body out of a wall.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct PushOut {
    pub(crate) position: Vec2,
    pub(crate) axis: Axis,
}

/// Reports whether a body of the given radius overlaps the wall box.
///
/// The body is approximated by its square bounds; touching edges do not count.
pub(crate) fn overlaps(position: Vec2, radius: f32, wall: &WallBox) -> bool {
    let min = wall.min();
    let max = wall.max();
    position.x - radius < max.x
        && position.x + radius > min.x
        && position.y - radius < max.y
        && position.y + radius > min.y
}

/// Reports whether the body overlaps any of the walls.
pub(crate) fn overlaps_any(position: Vec2, radius: f32, walls: &[WallBox]) -> bool {
    walls.iter().any(|wall| overlaps(position, radius, wall))
}

/// Minimum translation that separates an overlapping body from the wall.
///
/// The body is moved along the axis of smaller penetration until its edge
/// rests on the wall face; equal penetrations resolve along Z.
pub(crate) fn push_out(position: Vec2, radius: f32, wall: &WallBox) -> Option<PushOut> {
    if !overlaps(position, radius, wall) {
        return None;
    }

    let center = wall.center();
    let half = wall.half_extents();
    let offset = position - center;
    let overlap_x = half.x + radius - offset.x.abs();
    let overlap_z = half.y + radius - offset.y.abs();

    let resolved = if overlap_x < overlap_z {
        PushOut {
            position: Vec2::new(center.x + side(offset.x) * (half.x + radius), position.y),
            axis: Axis::X,
        }
    } else {
        PushOut {
            position: Vec2::new(position.x, center.y + side(offset.y) * (half.y + radius)),
            axis: Axis::Z,
        }
    };
    Some(resolved)
}

/// Distance along a normalised ray at which it enters the wall box.
///
/// Rays starting inside the box report no hit.
pub(crate) fn ray_entry(origin: Vec2, direction: Vec2, wall: &WallBox) -> Option<f32> {
    let min = wall.min();
    let max = wall.max();
    let mut enter = f32::NEG_INFINITY;
    let mut exit = f32::INFINITY;

    for (start, dir, low, high) in [
        (origin.x, direction.x, min.x, max.x),
        (origin.y, direction.y, min.y, max.y),
    ] {
        if dir.abs() <= f32::EPSILON {
            if start < low || start > high {
                return None;
            }
            continue;
        }
        let first = (low - start) / dir;
        let second = (high - start) / dir;
        enter = enter.max(first.min(second));
        exit = exit.min(first.max(second));
    }

    (enter <= exit && enter >= 0.0).then_some(enter)
}

/// Reports whether no wall blocks the segment between the two points.
pub(crate) fn has_line_of_sight(from: Vec2, to: Vec2, walls: &[WallBox]) -> bool {
    let delta = to - from;
    let distance = delta.length();
    if distance <= f32::EPSILON {
        return true;
    }
    let direction = delta / distance;
    !walls.iter().any(|wall| {
        ray_entry(from, direction, wall).is_some_and(|entry| entry <= distance)
    })
}

fn side(offset: f32) -> f32 {
    if offset > 0.0 {
        1.0
    } else {
        -1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_wall() -> WallBox {
        WallBox::centered(Vec2::ZERO, 1.0, 4.0)
    }

    #[test]
    fn touching_edges_do_not_overlap() {
        let wall = unit_wall();
        assert!(!overlaps(Vec2::new(-1.5, 0.0), 0.5, &wall));
        assert!(overlaps(Vec2::new(-1.4, 0.0), 0.5, &wall));
    }

    #[test]
    fn push_out_uses_the_shallow_axis() {
        let wall = unit_wall();
        let resolved = push_out(Vec2::new(-1.4, 0.2), 0.5, &wall).expect("overlap");
        assert_eq!(resolved.axis, Axis::X);
        assert!((resolved.position.x + 1.5).abs() < 1e-6);
        assert!((resolved.position.y - 0.2).abs() < 1e-6);

        let resolved = push_out(Vec2::new(0.3, 1.2), 0.5, &wall).expect("overlap");
        assert_eq!(resolved.axis, Axis::Z);
        assert!((resolved.position.y - 1.5).abs() < 1e-6);
    }

    #[test]
    fn equal_penetration_resolves_along_z() {
        let wall = unit_wall();
        let resolved = push_out(Vec2::new(1.2, 1.2), 0.5, &wall).expect("overlap");
        assert_eq!(resolved.axis, Axis::Z);
    }

    #[test]
    fn ray_reports_entry_distance() {
        let wall = WallBox::centered(Vec2::new(5.0, 0.0), 1.0, 4.0);
        let entry = ray_entry(Vec2::ZERO, Vec2::X, &wall).expect("hit");
        assert!((entry - 4.0).abs() < 1e-6);
        assert_eq!(ray_entry(Vec2::ZERO, -Vec2::X, &wall), None);
        assert_eq!(ray_entry(Vec2::new(0.0, 3.0), Vec2::X, &wall), None);
    }

    #[test]
    fn walls_between_points_block_sight() {
        let walls = [WallBox::centered(Vec2::new(5.0, 0.0), 1.0, 4.0)];
        assert!(!has_line_of_sight(Vec2::ZERO, Vec2::new(10.0, 0.0), &walls));
        assert!(has_line_of_sight(Vec2::ZERO, Vec2::new(3.0, 0.0), &walls));
        assert!(has_line_of_sight(Vec2::ZERO, Vec2::new(0.0, 10.0), &walls));
    }
}
