//! Targeting resolver: camera ray to grid-snapped placement position.
//!
//! Resolution is a pure function of the ray and the current registry
//! snapshot - no hidden state, deterministic, idempotent for unchanged
//! inputs.

use bevy::prelude::*;

use crate::registry::{Surface, SurfaceRegistry};
use crate::BLOCK_SIZE;

/// Hits closer than this along the ray are discarded so a ray starting on a
/// surface does not immediately re-hit it.
const T_MIN: f32 = 1e-4;

/// Resolve a camera ray against the registry into a placement position.
///
/// Picks the nearest intersected surface (ties go to the earlier registry
/// entry), snaps the hit point to the center of its unit grid cell, and
/// applies the stacking rule: ground hits sit on the floor, block hits sit
/// one full unit above the hit block no matter which face was struck.
///
/// Returns `None` when the ray hits nothing; the caller keeps the previous
/// preview pose in that case.
pub fn resolve_placement(ray: Ray3d, registry: &SurfaceRegistry) -> Option<Vec3> {
    let mut nearest: Option<(f32, &Surface)> = None;

    for surface in registry.surfaces() {
        let t = match surface {
            Surface::Ground { half_extent } => intersect_ground(ray, *half_extent),
            Surface::Block(block) => intersect_unit_cube(ray, block.pose.position),
        };
        let Some(t) = t else {
            continue;
        };
        // Strict comparison: on an exact tie the earlier surface wins.
        if nearest.is_none_or(|(best, _)| t < best) {
            nearest = Some((t, surface));
        }
    }

    let (t, surface) = nearest?;
    let hit = ray.origin + *ray.direction * t;

    let height = match surface {
        Surface::Ground { .. } => BLOCK_SIZE / 2.0,
        Surface::Block(block) => block.pose.position.y + BLOCK_SIZE,
    };

    Some(Vec3::new(snap_to_cell(hit.x), height, snap_to_cell(hit.z)))
}

/// Center of the unit cell containing `coord`.
fn snap_to_cell(coord: f32) -> f32 {
    (coord / BLOCK_SIZE).floor() * BLOCK_SIZE + BLOCK_SIZE / 2.0
}

/// Ray parameter of the hit on the bounded ground plane at y = 0.
fn intersect_ground(ray: Ray3d, half_extent: f32) -> Option<f32> {
    let dir = *ray.direction;
    if dir.y.abs() < f32::EPSILON {
        return None;
    }

    let t = -ray.origin.y / dir.y;
    if t < T_MIN {
        return None;
    }

    let hit = ray.origin + dir * t;
    if hit.x.abs() > half_extent || hit.z.abs() > half_extent {
        return None;
    }
    Some(t)
}

/// Slab test against the axis-aligned unit cube centered at `center`.
fn intersect_unit_cube(ray: Ray3d, center: Vec3) -> Option<f32> {
    let min = center - Vec3::splat(BLOCK_SIZE / 2.0);
    let max = center + Vec3::splat(BLOCK_SIZE / 2.0);
    let dir = *ray.direction;

    let mut t_near = f32::NEG_INFINITY;
    let mut t_far = f32::INFINITY;

    for axis in 0..3 {
        let origin = ray.origin[axis];
        let d = dir[axis];

        if d.abs() < f32::EPSILON {
            // Parallel to this slab: must already lie within it.
            if origin < min[axis] || origin > max[axis] {
                return None;
            }
            continue;
        }

        let mut t0 = (min[axis] - origin) / d;
        let mut t1 = (max[axis] - origin) / d;
        if t0 > t1 {
            std::mem::swap(&mut t0, &mut t1);
        }

        t_near = t_near.max(t0);
        t_far = t_far.min(t1);
        if t_near > t_far {
            return None;
        }
    }

    if t_far < T_MIN {
        return None;
    }
    Some(if t_near >= T_MIN { t_near } else { t_far })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{PlacedBlock, Pose};
    use crate::rotation::QuarterTurns;

    fn ray(origin: Vec3, direction: Vec3) -> Ray3d {
        Ray3d::new(origin, Dir3::new(direction).unwrap())
    }

    fn down_ray_at(x: f32, z: f32) -> Ray3d {
        ray(Vec3::new(x, 10.0, z), Vec3::NEG_Y)
    }

    #[test]
    fn test_ground_hit_snaps_to_cell_center() {
        let registry = SurfaceRegistry::default();

        let resolved = resolve_placement(down_ray_at(2.3, 4.7), &registry).unwrap();
        assert_eq!(resolved, Vec3::new(2.5, 0.5, 4.5));
    }

    #[test]
    fn test_negative_coordinates_floor_toward_negative_infinity() {
        let registry = SurfaceRegistry::default();

        let resolved = resolve_placement(down_ray_at(-0.3, -1.8), &registry).unwrap();
        assert_eq!(resolved, Vec3::new(-0.5, 0.5, -1.5));
    }

    #[test]
    fn test_block_hit_stacks_one_unit_above() {
        let mut registry = SurfaceRegistry::default();
        registry.insert(PlacedBlock::new(Pose::new(
            Vec3::new(2.5, 0.5, 4.5),
            QuarterTurns::ZERO,
        )));

        let resolved = resolve_placement(down_ray_at(2.3, 4.7), &registry).unwrap();
        assert_eq!(resolved, Vec3::new(2.5, 1.5, 4.5));
    }

    #[test]
    fn test_side_face_hit_still_stacks_above_block_height() {
        let mut registry = SurfaceRegistry::default();
        registry.insert(PlacedBlock::new(Pose::new(
            Vec3::new(2.5, 0.5, 4.5),
            QuarterTurns::ZERO,
        )));

        // Horizontal ray into the +X face of the block.
        let resolved =
            resolve_placement(ray(Vec3::new(10.0, 0.5, 4.5), Vec3::NEG_X), &registry).unwrap();
        assert_eq!(resolved.y, 1.5);
    }

    #[test]
    fn test_nearest_surface_wins() {
        let mut registry = SurfaceRegistry::default();
        registry.insert(PlacedBlock::new(Pose::new(
            Vec3::new(0.5, 0.5, 0.5),
            QuarterTurns::ZERO,
        )));
        registry.insert(PlacedBlock::new(Pose::new(
            Vec3::new(0.5, 1.5, 0.5),
            QuarterTurns::ZERO,
        )));

        // The stacked block occludes the lower one and the ground.
        let resolved = resolve_placement(down_ray_at(0.5, 0.5), &registry).unwrap();
        assert_eq!(resolved, Vec3::new(0.5, 2.5, 0.5));
    }

    #[test]
    fn test_miss_outside_ground_footprint() {
        let registry = SurfaceRegistry::default();

        assert_eq!(resolve_placement(down_ray_at(100.0, 0.0), &registry), None);
    }

    #[test]
    fn test_ray_pointing_away_misses() {
        let registry = SurfaceRegistry::default();

        let skyward = ray(Vec3::new(0.0, 5.0, 0.0), Vec3::Y);
        assert_eq!(resolve_placement(skyward, &registry), None);
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let mut registry = SurfaceRegistry::default();
        registry.insert(PlacedBlock::new(Pose::new(
            Vec3::new(-3.5, 0.5, 1.5),
            QuarterTurns::new(1),
        )));

        let aimed = ray(Vec3::new(8.0, 9.0, 8.0), Vec3::new(-1.0, -1.0, -0.6));
        let first = resolve_placement(aimed, &registry);
        let second = resolve_placement(aimed, &registry);
        assert!(first.is_some());
        assert_eq!(first, second);
    }
}
