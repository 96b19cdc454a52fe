//! Committed world geometry: poses, surfaces, and the surface registry.

use bevy::prelude::*;

use crate::rotation::QuarterTurns;

/// Default half-extent of the targetable ground plane, in world units.
pub const DEFAULT_GROUND_HALF_EXTENT: f32 = 25.0;

/// Position plus discrete yaw. Immutable once assigned to a committed block.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub position: Vec3,
    pub yaw: QuarterTurns,
}

impl Pose {
    pub fn new(position: Vec3, yaw: QuarterTurns) -> Self {
        Self { position, yaw }
    }

    pub fn rotation(&self) -> Quat {
        self.yaw.to_quat()
    }
}

/// A committed unit cube, centered on its grid cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedBlock {
    pub pose: Pose,
}

impl PlacedBlock {
    pub fn new(pose: Pose) -> Self {
        Self { pose }
    }
}

/// Anything a targeting ray can land on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Surface {
    /// Plane at y = 0, targetable within a bounded square footprint.
    Ground { half_extent: f32 },
    Block(PlacedBlock),
}

/// Ordered collection of targetable surfaces.
///
/// The ground is always present and first; placed blocks are appended in
/// placement order. The registry only grows - nothing in the sandbox removes
/// geometry. Every insertion is immediately visible to targeting queries.
#[derive(Resource, Debug, Clone)]
pub struct SurfaceRegistry {
    surfaces: Vec<Surface>,
}

impl SurfaceRegistry {
    pub fn new(ground_half_extent: f32) -> Self {
        Self {
            surfaces: vec![Surface::Ground {
                half_extent: ground_half_extent,
            }],
        }
    }

    /// All surfaces in targeting order.
    pub fn surfaces(&self) -> &[Surface] {
        &self.surfaces
    }

    /// Append a committed block. Never fails; overlapping placements are
    /// allowed (collision prevention is out of scope).
    pub fn insert(&mut self, block: PlacedBlock) {
        self.surfaces.push(Surface::Block(block));
    }

    /// Committed blocks in placement order.
    pub fn blocks(&self) -> impl Iterator<Item = &PlacedBlock> {
        self.surfaces.iter().filter_map(|surface| match surface {
            Surface::Block(block) => Some(block),
            Surface::Ground { .. } => None,
        })
    }

    /// Number of committed blocks (the ground is not counted).
    pub fn block_count(&self) -> usize {
        self.surfaces.len() - 1
    }
}

impl Default for SurfaceRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_GROUND_HALF_EXTENT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ground_is_always_first() {
        let mut registry = SurfaceRegistry::default();
        registry.insert(PlacedBlock::new(Pose::new(
            Vec3::new(0.5, 0.5, 0.5),
            QuarterTurns::ZERO,
        )));

        assert!(matches!(
            registry.surfaces()[0],
            Surface::Ground { half_extent } if half_extent == DEFAULT_GROUND_HALF_EXTENT
        ));
    }

    #[test]
    fn test_insert_preserves_placement_order() {
        let mut registry = SurfaceRegistry::default();
        let first = Pose::new(Vec3::new(0.5, 0.5, 0.5), QuarterTurns::ZERO);
        let second = Pose::new(Vec3::new(1.5, 0.5, 0.5), QuarterTurns::new(2));

        registry.insert(PlacedBlock::new(first));
        registry.insert(PlacedBlock::new(second));

        let poses: Vec<Pose> = registry.blocks().map(|block| block.pose).collect();
        assert_eq!(poses, vec![first, second]);
        assert_eq!(registry.block_count(), 2);
    }
}
