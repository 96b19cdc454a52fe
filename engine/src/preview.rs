//! Pending placement state and the commit transition.

use bevy::prelude::*;

use crate::registry::{PlacedBlock, Pose, SurfaceRegistry};
use crate::rotation::RotationState;

/// Last resolved placement position for the ghost preview.
///
/// `None` until the pointer first lands on a valid surface, and again right
/// after every commit (the respawned preview starts with an unset position).
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct PreviewPose {
    position: Option<Vec3>,
}

impl PreviewPose {
    pub fn retarget(&mut self, position: Vec3) {
        self.position = Some(position);
    }

    pub fn position(&self) -> Option<Vec3> {
        self.position
    }

    /// Forget the current position; the next commit is a no-op until the
    /// preview is retargeted.
    pub fn clear(&mut self) {
        self.position = None;
    }
}

/// Materialize the preview into a committed block.
///
/// A commit before any valid targeting has happened is a silent no-op.
/// Otherwise the block is inserted into the registry *before* the preview
/// position is cleared, so it is immediately eligible as a target for the
/// next pointer move. Returns the committed pose for the caller to spawn a
/// visual from.
pub fn commit_preview(
    preview: &mut PreviewPose,
    rotation: &RotationState,
    registry: &mut SurfaceRegistry,
) -> Option<Pose> {
    let position = preview.position()?;
    let pose = Pose::new(position, rotation.current());

    registry.insert(PlacedBlock::new(pose));
    preview.clear();
    Some(pose)
}
