//! Placement targeting and world-state engine.
//!
//! Pure, deterministic core of the block sandbox: converts a camera ray into
//! a grid-snapped, stack-aware placement position, tracks the pending
//! preview pose and rotation, and owns the registry of committed surfaces
//! used by every targeting query. Rendering and input live in the `game`
//! crate and talk to this crate through plain function calls and resources.

pub mod preview;
pub mod registry;
pub mod rotation;
pub mod targeting;

pub use preview::{commit_preview, PreviewPose};
pub use registry::{PlacedBlock, Pose, Surface, SurfaceRegistry};
pub use rotation::{QuarterTurns, RotationState};
pub use targeting::resolve_placement;

/// Edge length of every placeable block, in world units.
pub const BLOCK_SIZE: f32 = 1.0;
