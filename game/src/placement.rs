//! Ghost preview and placement systems.
//!
//! Owns the single ghost entity, re-poses it from the targeting resolver and
//! the rotation state, and materializes it into a permanent block on commit.
//! The ghost is never part of the `SurfaceRegistry`, so it can never occlude
//! or be hit by its own targeting ray.

use bevy::prelude::*;

use engine::{
    commit_preview, resolve_placement, PreviewPose, QuarterTurns, RotationState, SurfaceRegistry,
    BLOCK_SIZE,
};

use crate::input::{self, CommitRequested, PointerMoved, RotateRequested};
use crate::settings::GameSettings;

pub struct PlacementPlugin;

impl Plugin for PlacementPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<PointerMoved>();
        app.add_message::<RotateRequested>();
        app.add_message::<CommitRequested>();

        app.init_resource::<PreviewPose>();
        app.init_resource::<RotationState>();

        app.add_systems(Startup, setup_placement);

        // One fixed chain per frame: input mapping, then retarget, rotate,
        // commit. Each handler runs to completion before the next.
        app.add_systems(
            Update,
            (
                (input::emit_pointer_commands, input::emit_key_commands),
                retarget_preview,
                rotate_preview,
                commit_placement,
            )
                .chain(),
        );
    }
}

/// Marker for the transient ghost block.
#[derive(Component)]
pub struct GhostPreview;

/// Marker for committed block visuals.
#[derive(Component)]
pub struct PlacedBlockVisual;

/// Shared mesh and materials for ghost and committed blocks.
#[derive(Resource)]
struct PlacementAssets {
    block_mesh: Handle<Mesh>,
    ghost_material: Handle<StandardMaterial>,
    placed_material: Handle<StandardMaterial>,
}

fn setup_placement(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    settings: Res<GameSettings>,
) {
    let assets = PlacementAssets {
        block_mesh: meshes.add(Cuboid::from_length(BLOCK_SIZE)),
        ghost_material: materials.add(StandardMaterial {
            base_color: Color::srgba(0.2, 0.8, 0.2, 0.5),
            alpha_mode: AlphaMode::Blend,
            unlit: true,
            ..default()
        }),
        placed_material: materials.add(StandardMaterial {
            base_color: Color::srgb(0.05, 0.05, 0.05),
            perceptual_roughness: 0.8,
            metallic: 0.0,
            ..default()
        }),
    };

    commands.insert_resource(SurfaceRegistry::new(settings.ground_half_extent));
    spawn_ghost(&mut commands, &assets, QuarterTurns::ZERO);
    commands.insert_resource(assets);
}

/// Spawn a fresh ghost inheriting `yaw`, hidden until the first retarget
/// gives it a valid position.
fn spawn_ghost(commands: &mut Commands, assets: &PlacementAssets, yaw: QuarterTurns) {
    commands.spawn((
        GhostPreview,
        Mesh3d(assets.block_mesh.clone()),
        MeshMaterial3d(assets.ghost_material.clone()),
        Transform::from_rotation(yaw.to_quat()),
        Visibility::Hidden,
    ));
}

/// Re-pose the ghost from the latest pointer position.
fn retarget_preview(
    mut moves: MessageReader<PointerMoved>,
    camera_query: Query<(&Camera, &GlobalTransform), With<Camera3d>>,
    registry: Res<SurfaceRegistry>,
    mut preview: ResMut<PreviewPose>,
    mut ghost_query: Query<(&mut Transform, &mut Visibility), With<GhostPreview>>,
) {
    // Only the latest pointer position this frame matters.
    let Some(&PointerMoved(cursor)) = moves.read().last() else {
        return;
    };

    let Ok((camera, camera_transform)) = camera_query.single() else {
        return;
    };

    // The camera normalizes the cursor to device coordinates and yields a
    // world-space ray.
    let Ok(ray) = camera.viewport_to_world(camera_transform, cursor) else {
        return;
    };

    // Nothing under the cursor: keep the last valid pose.
    let Some(position) = resolve_placement(ray, &registry) else {
        return;
    };

    preview.retarget(position);
    if let Ok((mut transform, mut visibility)) = ghost_query.single_mut() {
        transform.translation = position;
        *visibility = Visibility::Visible;
    }
}

/// Advance the rotation state and apply it to the ghost.
fn rotate_preview(
    mut rotations: MessageReader<RotateRequested>,
    mut rotation: ResMut<RotationState>,
    mut ghost_query: Query<&mut Transform, With<GhostPreview>>,
) {
    let mut advanced = false;
    for _ in rotations.read() {
        rotation.advance();
        advanced = true;
    }
    if !advanced {
        return;
    }

    if let Ok(mut transform) = ghost_query.single_mut() {
        transform.rotation = rotation.current().to_quat();
    }
    info!("Preview rotation: {} degrees", rotation.degrees());
}

/// Materialize the preview into a permanent block and respawn the ghost.
fn commit_placement(
    mut commits: MessageReader<CommitRequested>,
    mut commands: Commands,
    assets: Res<PlacementAssets>,
    mut registry: ResMut<SurfaceRegistry>,
    rotation: Res<RotationState>,
    mut preview: ResMut<PreviewPose>,
    ghost_query: Query<Entity, With<GhostPreview>>,
) {
    for _ in commits.read() {
        // Commit before any valid targeting is a silent no-op.
        let Some(pose) = commit_preview(&mut preview, &rotation, &mut registry) else {
            continue;
        };

        commands.spawn((
            PlacedBlockVisual,
            Mesh3d(assets.block_mesh.clone()),
            MeshMaterial3d(assets.placed_material.clone()),
            Transform::from_translation(pose.position).with_rotation(pose.rotation()),
        ));
        info!(
            "Placed block {} at {:?} ({} degrees)",
            registry.block_count(),
            pose.position,
            pose.yaw.degrees()
        );

        // The registry insert above already happened, so the new block is
        // targetable before the replacement ghost exists.
        for entity in ghost_query.iter() {
            commands.entity(entity).despawn();
        }
        spawn_ghost(&mut commands, &assets, rotation.current());
    }
}
