//! Input mapping: raw pointer and keyboard events to placement commands.
//!
//! The core never reads devices directly - it consumes these command
//! messages, so tests and future frontends can inject synthetic sequences.

use bevy::prelude::*;
use bevy::window::CursorMoved;

/// Key that rotates the pending block by 90 degrees.
const ROTATE_KEY: KeyCode = KeyCode::KeyR;

/// Pointer moved to a new window position, in window pixels.
#[derive(Message, Debug, Clone, Copy)]
pub struct PointerMoved(pub Vec2);

/// Rotate the pending placement by one quarter turn.
#[derive(Message, Debug, Clone, Copy)]
pub struct RotateRequested;

/// Commit the current preview as a permanent block.
#[derive(Message, Debug, Clone, Copy)]
pub struct CommitRequested;

pub fn emit_pointer_commands(
    mut cursor_moves: MessageReader<CursorMoved>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    mut pointer_moved: MessageWriter<PointerMoved>,
    mut commits: MessageWriter<CommitRequested>,
) {
    for moved in cursor_moves.read() {
        pointer_moved.write(PointerMoved(moved.position));
    }

    if mouse_button.just_pressed(MouseButton::Left) {
        commits.write(CommitRequested);
    }
}

pub fn emit_key_commands(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut rotations: MessageWriter<RotateRequested>,
) {
    // Every key other than the rotate key is ignored.
    if keyboard.just_pressed(ROTATE_KEY) {
        rotations.write(RotateRequested);
    }
}
