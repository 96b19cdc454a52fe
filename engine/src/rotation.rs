//! Discrete yaw rotation in 90 degree steps.

use bevy::prelude::*;
use std::f32::consts::FRAC_PI_2;

/// A yaw angle expressed as quarter turns around the Y axis.
///
/// Always one of {0, 90, 180, 270} degrees; arithmetic wraps modulo four
/// turns, so there is no out-of-range state to guard against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct QuarterTurns(u8);

impl QuarterTurns {
    pub const ZERO: Self = Self(0);

    pub fn new(steps: u8) -> Self {
        Self(steps % 4)
    }

    /// The next quarter turn, wrapping 270 -> 0.
    pub fn advanced(self) -> Self {
        Self((self.0 + 1) % 4)
    }

    pub fn steps(self) -> u8 {
        self.0
    }

    pub fn degrees(self) -> f32 {
        f32::from(self.0) * 90.0
    }

    pub fn radians(self) -> f32 {
        f32::from(self.0) * FRAC_PI_2
    }

    /// Y-axis rotation quaternion for this yaw.
    pub fn to_quat(self) -> Quat {
        Quat::from_rotation_y(self.radians())
    }
}

/// Orientation applied to the next placement.
///
/// Mutated only by the rotate command; lives for the whole session.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RotationState {
    turn: QuarterTurns,
}

impl RotationState {
    /// Advance by one 90 degree step, wrapping silently at 360.
    pub fn advance(&mut self) {
        self.turn = self.turn.advanced();
    }

    pub fn current(&self) -> QuarterTurns {
        self.turn
    }

    pub fn degrees(&self) -> f32 {
        self.turn.degrees()
    }
}
